/// Maximum year an `Instant` can hold (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Earliest year accepted from typed text (inclusive)
pub const MIN_EDITABLE_YEAR: u16 = 1900;
/// Latest year accepted from typed text (inclusive)
pub const MAX_EDITABLE_YEAR: u16 = 2100;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Longest month, used when no year/month context is available
pub const MAX_DAYS_IN_MONTH: u8 = 31;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Highest hour on a 24-hour clock
pub const MAX_HOUR: u8 = 23;
/// Highest minute within an hour
pub const MAX_MINUTE: u8 = 59;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator
pub const DATE_SEPARATOR: char = '-';
/// Separator between the date and the time of day
pub const DATE_TIME_SEPARATOR: char = ' ';
/// Separator between hour and minute
pub const TIME_SEPARATOR: char = ':';

/// Expected pattern shown to the user in date-only mode
pub const DATE_PATTERN: &str = "YYYY-MM-DD";
/// Expected pattern shown to the user in date-and-time mode
pub const DATE_TIME_PATTERN: &str = "YYYY-MM-DD HH:mm";
