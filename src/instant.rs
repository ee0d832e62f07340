use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    DATE_PATTERN, DATE_TIME_PATTERN, FieldError,
    codec::{DateCodec, RawFields, StrictCodec},
    prelude::*,
    types::{Day, Hour, Minute, Month, Year},
};

/// Which text pattern and which picker steps an editor uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// `YYYY-MM-DD`
    #[default]
    DateOnly,
    /// `YYYY-MM-DD HH:mm`
    DateAndTime,
}

impl Mode {
    /// Human readable description of the expected text pattern
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::DateOnly => DATE_PATTERN,
            Self::DateAndTime => DATE_TIME_PATTERN,
        }
    }

    pub const fn has_time(self) -> bool {
        matches!(self, Self::DateAndTime)
    }
}

/// The date portion of an [`Instant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

impl CalendarDate {
    /// # Errors
    /// Returns a `FieldError` naming the first component that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, FieldError> {
        Ok(Self {
            year: Year::new(year)?,
            month: Month::new(month)?,
            day: Day::new(day, year, month)?,
        })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }
}

/// Hour and minute of an [`Instant`]. Seconds are not represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{hour}:{minute}")]
pub struct ClockTime {
    hour: Hour,
    minute: Minute,
}

impl ClockTime {
    pub const MIDNIGHT: Self = Self {
        hour: Hour::MIDNIGHT,
        minute: Minute::ZERO,
    };

    /// # Errors
    /// Returns `FieldError::InvalidHour` or `FieldError::InvalidMinute`.
    pub fn new(hour: u8, minute: u8) -> Result<Self, FieldError> {
        Ok(Self {
            hour: Hour::new(hour)?,
            minute: Minute::new(minute)?,
        })
    }

    pub const fn hour(&self) -> u8 {
        self.hour.get()
    }

    pub const fn minute(&self) -> u8 {
        self.minute.get()
    }
}

/// A naive local-clock instant with minute precision.
///
/// This is the canonical value the editor keeps in sync. It is immutable:
/// the `with_*` methods return a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{date} {time}")]
pub struct Instant {
    date: CalendarDate,
    time: ClockTime,
}

impl Instant {
    /// # Errors
    /// Returns a `FieldError` naming the first component that is out of range.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Result<Self, FieldError> {
        Ok(Self {
            date: CalendarDate::new(year, month, day)?,
            time: ClockTime::new(hour, minute)?,
        })
    }

    /// Midnight at the start of `date`
    pub const fn from_date(date: CalendarDate) -> Self {
        Self {
            date,
            time: ClockTime::MIDNIGHT,
        }
    }

    pub const fn from_parts(date: CalendarDate, time: ClockTime) -> Self {
        Self { date, time }
    }

    pub(crate) fn from_raw(fields: &RawFields) -> Result<Self, FieldError> {
        Self::new(
            fields.year,
            fields.month,
            fields.day,
            fields.hour,
            fields.minute,
        )
    }

    /// Same time of day on another date
    #[must_use]
    pub const fn with_date(self, date: CalendarDate) -> Self {
        Self { date, ..self }
    }

    /// Same date at another time of day
    #[must_use]
    pub const fn with_time(self, time: ClockTime) -> Self {
        Self { time, ..self }
    }

    pub const fn date(&self) -> CalendarDate {
        self.date
    }

    pub const fn time(&self) -> ClockTime {
        self.time
    }

    pub const fn year(&self) -> u16 {
        self.date.year()
    }

    pub const fn month(&self) -> u8 {
        self.date.month()
    }

    pub const fn day(&self) -> u8 {
        self.date.day()
    }

    pub const fn hour(&self) -> u8 {
        self.time.hour()
    }

    pub const fn minute(&self) -> u8 {
        self.time.minute()
    }
}

impl FromStr for Instant {
    type Err = FieldError;

    /// Strictly parses `YYYY-MM-DD HH:mm`. Only the field newtypes' bounds
    /// apply here; the narrower editable year range is a validation concern.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(FieldError::EmptyInput);
        }
        let fields = StrictCodec
            .strict_parse(s, Mode::DateAndTime)
            .ok_or_else(|| FieldError::InvalidFormat(s.to_owned()))?;
        Self::from_raw(&fields)
    }
}

impl Serialize for Instant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
