//! Format/parse capability used by the text engine.
//!
//! The engine only needs two things from a date library: render an
//! [`Instant`] for a [`Mode`], and strictly recognise text written in that
//! mode's pattern. [`StrictCodec`] is the built-in implementation.

use crate::{
    DATE_SEPARATOR, DATE_TIME_SEPARATOR, Instant, MAX_MONTH, MIN_DAY, Mode, TIME_SEPARATOR,
    types::days_in_month,
};

/// Integers recovered from structurally valid text, before range checks.
///
/// `hour` and `minute` are zero in date-only mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFields {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

pub trait DateCodec {
    /// Renders `instant` in the fixed pattern for `mode`.
    fn format_pattern(&self, instant: &Instant, mode: Mode) -> String;

    /// Recognises text that matches `mode`'s pattern character for
    /// character. Returns `None` for anything else, including leading or
    /// trailing whitespace.
    fn strict_parse(&self, text: &str, mode: Mode) -> Option<RawFields>;
}

// Byte offsets in `YYYY-MM-DD HH:mm`
const YEAR: (usize, usize) = (0, 4);
const MONTH: (usize, usize) = (5, 7);
const DAY: (usize, usize) = (8, 10);
const HOUR: (usize, usize) = (11, 13);
const MINUTE: (usize, usize) = (14, 16);
const DATE_LEN: usize = 10;
const DATE_TIME_LEN: usize = 16;

/// Fixed-position, ASCII-only codec for `YYYY-MM-DD` and `YYYY-MM-DD HH:mm`.
///
/// Month and day must name a real calendar date. Hour and minute only need
/// to be two digits; their ranges are reported separately by validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictCodec;

impl StrictCodec {
    fn digits(bytes: &[u8], (start, end): (usize, usize)) -> Option<u16> {
        bytes[start..end].iter().try_fold(0u16, |acc, b| {
            b.is_ascii_digit().then(|| acc * 10 + u16::from(b - b'0'))
        })
    }

    fn two_digits(bytes: &[u8], span: (usize, usize)) -> Option<u8> {
        Self::digits(bytes, span).and_then(|v| u8::try_from(v).ok())
    }

    fn separator_at(bytes: &[u8], at: usize, separator: char) -> bool {
        bytes.get(at).is_some_and(|b| char::from(*b) == separator)
    }
}

impl DateCodec for StrictCodec {
    fn format_pattern(&self, instant: &Instant, mode: Mode) -> String {
        match mode {
            Mode::DateOnly => instant.date().to_string(),
            Mode::DateAndTime => instant.to_string(),
        }
    }

    fn strict_parse(&self, text: &str, mode: Mode) -> Option<RawFields> {
        let bytes = text.as_bytes();
        let expected_len = if mode.has_time() {
            DATE_TIME_LEN
        } else {
            DATE_LEN
        };
        if bytes.len() != expected_len
            || !Self::separator_at(bytes, YEAR.1, DATE_SEPARATOR)
            || !Self::separator_at(bytes, MONTH.1, DATE_SEPARATOR)
        {
            return None;
        }

        let year = Self::digits(bytes, YEAR)?;
        let month = Self::two_digits(bytes, MONTH)?;
        let day = Self::two_digits(bytes, DAY)?;
        if month == 0 || month > MAX_MONTH || day < MIN_DAY || day > days_in_month(year, month) {
            return None;
        }

        let (hour, minute) = if mode.has_time() {
            if !Self::separator_at(bytes, DAY.1, DATE_TIME_SEPARATOR)
                || !Self::separator_at(bytes, HOUR.1, TIME_SEPARATOR)
            {
                return None;
            }
            (
                Self::two_digits(bytes, HOUR)?,
                Self::two_digits(bytes, MINUTE)?,
            )
        } else {
            (0, 0)
        };

        Some(RawFields {
            year,
            month,
            day,
            hour,
            minute,
        })
    }
}
