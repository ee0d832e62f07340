use crate::{
    FieldError, Instant, MAX_EDITABLE_YEAR, MAX_HOUR, MAX_MINUTE, MIN_EDITABLE_YEAR, Mode,
    codec::{DateCodec, RawFields, StrictCodec},
};

/// Why a piece of editable text cannot become an [`Instant`].
///
/// These are surfaced through [`ValidationOutcome`] for display and are
/// never raised out of the editor's event handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("A date is required")]
    EmptyInput,

    #[error("Invalid format, expected {expected}")]
    MalformedPattern { expected: &'static str },

    #[error("Year must be between {} and {}", MIN_EDITABLE_YEAR, MAX_EDITABLE_YEAR)]
    YearOutOfRange,

    #[error("Hour must be between 0 and {}", MAX_HOUR)]
    HourOutOfRange,

    #[error("Minute must be between 0 and {}", MAX_MINUTE)]
    MinuteOutOfRange,
}

/// Result of validating the current text. Recomputed on every edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationOutcome {
    #[default]
    Valid,
    Invalid(ValidationError),
}

impl ValidationOutcome {
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub const fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(error) => Some(error),
        }
    }
}

impl<T> From<Result<T, ValidationError>> for ValidationOutcome {
    fn from(result: Result<T, ValidationError>) -> Self {
        result.map_or_else(Self::Invalid, |_| Self::Valid)
    }
}

/// Renders `instant` in the fixed pattern for `mode`.
pub fn format(instant: &Instant, mode: Mode) -> String {
    StrictCodec.format_pattern(instant, mode)
}

/// Validates `text` against `mode`. Never panics.
pub fn validate(text: &str, mode: Mode) -> ValidationOutcome {
    check(&StrictCodec, text, mode).into()
}

/// Parses `text` when, and only when, [`validate`] reports it valid.
pub fn parse(text: &str, mode: Mode) -> Option<Instant> {
    check(&StrictCodec, text, mode).ok()
}

/// Runs the checks in order and stops at the first failure:
/// empty, pattern, year, hour, minute.
pub(crate) fn check<C: DateCodec>(
    codec: &C,
    text: &str,
    mode: Mode,
) -> Result<Instant, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let malformed = ValidationError::MalformedPattern {
        expected: mode.pattern(),
    };
    let fields = codec.strict_parse(text, mode).ok_or(malformed.clone())?;

    if !(MIN_EDITABLE_YEAR..=MAX_EDITABLE_YEAR).contains(&fields.year) {
        return Err(ValidationError::YearOutOfRange);
    }
    let fields = if mode.has_time() {
        if fields.hour > MAX_HOUR {
            return Err(ValidationError::HourOutOfRange);
        }
        if fields.minute > MAX_MINUTE {
            return Err(ValidationError::MinuteOutOfRange);
        }
        fields
    } else {
        // Date-only text never carries a time of day
        RawFields {
            hour: 0,
            minute: 0,
            ..fields
        }
    };

    Instant::from_raw(&fields).map_err(|error| match error {
        FieldError::InvalidHour(_) => ValidationError::HourOutOfRange,
        FieldError::InvalidMinute(_) => ValidationError::MinuteOutOfRange,
        _ => malformed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn invalid(text: &str, mode: Mode) -> ValidationError {
        match validate(text, mode) {
            ValidationOutcome::Invalid(error) => error,
            ValidationOutcome::Valid => panic!("{text:?} should be invalid in {mode:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(invalid("", Mode::DateOnly), ValidationError::EmptyInput);
        assert_eq!(
            invalid("   \t", Mode::DateAndTime),
            ValidationError::EmptyInput
        );
    }

    #[test]
    fn test_malformed_carries_expected_pattern() {
        assert_eq!(
            invalid("2024-06", Mode::DateOnly),
            ValidationError::MalformedPattern {
                expected: "YYYY-MM-DD"
            }
        );
        assert_eq!(
            invalid("2024-06-01", Mode::DateAndTime),
            ValidationError::MalformedPattern {
                expected: "YYYY-MM-DD HH:mm"
            }
        );
    }

    #[test]
    fn test_pattern_check_precedes_year_check() {
        assert!(matches!(
            invalid("1850-13-40", Mode::DateOnly),
            ValidationError::MalformedPattern { .. }
        ));
    }

    #[test]
    fn test_year_boundaries() {
        assert!(validate("1900-01-01", Mode::DateOnly).is_valid());
        assert!(validate("2100-12-31", Mode::DateOnly).is_valid());
        assert_eq!(
            invalid("1899-12-31", Mode::DateOnly),
            ValidationError::YearOutOfRange
        );
        assert_eq!(
            invalid("2101-01-01", Mode::DateOnly),
            ValidationError::YearOutOfRange
        );
        assert_eq!(
            invalid("0000-01-01", Mode::DateOnly),
            ValidationError::YearOutOfRange
        );
    }

    #[test]
    fn test_year_check_precedes_clock_checks() {
        assert_eq!(
            invalid("1899-12-31 24:00", Mode::DateAndTime),
            ValidationError::YearOutOfRange
        );
    }

    #[test]
    fn test_hour_and_minute_ranges() {
        assert_eq!(
            invalid("2024-06-01 24:00", Mode::DateAndTime),
            ValidationError::HourOutOfRange
        );
        assert_eq!(
            invalid("2024-06-01 23:60", Mode::DateAndTime),
            ValidationError::MinuteOutOfRange
        );
        // Hour is reported first when both are out of range
        assert_eq!(
            invalid("2024-06-01 99:99", Mode::DateAndTime),
            ValidationError::HourOutOfRange
        );
        assert!(validate("2024-06-01 23:59", Mode::DateAndTime).is_valid());
        assert!(validate("2024-06-01 00:00", Mode::DateAndTime).is_valid());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::MalformedPattern {
                expected: "YYYY-MM-DD"
            }
            .to_string(),
            "Invalid format, expected YYYY-MM-DD"
        );
        assert_eq!(
            ValidationError::YearOutOfRange.to_string(),
            "Year must be between 1900 and 2100"
        );
        assert_eq!(
            ValidationError::HourOutOfRange.to_string(),
            "Hour must be between 0 and 23"
        );
    }

    #[test]
    fn test_parse_only_when_valid() {
        assert_eq!(
            parse("2024-06-01 14:30", Mode::DateAndTime),
            Some(Instant::new(2024, 6, 1, 14, 30).unwrap())
        );
        assert_eq!(
            parse("2024-06-01", Mode::DateOnly),
            Some(Instant::new(2024, 6, 1, 0, 0).unwrap())
        );
        assert_eq!(parse("1899-12-31", Mode::DateOnly), None);
        assert_eq!(parse("2024-06-01 24:00", Mode::DateAndTime), None);
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = validate("nope", Mode::DateOnly);
        assert!(!outcome.is_valid());
        assert!(matches!(
            outcome.error(),
            Some(ValidationError::MalformedPattern { .. })
        ));
        assert_eq!(ValidationOutcome::default().error(), None);
    }

    /// Codec that reports a nonsense clock for every date.
    struct NoisyClockCodec;

    impl DateCodec for NoisyClockCodec {
        fn format_pattern(&self, instant: &Instant, mode: Mode) -> String {
            StrictCodec.format_pattern(instant, mode)
        }

        fn strict_parse(&self, text: &str, mode: Mode) -> Option<RawFields> {
            StrictCodec.strict_parse(text, mode).map(|fields| RawFields {
                hour: 99,
                minute: 99,
                ..fields
            })
        }
    }

    #[test]
    fn test_date_only_ignores_codec_clock_fields() {
        assert_eq!(
            check(&NoisyClockCodec, "2024-06-01", Mode::DateOnly),
            Ok(Instant::new(2024, 6, 1, 0, 0).unwrap())
        );
        assert_eq!(
            check(&NoisyClockCodec, "2024-06-01 10:00", Mode::DateAndTime),
            Err(ValidationError::HourOutOfRange)
        );
    }

    fn editable_instant() -> impl Strategy<Value = Instant> {
        (MIN_EDITABLE_YEAR..=MAX_EDITABLE_YEAR, 1u8..=12, 1u8..=28, 0u8..=23, 0u8..=59)
            .prop_map(|(y, m, d, h, min)| Instant::new(y, m, d, h, min).unwrap())
    }

    proptest! {
        #[test]
        fn prop_round_trip_date_and_time(instant in editable_instant()) {
            let text = format(&instant, Mode::DateAndTime);
            prop_assert_eq!(parse(&text, Mode::DateAndTime), Some(instant));
        }

        #[test]
        fn prop_round_trip_date_only(instant in editable_instant()) {
            let date_only = Instant::from_date(instant.date());
            let text = format(&instant, Mode::DateOnly);
            prop_assert_eq!(parse(&text, Mode::DateOnly), Some(date_only));
        }

        #[test]
        fn prop_validate_never_panics_and_agrees_with_parse(text in ".{0,20}") {
            for mode in [Mode::DateOnly, Mode::DateAndTime] {
                let outcome = validate(&text, mode);
                prop_assert_eq!(outcome.is_valid(), parse(&text, mode).is_some());
            }
        }
    }
}
