//! Keeps a date/time text field, a modal picker and a host-owned value in
//! agreement.
//!
//! The host hands a [`DateTimeEditor`] its current [`Instant`] and a
//! change callback, then forwards keystrokes, blur, picker callbacks and
//! external value changes. The editor decides what the text shows, which
//! validation error (if any) to display, and when the callback fires.
//!
//! ```
//! use datetime_field::{DateTimeEditor, Instant, Mode};
//!
//! let start = Instant::new(2024, 6, 1, 9, 0)?;
//! let mut editor = DateTimeEditor::new(start, Mode::DateAndTime, |value| {
//!     println!("new value: {value}");
//! });
//!
//! editor.input("2024-06-01 24:00");
//! assert_eq!(editor.error_message().as_deref(), Some("Hour must be between 0 and 23"));
//!
//! editor.blur();
//! assert_eq!(editor.text(), "2024-06-01 09:00");
//! # Ok::<(), datetime_field::FieldError>(())
//! ```

mod codec;
mod config;
mod consts;
mod editor;
mod instant;
mod picker;
mod prelude;
mod sync;
mod types;
mod validation;

pub use codec::{DateCodec, RawFields, StrictCodec};
pub use config::EditorConfig;
pub use consts::*;
pub use editor::{ChangeHandler, DateTimeEditor, EditorEvent};
pub use instant::{CalendarDate, ClockTime, Instant, Mode};
pub use picker::{
    FieldsRequested, InteractionModel, InteractionStrategy, PickerBackend, PickerEvent,
    PickerMachine, PickerPhase, PickerRequest, PickerSession, PickerStep, Selection,
    SelectionOutcome, SingleStep, TwoStep,
};
pub use sync::TextSync;
pub use types::{Day, Hour, Minute, Month, Year, is_leap_year};
pub use validation::{ValidationError, ValidationOutcome, format, parse, validate};

use crate::prelude::*;

/// Rejected construction of a field or value type.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum FieldError {
    #[display(fmt = "Invalid date/time format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Invalid hour: {} (must be 0-{})", "_0", MAX_HOUR)]
    InvalidHour(u8),
    #[display(fmt = "Invalid minute: {} (must be 0-{})", "_0", MAX_MINUTE)]
    InvalidMinute(u8),
    #[display(fmt = "Empty date/time string")]
    EmptyInput,
}

impl std::error::Error for FieldError {}
