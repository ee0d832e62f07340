//! Modal picker lifecycle.
//!
//! A session runs from [`PickerMachine::open`] until exactly one committed
//! [`Instant`] or a dismissal. Back-ends that can only show one calendar
//! field at a time are driven through a date step followed by a time step;
//! the [`InteractionStrategy`] chosen at construction decides which flow
//! applies, so both kinds of back-end look the same from outside.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{CalendarDate, ClockTime, Instant, Mode};

/// Which calendar fields a back-end should offer when shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldsRequested {
    Date,
    Time,
    DateAndTime,
}

/// Arguments for one `show` call on a picker back-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerRequest {
    pub initial: Instant,
    pub fields: FieldsRequested,
}

/// The native selection widget, treated as a black box.
///
/// Every `show` must eventually be answered by exactly one
/// [`PickerEvent`], delivered back to the editor.
pub trait PickerBackend {
    fn show(&mut self, request: PickerRequest);
}

/// Fields a back-end reported for one selection. A back-end may report
/// more than was requested; only the fields the current step needs are used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub date: Option<CalendarDate>,
    pub time: Option<ClockTime>,
}

impl Selection {
    pub const fn date(date: CalendarDate) -> Self {
        Self {
            date: Some(date),
            time: None,
        }
    }

    pub const fn time(time: ClockTime) -> Self {
        Self {
            date: None,
            time: Some(time),
        }
    }
}

impl From<Instant> for Selection {
    fn from(instant: Instant) -> Self {
        Self {
            date: Some(instant.date()),
            time: Some(instant.time()),
        }
    }
}

/// Callback delivered by a back-end for a `show` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    Selected(Selection),
    Dismissed,
}

/// How a platform's picker collects a date and a time.
pub trait InteractionStrategy: fmt::Debug {
    /// Fields to request when a session opens.
    fn fields_on_open(&self, mode: Mode) -> FieldsRequested;

    /// Whether a date selection must be followed by a separate time step.
    fn has_time_step(&self, mode: Mode) -> bool;
}

/// Date and time are chosen together in one selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleStep;

impl InteractionStrategy for SingleStep {
    fn fields_on_open(&self, mode: Mode) -> FieldsRequested {
        if mode.has_time() {
            FieldsRequested::DateAndTime
        } else {
            FieldsRequested::Date
        }
    }

    fn has_time_step(&self, _mode: Mode) -> bool {
        false
    }
}

/// The back-end shows the date and the time as two separate dialogs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoStep;

impl InteractionStrategy for TwoStep {
    fn fields_on_open(&self, _mode: Mode) -> FieldsRequested {
        FieldsRequested::Date
    }

    fn has_time_step(&self, mode: Mode) -> bool {
        mode.has_time()
    }
}

/// Configuration-level name for an [`InteractionStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionModel {
    SingleStep,
    TwoStep,
}

impl InteractionModel {
    /// Model used by the native pickers of the target platform. Android's
    /// pickers show date and time as separate dialogs.
    pub const fn host_default() -> Self {
        if cfg!(target_os = "android") {
            Self::TwoStep
        } else {
            Self::SingleStep
        }
    }

    pub fn strategy(self) -> Box<dyn InteractionStrategy> {
        match self {
            Self::SingleStep => Box::new(SingleStep),
            Self::TwoStep => Box::new(TwoStep),
        }
    }
}

impl Default for InteractionModel {
    fn default() -> Self {
        Self::host_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerStep {
    SelectingDate,
    SelectingTime,
}

/// An open picker. Dropped on commit or dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerSession {
    step: PickerStep,
    pending_date: CalendarDate,
}

impl PickerSession {
    pub const fn step(&self) -> PickerStep {
        self.step
    }

    /// Date chosen so far, carried from the date step into the time step.
    pub const fn pending_date(&self) -> CalendarDate {
        self.pending_date
    }
}

/// Observable state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPhase {
    Closed,
    SelectingDate,
    SelectingTime,
}

/// What a selection did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Session finished with this value; the picker is closed.
    Committed(Instant),
    /// Date stored; the back-end must now be shown this request.
    NextStep(PickerRequest),
    /// No session was open.
    Ignored,
}

#[derive(Debug)]
pub struct PickerMachine {
    mode: Mode,
    strategy: Box<dyn InteractionStrategy>,
    session: Option<PickerSession>,
}

impl PickerMachine {
    pub fn new(mode: Mode, model: InteractionModel) -> Self {
        Self::with_strategy(mode, model.strategy())
    }

    pub fn with_strategy(mode: Mode, strategy: Box<dyn InteractionStrategy>) -> Self {
        Self {
            mode,
            strategy,
            session: None,
        }
    }

    pub const fn session(&self) -> Option<&PickerSession> {
        self.session.as_ref()
    }

    pub const fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> PickerPhase {
        match self.session.map(|s| s.step) {
            None => PickerPhase::Closed,
            Some(PickerStep::SelectingDate) => PickerPhase::SelectingDate,
            Some(PickerStep::SelectingTime) => PickerPhase::SelectingTime,
        }
    }

    /// Starts a session seeded from `canonical`. Opening while a session is
    /// already running starts over from the date step.
    pub fn open(&mut self, canonical: Instant) -> PickerRequest {
        if self.session.is_some() {
            trace!("restarting open picker session");
        }
        self.session = Some(PickerSession {
            step: PickerStep::SelectingDate,
            pending_date: canonical.date(),
        });
        PickerRequest {
            initial: canonical,
            fields: self.strategy.fields_on_open(self.mode),
        }
    }

    /// Feeds one selection into the running session. `canonical` supplies
    /// any field the selection leaves out.
    pub fn receive_selection(
        &mut self,
        selected: Selection,
        canonical: Instant,
    ) -> SelectionOutcome {
        let Some(session) = self.session else {
            trace!(?selected, "selection with no open picker");
            return SelectionOutcome::Ignored;
        };

        match session.step {
            PickerStep::SelectingDate => {
                let date = selected.date.unwrap_or(session.pending_date);
                if self.strategy.has_time_step(self.mode) {
                    trace!(%date, "date step done, awaiting time");
                    self.session = Some(PickerSession {
                        step: PickerStep::SelectingTime,
                        pending_date: date,
                    });
                    return SelectionOutcome::NextStep(PickerRequest {
                        initial: canonical.with_date(date),
                        fields: FieldsRequested::Time,
                    });
                }
                let time = selected.time.unwrap_or_else(|| canonical.time());
                self.commit(Instant::from_parts(date, time))
            }
            PickerStep::SelectingTime => {
                // The time step only ever contributes hour and minute
                let time = selected.time.unwrap_or_else(|| canonical.time());
                self.commit(Instant::from_parts(session.pending_date, time))
            }
        }
    }

    /// Closes the session without a value. A no-op when already closed.
    ///
    /// Returns whether a session was discarded.
    pub fn dismiss(&mut self) -> bool {
        let discarded = self.session.take().is_some();
        if discarded {
            debug!("picker dismissed");
        }
        discarded
    }

    fn commit(&mut self, instant: Instant) -> SelectionOutcome {
        self.session = None;
        debug!(%instant, "picker committed");
        SelectionOutcome::Committed(instant)
    }
}
