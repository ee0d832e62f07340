//! The public editor: one text field plus one modal picker, kept in sync
//! with a host-owned [`Instant`].

use std::fmt;

use tracing::debug;

use crate::{
    EditorConfig, Instant, Mode,
    codec::{DateCodec, StrictCodec},
    picker::{
        PickerBackend, PickerEvent, PickerMachine, PickerPhase, PickerRequest, SelectionOutcome,
    },
    sync::TextSync,
    validation::{ValidationError, ValidationOutcome},
};

/// Called once for every accepted change of the canonical value.
pub type ChangeHandler = Box<dyn FnMut(Instant)>;

/// A discrete input to the editor. Events are handled one at a time, in
/// arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The host supplied a new canonical value.
    ExternalValue(Instant),
    /// The user changed the text.
    Edit(String),
    /// The text field lost focus.
    Blur,
    OpenPicker,
    Picker(PickerEvent),
    DismissPicker,
}

pub struct DateTimeEditor<C = StrictCodec> {
    text: TextSync<C>,
    picker: PickerMachine,
    on_change: ChangeHandler,
}

impl DateTimeEditor {
    /// Editor using the host platform's picker interaction model.
    pub fn new(value: Instant, mode: Mode, on_change: impl FnMut(Instant) + 'static) -> Self {
        Self::from_config(value, EditorConfig::new(mode), on_change)
    }

    pub fn from_config(
        value: Instant,
        config: EditorConfig,
        on_change: impl FnMut(Instant) + 'static,
    ) -> Self {
        Self::with_codec(StrictCodec, value, config, on_change)
    }
}

impl<C: DateCodec> DateTimeEditor<C> {
    pub fn with_codec(
        codec: C,
        value: Instant,
        config: EditorConfig,
        on_change: impl FnMut(Instant) + 'static,
    ) -> Self {
        Self {
            text: TextSync::with_codec(codec, value, config.mode),
            picker: PickerMachine::new(config.mode, config.interaction),
            on_change: Box::new(on_change),
        }
    }

    pub fn text(&self) -> &str {
        self.text.text()
    }

    pub const fn outcome(&self) -> &ValidationOutcome {
        self.text.outcome()
    }

    pub const fn error(&self) -> Option<&ValidationError> {
        self.text.error()
    }

    /// Inline message for the current error, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    /// Last known canonical value.
    pub const fn value(&self) -> Instant {
        self.text.canonical()
    }

    pub const fn mode(&self) -> Mode {
        self.text.mode()
    }

    pub const fn is_dirty(&self) -> bool {
        self.text.is_dirty()
    }

    pub fn picker_phase(&self) -> PickerPhase {
        self.picker.phase()
    }

    /// The host's value changed.
    pub fn set_value(&mut self, value: Instant) {
        self.text.on_external_instant_change(value);
    }

    /// The user typed. Fires `on_change` when the text parses.
    pub fn input(&mut self, text: impl Into<String>) {
        if let Some(instant) = self.text.on_user_edit(text) {
            (self.on_change)(instant);
        }
    }

    pub fn blur(&mut self) {
        self.text.on_blur();
    }

    /// Opens the picker and returns what the back-end should show.
    pub fn open_picker(&mut self) -> PickerRequest {
        self.picker.open(self.text.canonical())
    }

    pub fn open_picker_with(&mut self, backend: &mut impl PickerBackend) {
        let request = self.open_picker();
        backend.show(request);
    }

    /// Handles a back-end callback. Returns the next request when a
    /// two-step session moves on to its time step.
    pub fn picker_event(&mut self, event: PickerEvent) -> Option<PickerRequest> {
        match event {
            PickerEvent::Dismissed => {
                self.picker.dismiss();
                None
            }
            PickerEvent::Selected(selection) => {
                match self
                    .picker
                    .receive_selection(selection, self.text.canonical())
                {
                    SelectionOutcome::Committed(instant) => {
                        self.text.commit(instant);
                        (self.on_change)(instant);
                        None
                    }
                    SelectionOutcome::NextStep(request) => Some(request),
                    SelectionOutcome::Ignored => None,
                }
            }
        }
    }

    /// Like [`picker_event`](Self::picker_event), showing any follow-up
    /// step on `backend`.
    pub fn picker_event_with(&mut self, event: PickerEvent, backend: &mut impl PickerBackend) {
        if let Some(request) = self.picker_event(event) {
            backend.show(request);
        }
    }

    pub fn dismiss_picker(&mut self) {
        self.picker.dismiss();
    }

    /// Dispatches one event. Returns a picker request when the back-end
    /// needs to be shown.
    pub fn handle(&mut self, event: EditorEvent) -> Option<PickerRequest> {
        debug!(?event, "editor event");
        match event {
            EditorEvent::ExternalValue(value) => self.set_value(value),
            EditorEvent::Edit(text) => self.input(text),
            EditorEvent::Blur => self.blur(),
            EditorEvent::OpenPicker => return Some(self.open_picker()),
            EditorEvent::Picker(event) => return self.picker_event(event),
            EditorEvent::DismissPicker => self.dismiss_picker(),
        }
        None
    }
}

impl<C: fmt::Debug> fmt::Debug for DateTimeEditor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateTimeEditor")
            .field("text", &self.text)
            .field("picker", &self.picker)
            .finish_non_exhaustive()
    }
}
