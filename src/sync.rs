//! Text synchronization engine.
//!
//! Keeps the editable text and the canonical [`Instant`] reconciled. Text
//! flows out to the canonical value only through a valid parse, and the
//! canonical value flows back into the text only while the user is not
//! mid-edit.

use tracing::{debug, trace};

use crate::{
    Instant, Mode,
    codec::{DateCodec, StrictCodec},
    validation::{self, ValidationError, ValidationOutcome},
};

#[derive(Debug, Clone)]
pub struct TextSync<C = StrictCodec> {
    codec: C,
    mode: Mode,
    text: String,
    dirty: bool,
    outcome: ValidationOutcome,
    canonical: Instant,
}

impl TextSync {
    pub fn new(value: Instant, mode: Mode) -> Self {
        Self::with_codec(StrictCodec, value, mode)
    }
}

impl<C: DateCodec> TextSync<C> {
    pub fn with_codec(codec: C, value: Instant, mode: Mode) -> Self {
        let text = codec.format_pattern(&value, mode);
        Self {
            codec,
            mode,
            text,
            dirty: false,
            outcome: ValidationOutcome::Valid,
            canonical: value,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// True once the user has typed since the text was last synchronized.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn outcome(&self) -> &ValidationOutcome {
        &self.outcome
    }

    pub const fn error(&self) -> Option<&ValidationError> {
        self.outcome.error()
    }

    /// Last canonical value seen, either accepted from text or supplied
    /// from outside.
    pub const fn canonical(&self) -> Instant {
        self.canonical
    }

    pub fn format(&self, instant: &Instant) -> String {
        self.codec.format_pattern(instant, self.mode)
    }

    pub fn validate(&self, text: &str) -> ValidationOutcome {
        validation::check(&self.codec, text, self.mode).into()
    }

    pub fn parse(&self, text: &str) -> Option<Instant> {
        validation::check(&self.codec, text, self.mode).ok()
    }

    /// Records a value supplied by the host. The text is rewritten only
    /// when it is not dirty; otherwise the in-progress edit is kept.
    ///
    /// Returns whether the text was rewritten.
    pub fn on_external_instant_change(&mut self, instant: Instant) -> bool {
        self.canonical = instant;
        if self.dirty {
            trace!(%instant, text = %self.text, "external value held back while editing");
            return false;
        }
        self.text = self.format(&instant);
        self.outcome = ValidationOutcome::Valid;
        true
    }

    /// Applies a keystroke-level edit. Returns the newly accepted
    /// [`Instant`] when the text is valid. Invalid text is kept exactly as
    /// typed and leaves the canonical value alone.
    pub fn on_user_edit(&mut self, text: impl Into<String>) -> Option<Instant> {
        self.dirty = true;
        self.text = text.into();
        match validation::check(&self.codec, &self.text, self.mode) {
            Ok(instant) => {
                debug!(%instant, "accepted edited text");
                self.canonical = instant;
                self.outcome = ValidationOutcome::Valid;
                Some(instant)
            }
            Err(error) => {
                trace!(text = %self.text, %error, "edited text rejected");
                self.outcome = ValidationOutcome::Invalid(error);
                None
            }
        }
    }

    /// Leaves the field. Invalid text is discarded in favour of the last
    /// canonical value, and valid text that fell behind a held-back
    /// external value is re-synchronized. Either way the field is clean
    /// and shows the canonical value afterwards.
    ///
    /// Returns whether the text was rewritten.
    pub fn on_blur(&mut self) -> bool {
        self.dirty = false;
        let synced = self.format(&self.canonical);
        if self.text == synced {
            return false;
        }
        if self.outcome.is_valid() {
            debug!(stale = %self.text, canonical = %self.canonical, "re-synchronizing text on blur");
        } else {
            debug!(discarded = %self.text, "reverting invalid text on blur");
        }
        self.text = synced;
        self.outcome = ValidationOutcome::Valid;
        true
    }

    /// Adopts a value chosen outside the text field (e.g. from the picker),
    /// overriding any pending edit.
    pub fn commit(&mut self, instant: Instant) {
        self.canonical = instant;
        self.text = self.format(&instant);
        self.outcome = ValidationOutcome::Valid;
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RawFields;
    use proptest::prelude::*;

    fn june_first() -> Instant {
        Instant::new(2024, 6, 1, 9, 15).unwrap()
    }

    #[test]
    fn test_new_formats_value() {
        let sync = TextSync::new(june_first(), Mode::DateAndTime);
        assert_eq!(sync.text(), "2024-06-01 09:15");
        assert!(!sync.is_dirty());
        assert!(sync.outcome().is_valid());
    }

    #[test]
    fn test_external_change_rewrites_clean_text() {
        let mut sync = TextSync::new(june_first(), Mode::DateOnly);
        let next = Instant::new(2025, 1, 2, 0, 0).unwrap();
        assert!(sync.on_external_instant_change(next));
        assert_eq!(sync.text(), "2025-01-02");
        assert_eq!(sync.canonical(), next);
    }

    #[test]
    fn test_valid_edit_emits_instant() {
        let mut sync = TextSync::new(june_first(), Mode::DateAndTime);
        let emitted = sync.on_user_edit("2024-07-04 18:00");
        assert_eq!(emitted, Some(Instant::new(2024, 7, 4, 18, 0).unwrap()));
        assert_eq!(sync.canonical(), Instant::new(2024, 7, 4, 18, 0).unwrap());
        assert!(sync.is_dirty());
        assert_eq!(sync.error(), None);
    }

    #[test]
    fn test_invalid_edit_keeps_text_and_value() {
        let mut sync = TextSync::new(june_first(), Mode::DateAndTime);
        assert_eq!(sync.on_user_edit("2024-07-0"), None);
        assert_eq!(sync.text(), "2024-07-0");
        assert_eq!(sync.canonical(), june_first());
        assert!(matches!(
            sync.error(),
            Some(ValidationError::MalformedPattern { .. })
        ));
    }

    #[test]
    fn test_valid_edit_clears_previous_error() {
        let mut sync = TextSync::new(june_first(), Mode::DateOnly);
        sync.on_user_edit("1899-01-01");
        assert_eq!(sync.error(), Some(&ValidationError::YearOutOfRange));
        sync.on_user_edit("1999-01-01");
        assert_eq!(sync.error(), None);
    }

    #[test]
    fn test_dirty_text_survives_external_change() {
        let mut sync = TextSync::new(june_first(), Mode::DateOnly);
        sync.on_user_edit("2024-0");
        let next = Instant::new(2030, 3, 3, 0, 0).unwrap();
        assert!(!sync.on_external_instant_change(next));
        assert_eq!(sync.text(), "2024-0");
        // The new value is still remembered for a later revert
        assert_eq!(sync.canonical(), next);
    }

    #[test]
    fn test_valid_edit_is_not_overwritten_by_echo() {
        let mut sync = TextSync::new(june_first(), Mode::DateOnly);
        sync.on_user_edit("2024-06-02");
        assert!(!sync.on_external_instant_change(
            Instant::new(2024, 6, 2, 0, 0).unwrap()
        ));
        assert_eq!(sync.text(), "2024-06-02");
    }

    #[test]
    fn test_blur_reverts_invalid_text() {
        let mut sync = TextSync::new(june_first(), Mode::DateAndTime);
        sync.on_user_edit("2024-06-01 25:00");
        assert!(sync.on_blur());
        assert_eq!(sync.text(), "2024-06-01 09:15");
        assert_eq!(sync.error(), None);
        assert!(!sync.is_dirty());
    }

    #[test]
    fn test_blur_reverts_to_latest_external_value() {
        let mut sync = TextSync::new(june_first(), Mode::DateOnly);
        sync.on_user_edit("garbage");
        sync.on_external_instant_change(Instant::new(2031, 12, 24, 0, 0).unwrap());
        sync.on_blur();
        assert_eq!(sync.text(), "2031-12-24");
    }

    #[test]
    fn test_blur_while_valid_keeps_text_and_cleans() {
        let mut sync = TextSync::new(june_first(), Mode::DateOnly);
        sync.on_user_edit("2024-06-05");
        assert!(!sync.on_blur());
        assert_eq!(sync.text(), "2024-06-05");
        assert!(!sync.is_dirty());

        // Clean again, so the next external value is shown
        let next = Instant::new(2024, 6, 6, 0, 0).unwrap();
        assert!(sync.on_external_instant_change(next));
        assert_eq!(sync.text(), "2024-06-06");
    }

    #[test]
    fn test_blur_resyncs_valid_text_behind_external_value() {
        let mut sync = TextSync::new(june_first(), Mode::DateOnly);
        sync.on_user_edit("2024-06-05");
        let external = Instant::new(2024, 1, 1, 0, 0).unwrap();
        assert!(!sync.on_external_instant_change(external));
        assert_eq!(sync.text(), "2024-06-05");

        assert!(sync.on_blur());
        assert!(!sync.is_dirty());
        assert_eq!(sync.text(), "2024-01-01");
        assert_eq!(sync.parse(sync.text()), Some(sync.canonical()));

        // A later invalid edit reverts to the value the field was showing
        sync.on_user_edit("2024-13");
        sync.on_blur();
        assert_eq!(sync.text(), "2024-01-01");
    }

    #[test]
    fn test_commit_overrides_pending_edit() {
        let mut sync = TextSync::new(june_first(), Mode::DateAndTime);
        sync.on_user_edit("20");
        let picked = Instant::new(2024, 6, 1, 14, 30).unwrap();
        sync.commit(picked);
        assert_eq!(sync.text(), "2024-06-01 14:30");
        assert!(!sync.is_dirty());
        assert!(sync.outcome().is_valid());
        assert_eq!(sync.canonical(), picked);
    }

    /// Codec that writes and reads `DD.MM.YYYY`, to show the engine only
    /// talks to its codec.
    #[derive(Debug, Clone, Copy)]
    struct DottedCodec;

    impl DateCodec for DottedCodec {
        fn format_pattern(&self, instant: &Instant, _mode: Mode) -> String {
            format!(
                "{:02}.{:02}.{:04}",
                instant.day(),
                instant.month(),
                instant.year()
            )
        }

        fn strict_parse(&self, text: &str, _mode: Mode) -> Option<RawFields> {
            let mut parts = text.split('.');
            let day = parts.next()?.parse().ok()?;
            let month = parts.next()?.parse().ok()?;
            let year = parts.next()?.parse().ok()?;
            if parts.next().is_some() {
                return None;
            }
            Some(RawFields {
                year,
                month,
                day,
                hour: 0,
                minute: 0,
            })
        }
    }

    #[test]
    fn test_custom_codec() {
        let mut sync = TextSync::with_codec(DottedCodec, june_first(), Mode::DateOnly);
        assert_eq!(sync.text(), "01.06.2024");
        assert_eq!(
            sync.on_user_edit("24.12.2024"),
            Some(Instant::new(2024, 12, 24, 0, 0).unwrap())
        );
        // Range checks still apply to whatever the codec recovers
        assert_eq!(sync.on_user_edit("24.12.1800"), None);
        assert_eq!(sync.error(), Some(&ValidationError::YearOutOfRange));
        assert!(!sync.validate("31.02.2024").is_valid());
    }

    proptest! {
        #[test]
        fn prop_invalid_edit_never_corrupts(text in "[0-9: -]{0,18}") {
            let mut sync = TextSync::new(june_first(), Mode::DateAndTime);
            if !sync.validate(&text).is_valid() {
                prop_assert_eq!(sync.on_user_edit(text.clone()), None);
                prop_assert_eq!(sync.canonical(), june_first());
                prop_assert_eq!(sync.text(), text.as_str());
            }
        }

        #[test]
        fn prop_any_edit_suppresses_external_change(text in ".{0,18}") {
            let mut sync = TextSync::new(june_first(), Mode::DateOnly);
            sync.on_user_edit(text.clone());
            sync.on_external_instant_change(Instant::new(2000, 1, 1, 0, 0).unwrap());
            prop_assert_eq!(sync.text(), text.as_str());
        }
    }
}
