use serde::{Deserialize, Serialize};

use crate::{InteractionModel, Mode};

/// Static settings for a [`DateTimeEditor`](crate::DateTimeEditor).
///
/// Usually embedded in a host's form description:
///
/// ```
/// # use datetime_field::{EditorConfig, InteractionModel, Mode};
/// let config: EditorConfig =
///     serde_json::from_str(r#"{ "mode": "date_and_time", "interaction": "two_step" }"#).unwrap();
/// assert_eq!(config.mode, Mode::DateAndTime);
/// assert_eq!(config.interaction, InteractionModel::TwoStep);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub mode: Mode,
    /// Defaults to [`InteractionModel::host_default`].
    pub interaction: InteractionModel,
}

impl EditorConfig {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_interaction(mut self, interaction: InteractionModel) -> Self {
        self.interaction = interaction;
        self
    }
}

impl From<InteractionModel> for EditorConfig {
    fn from(interaction: InteractionModel) -> Self {
        Self::default().with_interaction(interaction)
    }
}
