use super::check_color;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// What Return does in an edit box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnterAction {
    /// Nothing
    Ignore,
    /// Insert a linefeed
    Insert,
    /// Record history, clear the box and emit the text on the commit stream
    #[default]
    Commit,
}

/// Configuration for an [`EditBox`](crate::edit::EditBox)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditBoxConfig {
    /// Text color
    #[serde(default = "EditBoxConfig::default_color")]
    pub color: String,

    #[serde(default = "EditBoxConfig::default_background_color")]
    pub background_color: String,

    /// Color of the completion ghost and the overflow ellipsis
    #[serde(default = "EditBoxConfig::default_suggestion_color")]
    pub suggestion_color: String,

    /// Hard cap on the number of characters in the buffer
    #[serde(default = "EditBoxConfig::default_max_length")]
    pub max_length: usize,

    /// Number of committed lines kept for Up/Down recall
    #[serde(default = "EditBoxConfig::default_max_history")]
    pub max_history: usize,

    /// Lines to seed the history with, oldest first
    #[serde(default)]
    pub history: Vec<String>,

    /// Scroll when the text outgrows the box, instead of capping it at the
    /// box's capacity
    #[serde(default)]
    pub allow_scroll: bool,

    /// Up/Down browse history; when off they move between lines
    #[serde(default = "EditBoxConfig::default_true")]
    pub use_history: bool,

    #[serde(default)]
    pub enter_action: EnterAction,

    /// Break long lines at spaces and hyphens instead of mid-word
    #[serde(default)]
    pub word_wrap: bool,

    /// Draw linefeeds as a visible glyph
    #[serde(default = "EditBoxConfig::default_true")]
    pub visible_linefeed: bool,

    /// Whether this box owns the terminal cursor
    #[serde(default = "EditBoxConfig::default_true")]
    pub focused: bool,
}

impl EditBoxConfig {
    fn default_color() -> String {
        "ccc".to_string()
    }

    fn default_background_color() -> String {
        "000".to_string()
    }

    fn default_suggestion_color() -> String {
        "777".to_string()
    }

    fn default_max_length() -> usize {
        255
    }

    fn default_max_history() -> usize {
        100
    }

    fn default_true() -> bool {
        true
    }

    pub fn validate(&self) -> Result<()> {
        check_color("edit_box.color", &self.color)?;
        check_color("edit_box.background_color", &self.background_color)?;
        check_color("edit_box.suggestion_color", &self.suggestion_color)?;
        if self.max_length == 0 {
            return Err(Error::InvalidConfig(
                "edit_box.max_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EditBoxConfig {
    fn default() -> Self {
        Self {
            color: Self::default_color(),
            background_color: Self::default_background_color(),
            suggestion_color: Self::default_suggestion_color(),
            max_length: Self::default_max_length(),
            max_history: Self::default_max_history(),
            history: Vec::new(),
            allow_scroll: false,
            use_history: true,
            enter_action: EnterAction::default(),
            word_wrap: false,
            visible_linefeed: true,
            focused: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_action_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            action: EnterAction,
        }
        let w: Wrapper = toml::from_str("action = \"ignore\"").unwrap();
        assert_eq!(w.action, EnterAction::Ignore);
        assert!(toml::from_str::<Wrapper>("action = \"explode\"").is_err());
    }

    #[test]
    fn test_zero_max_length_rejected() {
        let config = EditBoxConfig {
            max_length: 0,
            ..EditBoxConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
