use super::{check_color, EnterAction, ScrollViewConfig};
use crate::error::{Error, Result};
use crate::style::{Color, Style};
use serde::{Deserialize, Serialize};

/// Configuration for a [`Form`](crate::form::Form)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Width of the label column, including the gap before the field
    #[serde(default = "FormConfig::default_label_width")]
    pub label_width: u16,

    /// Blank columns between a label and its field
    #[serde(default = "FormConfig::default_label_spacing")]
    pub label_spacing: u16,

    #[serde(default = "FormConfig::default_label_color")]
    pub label_color: String,

    #[serde(default = "FormConfig::default_black")]
    pub label_background: String,

    #[serde(default = "FormConfig::default_label_focus_color")]
    pub label_focus_color: String,

    #[serde(default = "FormConfig::default_black")]
    pub label_focus_background: String,

    /// Blank rows above each field
    #[serde(default = "FormConfig::default_vertical_padding")]
    pub vertical_padding: u16,

    /// The scroll view the form lives in
    #[serde(default = "FormConfig::default_scroll")]
    pub scroll: ScrollViewConfig,

    /// Colors shared by the form's components
    #[serde(default)]
    pub palette: Palette,
}

impl FormConfig {
    fn default_label_width() -> u16 {
        20
    }

    fn default_label_spacing() -> u16 {
        1
    }

    fn default_label_color() -> String {
        "777".to_string()
    }

    fn default_label_focus_color() -> String {
        "ccc".to_string()
    }

    fn default_black() -> String {
        "000".to_string()
    }

    fn default_vertical_padding() -> u16 {
        1
    }

    fn default_scroll() -> ScrollViewConfig {
        ScrollViewConfig {
            gravity_is_top: true,
            ..ScrollViewConfig::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_color("form.label_color", &self.label_color)?;
        check_color("form.label_background", &self.label_background)?;
        check_color("form.label_focus_color", &self.label_focus_color)?;
        check_color("form.label_focus_background", &self.label_focus_background)?;
        self.scroll.validate()?;
        self.palette.validate()
    }

    pub(crate) fn label_style(&self, focused: bool) -> Style {
        if focused {
            Style::parse(&self.label_focus_color, &self.label_focus_background)
        } else {
            Style::parse(&self.label_color, &self.label_background)
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            label_width: Self::default_label_width(),
            label_spacing: Self::default_label_spacing(),
            label_color: Self::default_label_color(),
            label_background: Self::default_black(),
            label_focus_color: Self::default_label_focus_color(),
            label_focus_background: Self::default_black(),
            vertical_padding: Self::default_vertical_padding(),
            scroll: Self::default_scroll(),
            palette: Palette::default(),
        }
    }
}

/// Colors used by form components for their resting, focused and
/// rejected states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub color: String,
    pub background: String,
    pub focus_color: String,
    pub focus_background: String,
    /// Background of a field that refused to give up focus
    pub error_background: String,
    /// Focus markers around buttons and selector entries
    pub badge_color: String,
    /// Completion ghost and overflow markers in edit boxes
    pub suggestion_color: String,
    /// Background outside components
    pub form_background: String,
}

impl Palette {
    pub fn validate(&self) -> Result<()> {
        check_color("palette.color", &self.color)?;
        check_color("palette.background", &self.background)?;
        check_color("palette.focus_color", &self.focus_color)?;
        check_color("palette.focus_background", &self.focus_background)?;
        check_color("palette.error_background", &self.error_background)?;
        check_color("palette.badge_color", &self.badge_color)?;
        check_color("palette.suggestion_color", &self.suggestion_color)?;
        check_color("palette.form_background", &self.form_background)
    }

    pub fn normal(&self) -> Style {
        Style::parse(&self.color, &self.background)
    }

    pub fn focus(&self) -> Style {
        Style::parse(&self.focus_color, &self.focus_background)
    }

    pub fn error(&self) -> Style {
        Style::parse(&self.focus_color, &self.error_background)
    }

    pub fn badge(&self, focused: bool) -> Style {
        let bg = if focused { &self.focus_background } else { &self.background };
        Style::parse(&self.badge_color, bg)
    }

    pub fn blank(&self) -> Style {
        Style::parse(&self.color, &self.form_background)
    }

    pub fn suggestion(&self) -> Color {
        Color::parse_or_reset(&self.suggestion_color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            color: "999".to_string(),
            background: "333".to_string(),
            focus_color: "fff".to_string(),
            focus_background: "blue".to_string(),
            error_background: "red".to_string(),
            badge_color: "0af".to_string(),
            suggestion_color: "777".to_string(),
            form_background: "000".to_string(),
        }
    }
}

/// Limits and editing behavior of a [`FormEditBox`](crate::form::FormEditBox)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormEditBoxConfig {
    /// Narrowest the box will be laid out
    pub min_width: u16,
    /// Longest text accepted; also the widest the box grows
    pub max_length: u16,
    pub min_height: u16,
    pub max_height: u16,
    pub enter_action: EnterAction,
    pub word_wrap: bool,
    pub visible_linefeed: bool,
    /// Look up completions after every key instead of only on Tab
    pub always_suggest: bool,
}

impl FormEditBoxConfig {
    /// A box exactly `width` columns wide that never grows past one line
    pub fn one_line(width: u16) -> Self {
        Self {
            min_width: width,
            max_length: width,
            min_height: 1,
            max_height: 1,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(Error::InvalidConfig(
                "form_edit_box.max_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Order the bounds so `min <= max` on both axes
    pub(crate) fn clamped(mut self) -> Self {
        self.min_height = self.min_height.max(1);
        self.max_height = self.max_height.max(self.min_height);
        self.max_length = self.max_length.max(1);
        self.min_width = self.min_width.min(self.max_length);
        self
    }
}

impl Default for FormEditBoxConfig {
    fn default() -> Self {
        Self {
            min_width: 10,
            max_length: 255,
            min_height: 1,
            max_height: 5,
            enter_action: EnterAction::Ignore,
            word_wrap: false,
            visible_linefeed: false,
            always_suggest: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_scroll_defaults_to_top_gravity() {
        let config = FormConfig::default();
        assert!(config.scroll.gravity_is_top);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_label_styles() {
        let config = FormConfig::default();
        assert_eq!(config.label_style(true).fg, Color::Rgb(0xcc, 0xcc, 0xcc));
        assert_eq!(config.label_style(false).fg, Color::Rgb(0x77, 0x77, 0x77));
    }

    #[test]
    fn test_edit_box_bounds_are_ordered() {
        let config = FormEditBoxConfig {
            min_height: 4,
            max_height: 2,
            min_width: 50,
            max_length: 20,
            ..FormEditBoxConfig::default()
        }
        .clamped();
        assert_eq!((config.min_height, config.max_height), (4, 4));
        assert_eq!(config.min_width, 20);

        let one = FormEditBoxConfig::one_line(8);
        assert_eq!((one.min_width, one.max_length, one.max_height), (8, 8, 1));
        assert!(FormEditBoxConfig {
            max_length: 0,
            ..FormEditBoxConfig::default()
        }
        .validate()
        .is_err());
    }
}
