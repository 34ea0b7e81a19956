use super::check_color;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for a [`ScrollView`](crate::scroll_view::ScrollView)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollViewConfig {
    #[serde(default = "ScrollViewConfig::default_gray")]
    pub track_color: String,

    #[serde(default = "ScrollViewConfig::default_gray")]
    pub bar_color: String,

    #[serde(default = "ScrollViewConfig::default_background_color")]
    pub background_color: String,

    #[serde(default = "ScrollViewConfig::default_track_char")]
    pub track_char: char,

    #[serde(default = "ScrollViewConfig::default_bar_char")]
    pub bar_char: char,

    /// Leave the scrollbar column blank when everything fits
    #[serde(default = "ScrollViewConfig::default_auto_hide")]
    pub auto_hide: bool,

    /// Content shorter than the frame sits at the top instead of the bottom
    #[serde(default)]
    pub gravity_is_top: bool,
}

impl ScrollViewConfig {
    fn default_gray() -> String {
        "777".to_string()
    }

    fn default_background_color() -> String {
        "000".to_string()
    }

    fn default_track_char() -> char {
        '\u{2502}'
    }

    fn default_bar_char() -> char {
        '\u{2588}'
    }

    fn default_auto_hide() -> bool {
        true
    }

    pub fn validate(&self) -> Result<()> {
        check_color("scroll_view.track_color", &self.track_color)?;
        check_color("scroll_view.bar_color", &self.bar_color)?;
        check_color("scroll_view.background_color", &self.background_color)
    }
}

impl Default for ScrollViewConfig {
    fn default() -> Self {
        Self {
            track_color: Self::default_gray(),
            bar_color: Self::default_gray(),
            background_color: Self::default_background_color(),
            track_char: Self::default_track_char(),
            bar_char: Self::default_bar_char(),
            auto_hide: Self::default_auto_hide(),
            gravity_is_top: false,
        }
    }
}

/// Configuration for a [`LogView`](crate::log_view::LogView)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogViewConfig {
    /// Logical lines kept before the oldest is dropped
    #[serde(default = "LogViewConfig::default_max_lines")]
    pub max_lines: usize,

    #[serde(default = "LogViewConfig::default_word_wrap")]
    pub word_wrap: bool,

    /// Color for plain lines and for rich text colored `default`
    #[serde(default = "LogViewConfig::default_color")]
    pub default_color: String,

    /// Extra color names usable in markup, mapped to real colors
    #[serde(default)]
    pub color_aliases: HashMap<String, String>,
}

impl LogViewConfig {
    fn default_max_lines() -> usize {
        100
    }

    fn default_word_wrap() -> bool {
        true
    }

    fn default_color() -> String {
        "aaa".to_string()
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_lines == 0 {
            return Err(Error::InvalidConfig(
                "log_view.max_lines must be at least 1".to_string(),
            ));
        }
        check_color("log_view.default_color", &self.default_color)?;
        for (name, color) in &self.color_aliases {
            check_color(&format!("log_view.color_aliases.{}", name), color)?;
        }
        Ok(())
    }
}

impl Default for LogViewConfig {
    fn default() -> Self {
        Self {
            max_lines: Self::default_max_lines(),
            word_wrap: Self::default_word_wrap(),
            default_color: Self::default_color(),
            color_aliases: HashMap::new(),
        }
    }
}
