//! Widget configuration
//!
//! Every widget takes a plain-data config struct with named defaults. The
//! structs deserialize from TOML, so a host can keep its palette and limits
//! in one file:
//!
//! ```toml
//! [edit_box]
//! max_length = 80
//! enter_action = "insert"
//!
//! [form]
//! label_width = 12
//! ```

mod edit_box;
mod form;
mod scroll;

pub use edit_box::{EditBoxConfig, EnterAction};
pub use form::{FormConfig, FormEditBoxConfig, Palette};
pub use scroll::{LogViewConfig, ScrollViewConfig};

use crate::error::{Error, Result};
use crate::style::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// All widget configs, one table each
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub edit_box: EditBoxConfig,
    pub form: FormConfig,
    pub scroll_view: ScrollViewConfig,
    pub log_view: LogViewConfig,
}

impl TuiConfig {
    /// Parse and validate a TOML document; missing tables take defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TuiConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading widget configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.edit_box.validate()?;
        self.form.validate()?;
        self.scroll_view.validate()?;
        self.log_view.validate()
    }
}

/// Reject color names that [`Color::parse`] does not understand
pub(crate) fn check_color(field: &str, value: &str) -> Result<()> {
    if Color::parse(value).is_none() {
        return Err(Error::InvalidConfig(format!(
            "{} is not a color name or hex value: {:?}",
            field, value
        )));
    }
    Ok(())
}
