//! Calculator settings loaded from `laundry.toml`.
//!
//! The struct [`LaundryConfig`] holds every configurable parameter.
//! Values missing from the file fall back to sensible defaults.
//! The `LAUNDRY_UNIT` environment variable takes precedence over the file.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{LaundryError, Result};
use crate::request::Unit;
use crate::ui::OutputFormat;

/// Default config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "laundry.toml";

/// Environment variable overriding [`LaundryConfig::default_unit`].
pub const UNIT_ENV: &str = "LAUNDRY_UNIT";

/// Top-level configuration loaded from `laundry.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaundryConfig {
    /// Unit used when none is given on the command line.
    #[serde(default)]
    pub default_unit: Unit,

    /// Symbol printed in front of prices.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Output format when `--format` is not given.
    #[serde(default)]
    pub format: OutputFormat,
}

// Default currency symbol: "$".
fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for LaundryConfig {
    fn default() -> Self {
        Self {
            default_unit: Unit::default(),
            currency_symbol: default_currency_symbol(),
            format: OutputFormat::default(),
        }
    }
}

impl LaundryConfig {
    /// Loads `laundry.toml` from the working directory, or the file at
    /// `path` when given. A missing default file means default values; a
    /// missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::load_from(path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(unit) = std::env::var(UNIT_ENV) {
            config.apply_unit_override(&unit)?;
        }

        Ok(config)
    }

    /// Parses the TOML file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "reading config");
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LaundryError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Ok(toml::from_str::<LaundryConfig>(&contents)?)
    }

    // Empty values are ignored so an exported-but-blank variable is harmless.
    fn apply_unit_override(&mut self, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Ok(());
        }
        self.default_unit = value
            .parse()
            .map_err(|_| LaundryError::Config(format!("{UNIT_ENV}={value:?} is not a unit")))?;
        Ok(())
    }
}
