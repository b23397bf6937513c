use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

use crate::types::{OffsetUnit, TaskConfig};

use super::error::BackdateError;

pub const DEFAULT_PATHSPEC: &str = "./*";

/// The built-in variants of the task.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Preset {
    /// 7.5 months back, "Update TD"
    #[default]
    Td,
    /// 9 months back, "Update clear extra line"
    ClearExtraLine,
}

impl Preset {
    #[must_use]
    pub fn config(self) -> TaskConfig {
        let (offset_amount, commit_message) = match self {
            Self::Td => (7.5, "Update TD"),
            Self::ClearExtraLine => (9.0, "Update clear extra line"),
        };
        TaskConfig {
            offset_amount,
            offset_unit: OffsetUnit::Months,
            commit_message: commit_message.to_string(),
            pathspec: DEFAULT_PATHSPEC.to_string(),
        }
    }
}

/// Partial settings, as read from a TOML file or collected from the command line.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigOverrides {
    pub offset_amount: Option<f64>,
    pub offset_unit: Option<OffsetUnit>,
    pub commit_message: Option<String>,
    pub pathspec: Option<String>,
}

impl ConfigOverrides {
    /// Layer these settings over `base`; fields left unset keep the base value.
    #[must_use]
    pub fn apply(self, mut base: TaskConfig) -> TaskConfig {
        if let Some(amount) = self.offset_amount {
            base.offset_amount = amount;
        }
        if let Some(unit) = self.offset_unit {
            base.offset_unit = unit;
        }
        if let Some(message) = self.commit_message {
            base.commit_message = message;
        }
        if let Some(pathspec) = self.pathspec {
            base.pathspec = pathspec;
        }
        base
    }
}

/// Read overrides from a TOML file.
///
/// # Errors
/// Returns an error when the file cannot be read or is not valid TOML for these keys.
pub fn load_config(path: &Path) -> Result<ConfigOverrides, BackdateError> {
    let config_text =
        std::fs::read_to_string(path).map_err(|source| BackdateError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&config_text).map_err(|source| BackdateError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Check the invariants every run relies on.
///
/// # Errors
/// Returns [`BackdateError::InvalidConfig`] naming the first offending field.
pub fn validate(config: &TaskConfig) -> Result<(), BackdateError> {
    if !config.offset_amount.is_finite() || config.offset_amount <= 0.0 {
        return Err(BackdateError::InvalidConfig {
            message: format!(
                "offset-amount must be a positive number, found {}",
                config.offset_amount
            ),
        });
    }
    if config.commit_message.trim().is_empty() {
        return Err(BackdateError::InvalidConfig {
            message: "commit-message must not be empty".to_string(),
        });
    }
    if config.pathspec.trim().is_empty() {
        return Err(BackdateError::InvalidConfig {
            message: "pathspec must not be empty".to_string(),
        });
    }
    Ok(())
}
