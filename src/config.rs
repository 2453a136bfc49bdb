use std::{fs, io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::error::ExtractError;

pub const EXCLUSION_FILE_NAME: &str = "excluded.json";

/// Literals and patterns that must never be reported as translatable.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionConfig {
    #[serde(default)]
    pub excluded_strings: Vec<String>,
    #[serde(default)]
    pub excluded_regexps: Vec<String>,
}

/// Result of loading the exclusion config.
pub struct ExclusionLoadResult {
    pub config: ExclusionConfig,
    /// False if the file does not exist and defaults were used.
    pub from_file: bool,
}

impl ExclusionConfig {
    /// Load the exclusion config at `path`.
    ///
    /// A missing file yields the empty config. A file that cannot be read or
    /// parsed is a `ConfigMalformed` error.
    pub fn load(path: &Path) -> Result<ExclusionLoadResult, ExtractError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(ExclusionLoadResult {
                    config: Self::default(),
                    from_file: false,
                });
            }
            Err(e) => {
                return Err(ExtractError::ConfigMalformed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        };

        let config = serde_json::from_str(&content).map_err(|e| ExtractError::ConfigMalformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(ExclusionLoadResult {
            config,
            from_file: true,
        })
    }
}

pub fn default_exclusion_json() -> Result<String> {
    let config = ExclusionConfig::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default exclusion config.")
}
