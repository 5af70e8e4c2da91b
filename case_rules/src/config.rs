//! Session configuration, read from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::content::{read_file, ContentError};
use crate::scoring::ScoringRules;

/// Top-level configuration file.
///
/// ```toml
/// content_dir = "cases/tin-soldier"
///
/// [scoring]
/// free_leads = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseConfig {
    /// Directory holding `locations.json` and `caseIntro.json`.
    pub content_dir: PathBuf,

    pub scoring: ScoringRules,
}

impl Default for CaseConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("case"),
            scoring: ScoringRules::default(),
        }
    }
}

impl CaseConfig {
    pub fn from_toml_str(toml: &str) -> Result<Self, ContentError> {
        Ok(toml::from_str(toml)?)
    }

    /// Load a config file. Relative `content_dir` paths resolve against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let mut config = Self::from_toml_str(&read_file(path)?)?;

        if config.content_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.content_dir = parent.join(&config.content_dir);
            }
        }

        Ok(config)
    }
}
