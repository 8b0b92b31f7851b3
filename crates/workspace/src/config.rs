//! Configuration for locating the files of a model directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Where the options and scenarios files live.
///
/// Every field has a default, so a JSON config only needs the fields it
/// changes:
///
/// ```json
/// { "root": "models/oahu", "default_scenarios_file": "scenarios_2045.txt" }
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Model directory. Relative file names resolve against it.
    pub root: PathBuf,
    /// Name of the base options file.
    pub options_file: String,
    /// Scenarios file used when the options do not set `--scenario-list`.
    pub default_scenarios_file: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            options_file: "options.txt".into(),
            default_scenarios_file: "scenarios.txt".into(),
        }
    }
}

impl WorkspaceConfig {
    /// Default file names rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| StoreError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Absolute (or root-relative) path of the options file.
    pub fn options_path(&self) -> PathBuf {
        self.resolve(&self.options_file)
    }

    /// Resolve a file name against the model directory. Absolute paths are
    /// returned unchanged.
    pub fn resolve(&self, file: impl AsRef<Path>) -> PathBuf {
        self.root.join(file)
    }
}
