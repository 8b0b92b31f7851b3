//! Typed error types for the options store.

use std::io;
use std::path::PathBuf;

/// File-system and configuration failures.
///
/// Malformed file *content* is never an error; only I/O at the file
/// boundary is. A missing options or scenarios file is reported as `Ok(None)`
/// by the store, not through this type.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A file exists but could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        /// The file that was read.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Writing an edited file failed.
    #[error("failed to write {}", path.display())]
    Write {
        /// The file that was written.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// A workspace configuration file could not be parsed.
    #[error("invalid workspace config {}", path.display())]
    Config {
        /// The configuration file.
        path: PathBuf,
        /// The JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// The file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            StoreError::Read { path, .. }
            | StoreError::Write { path, .. }
            | StoreError::Config { path, .. } => path,
        }
    }
}
