//! Model-directory access for Switch options.
//!
//! [`OptionsStore`] wraps the pure functions of `switch_options_core` with
//! file I/O: it reads and caches `options.txt` and the active scenarios file,
//! tracks a selected scenario, merges its options over the base options, and
//! writes single-option edits back to disk.
//!
//! ```no_run
//! use switch_options_workspace::{OptionsStore, WorkspaceConfig};
//!
//! let store = OptionsStore::new(WorkspaceConfig::new("models/oahu"));
//! store.select_scenario(Some("high_dr".into()));
//! let merged = store.full_options()?;
//! store.set_mixed_option("solver", Some(&["cplex"][..]))?;
//! # let _ = merged;
//! # Ok::<(), switch_options_workspace::StoreError>(())
//! ```

#![warn(missing_docs)]

/// Workspace configuration.
pub mod config;
/// Error types.
pub mod error;
/// The cached options store.
pub mod store;

pub use config::WorkspaceConfig;
pub use error::StoreError;
pub use store::OptionsStore;
