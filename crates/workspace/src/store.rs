//! Cached access to the options and scenarios files of one model directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

use switch_options_core::{Options, Scenario, find_scenario, set_option, set_scenario_option};
use switch_options_core::{SCENARIO_LIST, to_options, to_scenarios};
use tracing::{debug, info};

use crate::config::WorkspaceConfig;
use crate::error::StoreError;

/// Reads, caches, and edits `options.txt` and the active scenarios file.
///
/// Every operation holds one lock for its whole read-modify-write cycle, so
/// concurrent callers never interleave edits to the same file.
#[derive(Debug)]
pub struct OptionsStore {
    config: WorkspaceConfig,
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    options: Option<Options>,
    scenarios: Option<Vec<Scenario>>,
    selected: Option<String>,
    /// Options file as last read or written.
    options_stamp: Option<FileStamp>,
    /// Scenarios file as last read or written.
    scenarios_stamp: Option<FileStamp>,
}

impl State {
    fn invalidate(&mut self) {
        self.options = None;
        self.scenarios = None;
        self.options_stamp = None;
        self.scenarios_stamp = None;
    }
}

/// A backing file and its modification time when the store last saw it.
/// `modified` is `None` when the file did not exist.
#[derive(Debug, Clone, PartialEq)]
struct FileStamp {
    path: PathBuf,
    modified: Option<SystemTime>,
}

impl FileStamp {
    fn take(path: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            path: path.to_path_buf(),
            modified: modified_time(path)?,
        })
    }

    fn is_stale(&self) -> Result<bool, StoreError> {
        Ok(modified_time(&self.path)? != self.modified)
    }
}

impl OptionsStore {
    /// Create a store over the files described by `config`. Nothing is read
    /// until the first call.
    pub fn new(config: WorkspaceConfig) -> Self {
        Self {
            config,
            state: Mutex::new(State::default()),
        }
    }

    /// The store's configuration.
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Cached state stays consistent even if a holder panicked.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Reading ─────────────────────────────────────────────────────────────

    /// The base options, or `None` when the options file does not exist.
    pub fn options(&self) -> Result<Option<Options>, StoreError> {
        let mut state = self.lock();
        self.load_options(&mut state)
    }

    /// Path of the active scenarios file: `--scenario-list` from the options,
    /// else the configured default.
    pub fn scenarios_path(&self) -> Result<PathBuf, StoreError> {
        let mut state = self.lock();
        self.current_scenarios_path(&mut state)
    }

    /// Scenarios of the active scenarios file, or `None` if it is missing.
    pub fn scenarios(&self) -> Result<Option<Vec<Scenario>>, StoreError> {
        let mut state = self.lock();
        let path = self.current_scenarios_path(&mut state)?;
        self.load_scenarios(&mut state, &path)
    }

    /// Scenarios of the file at `path` (resolved against the model
    /// directory). The result replaces the cached scenario list.
    pub fn scenarios_at(&self, path: impl AsRef<Path>) -> Result<Option<Vec<Scenario>>, StoreError> {
        let mut state = self.lock();
        let path = self.config.resolve(path);
        self.load_scenarios(&mut state, &path)
    }

    /// Select the scenario whose options overlay the base options, or clear
    /// the selection. Cached files are dropped either way.
    pub fn select_scenario(&self, name: Option<String>) {
        let mut state = self.lock();
        debug!(scenario = ?name, "selecting scenario");
        state.selected = name;
        state.invalidate();
    }

    /// The selected scenario name.
    pub fn selected_scenario(&self) -> Option<String> {
        self.lock().selected.clone()
    }

    /// A scenario from the cached scenario list. Does not read any file.
    pub fn scenario_options(&self, name: &str) -> Option<Scenario> {
        let state = self.lock();
        find_scenario(state.scenarios.as_deref()?, name).cloned()
    }

    /// Base options overlaid with the selected scenario's options. Missing
    /// files contribute nothing.
    pub fn full_options(&self) -> Result<Options, StoreError> {
        let mut state = self.lock();
        let mut options = self.load_options(&mut state)?.unwrap_or_default();
        if let Some(scenario) = self.current_scenario(&mut state)? {
            options.overlay(&scenario.options);
        }
        Ok(options)
    }

    // ── Writing ─────────────────────────────────────────────────────────────

    /// Set (`Some`) or delete (`None`) an option in the options file,
    /// creating the file if needed.
    pub fn set_option(&self, key: &str, params: Option<&[&str]>) -> Result<(), StoreError> {
        let mut state = self.lock();
        self.write_option(&mut state, key, params)
    }

    /// Set or delete an option on the selected scenario's line. Does nothing
    /// without a selection or a scenarios file.
    pub fn set_scenario_option(&self, key: &str, params: Option<&[&str]>) -> Result<(), StoreError> {
        let mut state = self.lock();
        self.write_scenario_option(&mut state, key, params)
    }

    /// Edit the selected scenario if it already sets `key`, else the base
    /// options.
    pub fn set_mixed_option(&self, key: &str, params: Option<&[&str]>) -> Result<(), StoreError> {
        let mut state = self.lock();
        let in_scenario = self
            .current_scenario(&mut state)?
            .is_some_and(|s| s.options.contains_key(key));
        if in_scenario {
            self.write_scenario_option(&mut state, key, params)
        } else {
            self.write_option(&mut state, key, params)
        }
    }

    /// Point `--scenario-list` at `path` (an empty path removes it) and load
    /// the scenarios found there.
    pub fn set_scenarios(&self, path: &str) -> Result<Option<Vec<Scenario>>, StoreError> {
        let mut state = self.lock();
        let params = [path];
        let value = (!path.is_empty()).then_some(&params[..]);
        self.write_option(&mut state, SCENARIO_LIST, value)?;
        let file = if path.is_empty() {
            self.config.default_scenarios_file.as_str()
        } else {
            path
        };
        let resolved = self.config.resolve(file);
        self.load_scenarios(&mut state, &resolved)
    }

    // ── Cache control ───────────────────────────────────────────────────────

    /// Drop all cached file contents.
    pub fn invalidate(&self) {
        debug!("invalidating options cache");
        self.lock().invalidate();
    }

    /// Drop the caches if a backing file's modification time differs from
    /// the one seen when the store last read or wrote it. A file that
    /// appeared or disappeared counts as changed. Returns whether it did.
    pub fn refresh(&self) -> Result<bool, StoreError> {
        let mut state = self.lock();
        let mut changed = false;
        for stamp in [&state.options_stamp, &state.scenarios_stamp].into_iter().flatten() {
            if stamp.is_stale()? {
                debug!(path = %stamp.path.display(), "file changed on disk");
                changed = true;
            }
        }
        if changed {
            info!("options changed on disk, reloading");
            state.invalidate();
        }
        Ok(changed)
    }

    // ── Internals (lock held) ───────────────────────────────────────────────

    fn load_options(&self, state: &mut State) -> Result<Option<Options>, StoreError> {
        if let Some(options) = &state.options {
            return Ok(Some(options.clone()));
        }
        let path = self.config.options_path();
        let stamp = FileStamp::take(&path)?;
        let text = read_optional(&path)?;
        state.options_stamp = Some(stamp);
        let Some(text) = text else {
            debug!(path = %path.display(), "options file not found");
            return Ok(None);
        };
        let options = to_options(&text);
        debug!(path = %path.display(), count = options.len(), "loaded options");
        state.options = Some(options.clone());
        Ok(Some(options))
    }

    fn load_scenarios(&self, state: &mut State, path: &Path) -> Result<Option<Vec<Scenario>>, StoreError> {
        let stamp = FileStamp::take(path)?;
        let text = read_optional(path)?;
        state.scenarios_stamp = Some(stamp);
        let Some(text) = text else {
            debug!(path = %path.display(), "scenarios file not found");
            return Ok(None);
        };
        let scenarios = to_scenarios(&text);
        debug!(path = %path.display(), count = scenarios.len(), "loaded scenarios");
        state.scenarios = Some(scenarios.clone());
        Ok(Some(scenarios))
    }

    /// Scenarios file name from the cached options, else the default.
    fn scenarios_file<'a>(&'a self, state: &'a State) -> &'a str {
        state
            .options
            .as_ref()
            .and_then(Options::scenario_list)
            .unwrap_or(self.config.default_scenarios_file.as_str())
    }

    fn current_scenarios_path(&self, state: &mut State) -> Result<PathBuf, StoreError> {
        self.load_options(state)?;
        Ok(self.config.resolve(self.scenarios_file(state)))
    }

    fn current_scenario(&self, state: &mut State) -> Result<Option<Scenario>, StoreError> {
        let Some(selected) = state.selected.clone() else {
            return Ok(None);
        };
        if state.scenarios.is_none() {
            let path = self.current_scenarios_path(state)?;
            self.load_scenarios(state, &path)?;
        }
        Ok(state
            .scenarios
            .as_deref()
            .and_then(|all| find_scenario(all, &selected))
            .cloned())
    }

    fn write_option(&self, state: &mut State, key: &str, params: Option<&[&str]>) -> Result<(), StoreError> {
        let path = self.config.options_path();
        let content = read_optional(&path)?.unwrap_or_default();
        let updated = set_option(&content, key, params);
        state.options = None;
        write_file(&path, &updated)?;
        info!(path = %path.display(), option = key, removed = params.is_none(), "updated option");
        state.options_stamp = Some(FileStamp::take(&path)?);
        Ok(())
    }

    fn write_scenario_option(
        &self,
        state: &mut State,
        key: &str,
        params: Option<&[&str]>,
    ) -> Result<(), StoreError> {
        let Some(selected) = state.selected.clone() else {
            debug!(option = key, "no scenario selected, nothing edited");
            return Ok(());
        };
        let path = self.current_scenarios_path(state)?;
        let Some(content) = read_optional(&path)? else {
            debug!(path = %path.display(), "scenarios file not found, nothing edited");
            return Ok(());
        };
        let updated = set_scenario_option(&content, &selected, key, params);
        state.scenarios = None;
        write_file(&path, &updated)?;
        info!(path = %path.display(), scenario = %selected, option = key, "updated scenario option");
        state.scenarios_stamp = Some(FileStamp::take(&path)?);
        Ok(())
    }
}

/// Read a file, mapping "not found" to `None`.
fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Modification time of `path`, or `None` when it does not exist.
fn modified_time(path: &Path) -> Result<Option<SystemTime>, StoreError> {
    match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(mtime) => Ok(Some(mtime)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), StoreError> {
    fs::write(path, content).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
