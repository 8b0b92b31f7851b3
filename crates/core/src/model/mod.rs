//! Options model: turns parsed entries into a typed options record.

/// Word splitting and case conversion.
pub mod case;
/// Coercion categories and value types.
pub mod coerce;
/// Scenario records extracted from a scenarios file.
pub mod scenario;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::grammar::ast::{OptionEntry, ParsedDocument};
use crate::grammar::parser::parse;
use case::camel_case;
use coerce::{OptionValue, ReserveType, SolverParam, coercion_for};

/// Options keyed by camelCase name (`--inputs-dir` → `inputsDir`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    values: BTreeMap<String, OptionValue>,
}

/// Key under which a scenario line stores its name.
pub const SCENARIO_NAME: &str = "scenarioName";
/// Key naming an alternative scenarios file.
pub const SCENARIO_LIST: &str = "scenarioList";

impl Options {
    /// Build a record from parsed entries. Later entries overwrite earlier
    /// ones with the same key.
    pub fn from_document(doc: &ParsedDocument) -> Self {
        let mut options = Self::default();
        for entry in &doc.entries {
            options.apply_entry(entry);
        }
        options
    }

    /// Coerce one entry and store it under its camelCase key.
    pub fn apply_entry(&mut self, entry: &OptionEntry) {
        let key = option_key(&entry.name);
        let value = coercion_for(&key).apply(&entry.texts());
        self.values.insert(key, value);
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// Whether `key` is present (with any value).
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Store a value directly.
    pub fn insert(&mut self, key: impl Into<String>, value: OptionValue) {
        self.values.insert(key.into(), value);
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.values.remove(key)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy every key of `other` over this record.
    pub fn overlay(&mut self, other: &Options) {
        for (k, v) in &other.values {
            self.values.insert(k.clone(), v.clone());
        }
    }

    /// Boolean flag value.
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric value.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            OptionValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text value.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            OptionValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// List value.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.get(key)? {
            OptionValue::List(l) => Some(l.as_slice()),
            _ => None,
        }
    }

    /// Parsed `--solver-options-string`.
    pub fn solver_options(&self) -> Option<&BTreeMap<String, SolverParam>> {
        match self.get("solverOptionsString")? {
            OptionValue::Solver(m) => Some(m),
            _ => None,
        }
    }

    /// Recognized reserve types of a reserve-type option; unknown values are
    /// skipped.
    pub fn reserve_types(&self, key: &str) -> Option<Vec<ReserveType>> {
        let list = self.list(key)?;
        Some(list.iter().filter_map(|v| v.parse().ok()).collect())
    }

    /// `--scenario-name`, when given with a value.
    pub fn scenario_name(&self) -> Option<&str> {
        self.text(SCENARIO_NAME)
    }

    /// `--scenario-list`, when given with a value.
    pub fn scenario_list(&self) -> Option<&str> {
        self.text(SCENARIO_LIST)
    }
}

/// `--inputs-dir` → `inputsDir`.
pub fn option_key(name: &str) -> String {
    camel_case(name.strip_prefix("--").unwrap_or(name))
}

/// `inputsDir` → `--inputs-dir`.
pub fn option_name(key: &str) -> String {
    format!("--{}", case::kebab_case(key))
}

/// Parse an `options.txt` document into an options record.
pub fn to_options(text: &str) -> Options {
    Options::from_document(&parse(text))
}

/// Split `text` on `\n`, yielding each line with its index and absolute
/// byte offset. A trailing `\r` stays part of its line.
pub(crate) fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, usize, &str)> {
    let mut offset = 0;
    text.split('\n').enumerate().map(move |(idx, line)| {
        let start = offset;
        offset += line.len() + 1;
        (idx, start, line)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_and_name_conversion() {
        assert_eq!(option_key("--scenario-name"), "scenarioName");
        assert_eq!(option_name("scenarioName"), "--scenario-name");
        assert_eq!(option_key("--"), "");
    }

    #[test]
    fn overlay_replaces_keys() {
        let mut base = to_options("--solver glpk --verbose");
        base.overlay(&to_options("--solver cplex"));
        assert_eq!(base.text("solver"), Some("cplex"));
        assert_eq!(base.flag("verbose"), Some(true));
    }

    #[test]
    fn line_offsets_account_for_separators() {
        let lines: Vec<_> = lines_with_offsets("ab\r\ncd\n").collect();
        assert_eq!(lines, vec![(0, 0, "ab\r"), (1, 4, "cd"), (2, 7, "")]);
    }
}
