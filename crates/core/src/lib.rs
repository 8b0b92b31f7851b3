//! Switch options core library.
//!
//! Reads and edits the option-flag language of `options.txt` and
//! `scenarios.txt`. The main entry points are [`parse`] for entries with
//! source offsets, [`to_options`] / [`to_scenarios`] for typed records,
//! [`set_option`] / [`set_scenario_option`] for format-preserving edits, and
//! [`check`] for diagnostics.
//!
//! Every function here is a pure function of its input text.

#![warn(missing_docs)]

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Options grammar: lexer, parser, entry types, emitter.
pub mod grammar;
/// Diagnostics pass over options and scenarios files.
pub mod check;
/// Format-preserving edits.
pub mod edit;
/// Typed options record and scenario extraction.
pub mod model;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Parser
pub use grammar::parser::{ParseResult, parse, parse_with_diagnostics, parse_with_offset};

// Entries
pub use grammar::ast::{EntryValue, OptionEntry, ParsedDocument, Quote};

// Emitter
pub use grammar::emit::{emit_entry, escape_value};

// Model
pub use model::coerce::{Coercion, OptionValue, ReserveType, SolverParam, coercion_for};
pub use model::scenario::{Scenario, find_scenario, to_scenarios};
pub use model::{Options, SCENARIO_LIST, SCENARIO_NAME, option_key, option_name, to_options};

// Editor
pub use edit::{set_option, set_scenario_option};

// Diagnostics
pub use check::{CheckResult, check, check_scenarios};
pub use grammar::diag::{Diagnostic, Severity, Span, codes};

// Serialization helpers
pub use grammar::dump::{to_pretty_json, to_pretty_json_value};
