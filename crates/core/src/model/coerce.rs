use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::case::squash_lower;

/// A coerced option value.
///
/// Serializes untagged, so a record renders as plain JSON
/// (`{"verbose": true, "solver": "gurobi"}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Presence flags.
    Bool(bool),
    /// Numeric options. `NaN` when the value does not convert.
    Number(f64),
    /// The first value of a default-category option.
    Text(String),
    /// All values of a list option.
    List(Vec<String>),
    /// Parsed `--solver-options-string`.
    Solver(BTreeMap<String, SolverParam>),
    /// A default-category option written without any value.
    Missing,
}

/// One `name=value` item of the solver options string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SolverParam {
    /// Every parameter except `primalopt`.
    Number(f64),
    /// `primalopt`.
    Text(String),
}

/// How the values of an option are turned into an [`OptionValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Presence sets `true`; values are ignored.
    TrueFlag,
    /// Presence sets `false`; values are ignored.
    FalseFlag,
    /// First value as a number.
    Number,
    /// `name=value` items parsed into a map.
    SolverOptions,
    /// All values, as strings.
    StringList,
    /// All values, expected to be `regulation` or `contingency`.
    ReserveTypes,
    /// First value as a string. Applies to every unlisted option.
    Text,
}

/// Option keys by category. The first table row containing a key decides
/// its category; keys not listed here are [`Coercion::Text`].
const COERCIONS: &[(Coercion, &[&str])] = &[
    (
        Coercion::TrueFlag,
        &["verbose", "streamSolver", "sortedOutput", "unitContingency"],
    ),
    (Coercion::FalseFlag, &["forceLngTier"]),
    (Coercion::Number, &["demandResponseShare"]),
    (Coercion::SolverOptions, &["solverOptionsString"]),
    (
        Coercion::StringList,
        &["moduleList", "includeModules", "excludeModules", "moduleSearchPath"],
    ),
    (
        Coercion::ReserveTypes,
        &[
            "contingencyReserveType",
            "regulatingReserveType",
            "demandResponseReserveTypes",
            "evReserveTypes",
        ],
    ),
];

/// Solver parameter kept as text; all others are numbers.
const TEXT_SOLVER_PARAM: &str = "primalopt";

/// Category of a camelCase option key.
pub fn coercion_for(key: &str) -> Coercion {
    COERCIONS
        .iter()
        .find(|(_, keys)| keys.contains(&key))
        .map_or(Coercion::Text, |&(c, _)| c)
}

impl Coercion {
    /// Coerce an entry's value texts.
    pub fn apply(self, values: &[&str]) -> OptionValue {
        match self {
            Coercion::TrueFlag => OptionValue::Bool(true),
            Coercion::FalseFlag => OptionValue::Bool(false),
            Coercion::Number => OptionValue::Number(values.first().map_or(f64::NAN, |v| js_number(v))),
            Coercion::SolverOptions => OptionValue::Solver(parse_solver_options(values)),
            Coercion::StringList | Coercion::ReserveTypes => {
                OptionValue::List(values.iter().map(|v| (*v).to_owned()).collect())
            }
            Coercion::Text => match values.first() {
                Some(v) => OptionValue::Text((*v).to_owned()),
                None => OptionValue::Missing,
            },
        }
    }
}

/// Parse solver option items such as `mipgap=0.01 threads=1`.
///
/// Each value may hold several whitespace-separated items. Apostrophes are
/// removed, names are normalized (`primalOpt` → `primalopt`), and only
/// `primalopt` keeps a text value.
pub fn parse_solver_options(values: &[&str]) -> BTreeMap<String, SolverParam> {
    let mut map = BTreeMap::new();
    for item in values.iter().flat_map(|v| v.split_whitespace()) {
        let item = item.replace('\'', "");
        let mut parts = item.split('=');
        let key = squash_lower(parts.next().unwrap_or_default());
        if key.is_empty() {
            continue;
        }
        let value = parts.next();
        let param = if key == TEXT_SOLVER_PARAM {
            SolverParam::Text(value.unwrap_or_default().to_owned())
        } else {
            SolverParam::Number(value.map_or(f64::NAN, js_number))
        };
        map.insert(key, param);
    }
    map
}

/// Convert text to a number the way the modeling tool's front end always has:
/// surrounding whitespace ignored, empty text is `0`, `0x`/`0o`/`0b` prefixes
/// and `Infinity` accepted, anything else that is not a decimal literal is
/// `NaN`.
pub fn js_number(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    let radix = match t.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => 10,
    };
    if radix != 10 {
        let digits = &t[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return digits.chars().fold(0.0, |acc, c| {
            acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
        });
    }
    let unsigned = t.strip_prefix(['+', '-']).unwrap_or(t);
    if unsigned == "Infinity" {
        return if t.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    // Rust also accepts `inf`/`nan`; reject anything that is not a plain
    // decimal literal.
    if !unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return f64::NAN;
    }
    t.parse().unwrap_or(f64::NAN)
}

/// Reserve product used by the reserve-type options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReserveType {
    /// `regulation`
    Regulation,
    /// `contingency`
    Contingency,
}

impl FromStr for ReserveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regulation" => Ok(ReserveType::Regulation),
            "contingency" => Ok(ReserveType::Contingency),
            other => Err(format!("unknown reserve type '{other}'")),
        }
    }
}

impl fmt::Display for ReserveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReserveType::Regulation => write!(f, "regulation"),
            ReserveType::Contingency => write!(f, "contingency"),
        }
    }
}
