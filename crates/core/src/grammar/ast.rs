use serde::{Deserialize, Serialize};
use switch_options_diagnostics::Span;

/// The result of parsing one text buffer (a whole `options.txt`, or one line
/// of a scenarios file).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ParsedDocument {
    /// Option entries in source order.
    pub entries: Vec<OptionEntry>,
}

impl ParsedDocument {
    /// The first entry with exactly this name (leading `--` included).
    pub fn find(&self, name: &str) -> Option<&OptionEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Whether the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One parsed `--name value...` unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionEntry {
    /// Option name exactly as written, including the leading `--`.
    pub name: String,
    /// Values following the name, in order. Empty for flags.
    pub values: Vec<EntryValue>,
    /// Byte offset of the name's first character.
    pub start: usize,
    /// Byte offset one past the last value (or the name, for flags).
    pub end: usize,
}

impl OptionEntry {
    /// Source span of the whole entry.
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// The first value's text, if any.
    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(|v| v.text.as_str())
    }

    /// All value texts, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.values.iter().map(|v| v.text.as_str()).collect()
    }
}

/// A single value of an [`OptionEntry`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryValue {
    /// Value text with surrounding quotes removed.
    pub text: String,
    /// How the value was quoted in the source.
    pub quote: Quote,
}

/// Quoting style of a value as it appeared in the source.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Quote {
    /// Bare value.
    #[default]
    None,
    /// `'...'`
    Single,
    /// `"..."`
    Double,
}
