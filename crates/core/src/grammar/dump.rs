use serde::Serialize;

use super::ast::ParsedDocument;

/// Serialize a parsed document to a pretty-printed JSON string.
pub fn to_pretty_json(doc: &ParsedDocument) -> String {
    to_pretty_json_value(doc)
}

/// Serialize any engine value (options record, scenarios) to pretty JSON.
pub fn to_pretty_json_value<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).expect("engine values always serialize")
}
