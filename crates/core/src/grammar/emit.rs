//! Options emitter: renders option entries back to text.
//!
//! Values are emitted bare unless they contain a space or are empty, in which
//! case they are wrapped in double quotes. Single quotes are accepted by the
//! lexer but never produced here.

use std::borrow::Cow;

/// Escape a single option value for writing.
pub fn escape_value(value: &str) -> Cow<'_, str> {
    if value.contains(' ') || value.is_empty() {
        Cow::Owned(format!("\"{value}\""))
    } else {
        Cow::Borrowed(value)
    }
}

/// Render `name` followed by its escaped values, space-separated.
///
/// `name` is written as given and should already carry its `--` prefix.
pub fn emit_entry<S: AsRef<str>>(name: &str, values: &[S]) -> String {
    let mut out = String::from(name);
    for v in values {
        out.push(' ');
        out.push_str(&escape_value(v.as_ref()));
    }
    out
}
