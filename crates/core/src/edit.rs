//! In-place option editing.
//!
//! Edits touch only the span of the targeted entry (or the insertion point
//! for a new entry). Comments, ordering, and the formatting of every other
//! entry are left byte-for-byte intact.

use tracing::debug;

use crate::grammar::ast::ParsedDocument;
use crate::grammar::emit::emit_entry;
use crate::grammar::lexer::{TokKind, tokenize};
use crate::grammar::parser::{parse, parse_with_offset};
use crate::model::{Options, lines_with_offsets, option_name};

/// Where a new entry goes when the option is not present yet.
#[derive(Debug, Clone, Copy)]
enum Append {
    /// End of the whole document, on its own line.
    Document,
    /// After the given byte offset (end of a trimmed scenario line),
    /// separated by a space.
    Line(usize),
    /// At the given byte offset, in front of a trailing comment.
    BeforeComment(usize),
}

/// Set, replace, or delete one option in an `options.txt` document.
///
/// `key` is the camelCase option key (`inputsDir`). `params = None` deletes
/// the option; `Some(&[])` writes it as a bare flag. A new option is appended
/// at the end of the document on its own line.
pub fn set_option(content: &str, key: &str, params: Option<&[&str]>) -> String {
    let doc = parse(content);
    splice(content, &doc, key, params, Append::Document)
}

/// Set, replace, or delete one option on the line of scenario
/// `scenario_name`.
///
/// The line is matched by the name the line resolves to, so with repeated
/// `--scenario-name` entries the last one counts. A new option goes at the
/// end of the line, ahead of any trailing comment. Returns `content`
/// unchanged when no line defines that scenario.
pub fn set_scenario_option(
    content: &str,
    scenario_name: &str,
    key: &str,
    params: Option<&[&str]>,
) -> String {
    for (_, offset, line) in lines_with_offsets(content) {
        let doc = parse_with_offset(line, offset);
        if Options::from_document(&doc).scenario_name() != Some(scenario_name) {
            continue;
        }
        let comment = tokenize(line).into_iter().find(|t| t.kind == TokKind::Comment);
        let append = match comment {
            Some(c) => Append::BeforeComment(offset + line[..c.start].trim_end().len()),
            None => Append::Line(offset + line.trim_end().len()),
        };
        return splice(content, &doc, key, params, append);
    }
    debug!(scenario = scenario_name, option = key, "scenario not found, nothing edited");
    content.to_owned()
}

fn splice(
    content: &str,
    doc: &ParsedDocument,
    key: &str,
    params: Option<&[&str]>,
    append: Append,
) -> String {
    let name = option_name(key);
    let replacement = params.map(|p| emit_entry(&name, p)).unwrap_or_default();

    let (start, end, separator) = match doc.find(&name) {
        Some(entry) => {
            debug!(option = %name, start = entry.start, end = entry.end, removed = params.is_none(), "replacing entry");
            (entry.start, entry.end, "")
        }
        None if replacement.is_empty() => return content.to_owned(),
        None => {
            let (at, separator) = insertion_point(content, append);
            debug!(option = %name, at, "appending entry");
            (at, at, separator)
        }
    };

    let mut out = String::with_capacity(content.len() + separator.len() + replacement.len());
    out.push_str(&content[..start]);
    out.push_str(separator);
    out.push_str(&replacement);
    out.push_str(&content[end..]);
    out
}

/// Insertion offset and separator for a new entry.
fn insertion_point(content: &str, append: Append) -> (usize, &'static str) {
    match append {
        Append::Document => {
            let separator = if content.ends_with('\n') {
                ""
            } else if content.contains("\r\n") {
                "\r\n"
            } else {
                "\n"
            };
            (content.len(), separator)
        }
        // An existing space after the line's last entry is reused.
        Append::Line(at) => match content.as_bytes().get(at) {
            Some(b' ') => (at + 1, ""),
            _ => (at, " "),
        },
        Append::BeforeComment(at) => (at, " "),
    }
}
