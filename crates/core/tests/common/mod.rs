//! Shared test helpers for `switch_options_core` integration tests.

#![allow(unreachable_pub)]

use switch_options_core::ParsedDocument;

/// Read a file from `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
}

/// Entry names in order.
#[allow(dead_code)]
pub fn entry_names(doc: &ParsedDocument) -> Vec<&str> {
    doc.entries.iter().map(|e| e.name.as_str()).collect()
}

/// Value texts of the entry named `name`.
#[allow(dead_code)]
pub fn values_of<'a>(doc: &'a ParsedDocument, name: &str) -> Vec<&'a str> {
    doc.find(name)
        .unwrap_or_else(|| panic!("no entry named {name}"))
        .texts()
}

/// Assert structural invariants on any parsed document, regardless of input:
/// offsets in bounds, on char boundaries, ordered and disjoint, and each
/// entry's source text starting with its name.
#[allow(dead_code)]
pub fn assert_invariants(doc: &ParsedDocument, input: &str) {
    let mut prev_end = 0;
    for entry in &doc.entries {
        assert!(
            entry.start < entry.end,
            "empty entry span {}..{} in {input:?}",
            entry.start,
            entry.end
        );
        assert!(entry.end <= input.len(), "entry past end of input {input:?}");
        assert!(entry.start >= prev_end, "overlapping entries in {input:?}");
        assert!(input.is_char_boundary(entry.start) && input.is_char_boundary(entry.end));
        assert!(
            input[entry.start..entry.end].starts_with(&entry.name),
            "entry text does not start with its name in {input:?}"
        );
        prev_end = entry.end;
    }
}
