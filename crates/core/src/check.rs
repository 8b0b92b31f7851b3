//! Diagnostics pass over options and scenarios files.
//!
//! Checking never changes what the parser or model produce; it only reports
//! what they silently recovered from.

use std::collections::HashMap;

use serde::Serialize;

use crate::grammar::ast::ParsedDocument;
use crate::grammar::diag::{Diagnostic, LineIndex, Severity, Span, codes};
use crate::grammar::parser::parse_with_diagnostics;
use crate::model::coerce::{Coercion, ReserveType, SolverParam, coercion_for, js_number, parse_solver_options};
use crate::model::{Options, SCENARIO_NAME, lines_with_offsets, option_key};

/// Result of checking a document.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// `true` if no errors were found (warnings and info are allowed).
    pub ok: bool,
    /// All diagnostics, ordered by position.
    pub issues: Vec<Diagnostic>,
}

impl CheckResult {
    fn new(mut issues: Vec<Diagnostic>) -> Self {
        issues.sort_by_key(|d| d.span.map_or(usize::MAX, |s| s.start));
        let ok = !issues.iter().any(|d| d.severity == Severity::Error);
        Self { ok, issues }
    }
}

/// Check an `options.txt` document.
pub fn check(text: &str) -> CheckResult {
    let lines = LineIndex::new(text);
    let res = parse_with_diagnostics(text, 0);
    let mut issues = res.diagnostics;
    check_entries(&res.document, &lines, &mut issues);
    if res.document.is_empty() {
        issues.push(Diagnostic::info(
            codes::NO_OPTIONS,
            "no options found",
            Some(Span::new(0, text.len())),
        ));
    }
    CheckResult::new(issues)
}

/// Check a scenarios file line by line.
pub fn check_scenarios(text: &str) -> CheckResult {
    let lines = LineIndex::new(text);
    let mut issues = Vec::new();
    let mut first_line_of: HashMap<String, usize> = HashMap::new();
    let mut any_entries = false;

    for (idx, offset, line) in lines_with_offsets(text) {
        let res = parse_with_diagnostics(line, offset);
        issues.extend(res.diagnostics);
        if res.document.is_empty() {
            continue;
        }
        any_entries = true;
        check_entries(&res.document, &lines, &mut issues);

        let line_span = Span::new(offset, offset + line.trim_end().len());
        let options = Options::from_document(&res.document);
        if !options.contains_key(SCENARIO_NAME) {
            issues.push(Diagnostic::info(
                codes::MISSING_SCENARIO_NAME,
                "line has options but no --scenario-name; it is ignored",
                Some(line_span),
            ));
            continue;
        }
        let Some(name) = options.scenario_name() else {
            continue;
        };
        if let Some(&first) = first_line_of.get(name) {
            issues.push(
                Diagnostic::warn(
                    codes::DUPLICATE_SCENARIO,
                    format!("scenario '{name}' is already defined on line {}", first + 1),
                    Some(line_span),
                )
                .with_context(ctx!("scenario" => name, "first_line" => (first + 1).to_string())),
            );
        } else {
            first_line_of.insert(name.to_owned(), idx);
        }
    }

    if !any_entries {
        issues.push(Diagnostic::info(
            codes::NO_OPTIONS,
            "no scenarios found",
            Some(Span::new(0, text.len())),
        ));
    }
    CheckResult::new(issues)
}

/// Per-entry checks shared by both file kinds.
fn check_entries(doc: &ParsedDocument, lines: &LineIndex, issues: &mut Vec<Diagnostic>) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for entry in &doc.entries {
        if let Some(&first_start) = seen.get(entry.name.as_str()) {
            let line = lines.line(first_start);
            issues.push(
                Diagnostic::info(
                    codes::DUPLICATE_OPTION,
                    format!("{} is given more than once; the last value wins", entry.name),
                    Some(entry.span()),
                )
                .with_context(ctx!(
                    "option" => entry.name.as_str(),
                    "first_line" => (line + 1).to_string(),
                )),
            );
        } else {
            seen.insert(&entry.name, entry.start);
        }

        let key = option_key(&entry.name);
        match coercion_for(&key) {
            Coercion::ReserveTypes => {
                for value in &entry.values {
                    if value.text.parse::<ReserveType>().is_err() {
                        issues.push(
                            Diagnostic::warn(
                                codes::UNKNOWN_RESERVE_TYPE,
                                format!(
                                    "unknown reserve type '{}' (expected regulation or contingency)",
                                    value.text
                                ),
                                Some(entry.span()),
                            )
                            .with_context(ctx!("option" => key.as_str(), "value" => value.text.as_str())),
                        );
                    }
                }
            }
            Coercion::Number => {
                let raw = entry.first_value();
                if !raw.map_or(f64::NAN, js_number).is_finite() {
                    issues.push(
                        Diagnostic::error(
                            codes::NOT_A_NUMBER,
                            format!("{} expects a number", entry.name),
                            Some(entry.span()),
                        )
                        .with_context(ctx!("option" => key.as_str(), "value" => raw.unwrap_or_default())),
                    );
                }
            }
            Coercion::SolverOptions => {
                for (param, value) in parse_solver_options(&entry.texts()) {
                    if let SolverParam::Number(n) = value
                        && !n.is_finite()
                    {
                        issues.push(
                            Diagnostic::warn(
                                codes::NOT_A_NUMBER,
                                format!("solver parameter '{param}' expects a number"),
                                Some(entry.span()),
                            )
                            .with_context(ctx!("option" => key.as_str(), "parameter" => param)),
                        );
                    }
                }
            }
            Coercion::TrueFlag | Coercion::FalseFlag | Coercion::StringList | Coercion::Text => {}
        }
    }
}
