//! Diagnostics for Switch options files.
//!
//! A [`Diagnostic`] reports something the parser or options model recovered
//! from while reading `options.txt` or `scenarios.txt`. Codes live in
//! [`codes`]; [`explain`] turns a code into prose.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

// ── LineIndex ────────────────────────────────────────────────────────────

/// Line lookup for byte offsets of one source text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Offset just past each `\n`, preceded by 0.
    starts: Vec<usize>,
}

impl LineIndex {
    /// Index the line breaks of `text`.
    pub fn new(text: &str) -> Self {
        let breaks = text.match_indices('\n').map(|(i, _)| i + 1);
        Self {
            starts: std::iter::once(0).chain(breaks).collect(),
        }
    }

    /// 0-based line holding byte `offset`. Offsets past the end map to the
    /// last line.
    pub fn line(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset) - 1
    }
}

// ── Severity / Span ──────────────────────────────────────────────────────

/// How serious a diagnostic is. Only errors make a check fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// The file cannot be used as written.
    Error,
    /// Read, but probably not what was meant.
    Warn,
    /// Worth knowing; nothing is wrong.
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
        })
    }
}

/// Half-open byte range `[start, end)` in the checked text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// First byte.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
}

impl Span {
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }
}

// ── Diagnostic ───────────────────────────────────────────────────────────

/// One reported finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Code from [`codes`], e.g. `"SWO1001"`.
    pub id: Cow<'static, str>,
    /// How serious the finding is.
    pub severity: Severity,
    /// One-line description.
    pub message: String,
    /// Where in the text the finding applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Details such as `option` or `value`, keyed in sorted order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    fn with_severity(
        severity: Severity,
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// An [`Severity::Error`] diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::with_severity(Severity::Error, id, message, span)
    }

    /// A [`Severity::Warn`] diagnostic.
    pub fn warn(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::with_severity(Severity::Warn, id, message, span)
    }

    /// An [`Severity::Info`] diagnostic.
    pub fn info(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::with_severity(Severity::Info, id, message, span)
    }

    /// Replace the context map.
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Explanation of this diagnostic's code.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

/// Explanation of a diagnostic code, or `None` for an unknown code.
pub fn explain(id: &str) -> Option<&'static str> {
    codes::explanation(id)
}
