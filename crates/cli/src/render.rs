//! Diagnostic rendering.
//!
//! Pretty mode draws source-annotated reports with ariadne on stderr; JSON
//! mode prints one document on stdout so the output can be piped.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use switch_options_diagnostics::{Diagnostic, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Explicit choice, else pretty on a terminal and JSON on a pipe.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ if io::stdout().is_terminal() => Format::Pretty,
            _ => Format::Json,
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Info => ReportKind::Advice,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Blue,
        _ => Color::White,
    }
}

/// `key=value, ...` from a diagnostic's context, if it has any.
fn context_note(diag: &Diagnostic) -> Option<String> {
    let ctx = diag.context.as_ref().filter(|c| !c.is_empty())?;
    Some(
        ctx.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

// ── Pretty rendering ────────────────────────────────────────────────────

fn render_pretty(source: &str, filename: &str, diagnostics: &[Diagnostic]) {
    let config = Config::default().with_compact(false);
    let mut cache = (filename, Source::from(source));

    for diag in diagnostics {
        let Some(span) = diag.span else {
            eprintln!("{}[{}]: {}", diag.severity, diag.id, diag.message);
            if let Some(note) = context_note(diag) {
                eprintln!("  = note: {note}");
            }
            continue;
        };
        // Clamp to the source so a stale span cannot panic the renderer.
        let start = span.start.min(source.len());
        let end = span.end.min(source.len()).max(start);

        let mut report = Report::build(report_kind(diag.severity), (filename, start..end))
            .with_code(diag.id.as_ref())
            .with_message(&diag.message)
            .with_config(config)
            .with_label(
                Label::new((filename, start..end))
                    .with_message(context_note(diag).unwrap_or_else(|| diag.message.clone()))
                    .with_color(severity_color(diag.severity)),
            );
        if let Some(explanation) = diag.explain() {
            report = report.with_help(explanation);
        }
        report.finish().eprint(&mut cache).ok();
    }
}

/// Render diagnostics for `source` in the given format.
///
/// Pretty output goes to stderr; JSON is a bare array on stdout.
pub(crate) fn render_diagnostics(
    source: &str,
    filename: &str,
    diagnostics: &[Diagnostic],
    format: Format,
) -> anyhow::Result<()> {
    match format {
        Format::Pretty => render_pretty(source, filename, diagnostics),
        Format::Json => println!("{}", serde_json::to_string_pretty(diagnostics)?),
    }
    Ok(())
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured `1 error, 2 warnings, 1 info` line to stderr. Prints
/// nothing when there are no diagnostics.
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    let count = |s: Severity| diagnostics.iter().filter(|d| d.severity == s).count();
    let (errors, warnings, infos) = (
        count(Severity::Error),
        count(Severity::Warn),
        count(Severity::Info),
    );
    let plural = |n: usize| if n == 1 { "" } else { "s" };

    let mut parts = Vec::new();
    if errors > 0 {
        parts.push(format!("{errors} error{}", plural(errors)).fg(Color::Red).to_string());
    }
    if warnings > 0 {
        parts.push(
            format!("{warnings} warning{}", plural(warnings))
                .fg(Color::Yellow)
                .to_string(),
        );
    }
    if infos > 0 {
        parts.push(format!("{infos} info").fg(Color::Blue).to_string());
    }
    if !parts.is_empty() {
        eprintln!("{}", parts.join(", "));
    }
}
