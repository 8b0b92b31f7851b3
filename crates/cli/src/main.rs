//! `switch-opts`: command-line access to Switch options and scenarios files.

mod render;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use switch_options_core::{
    check, check_scenarios, find_scenario, parse_with_diagnostics, set_option,
    set_scenario_option, to_options, to_pretty_json, to_pretty_json_value, to_scenarios,
};
use switch_options_diagnostics::{self as diag, Diagnostic, Severity};
use switch_options_workspace::{OptionsStore, WorkspaceConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::render::{Format, print_summary, render_diagnostics};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "switch-opts",
    version,
    about = "Inspect, check, and edit Switch options.txt and scenarios.txt files"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log filter, e.g. "debug" or "switch_options_core=trace". Overrides
    /// RUST_LOG. Logs go to stderr.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── Reading ─────────────────────────────────────────────────────
    /// Parse a file and print its option entries with byte offsets.
    Parse {
        file: String,
        /// Add this to every reported offset.
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },

    /// Print the typed options record of an options file.
    Options { file: String },

    /// Print the scenarios of a scenarios file.
    Scenarios { file: String },

    /// Report problems the parser and model silently recover from.
    Check {
        file: String,
        /// Check the file as a scenarios file (one scenario per line).
        #[arg(long)]
        scenarios: bool,
    },

    // ── Editing ─────────────────────────────────────────────────────
    /// Set, replace, or delete one option, preserving everything else.
    Set {
        file: String,
        /// camelCase option key, e.g. inputsDir.
        key: String,
        /// New values. None writes a bare flag.
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,
        /// Remove the option instead of setting it.
        #[arg(long, conflicts_with = "values")]
        delete: bool,
        /// Edit this scenario's line of a scenarios file.
        #[arg(long)]
        scenario: Option<String>,
        /// Write the result back to the file instead of printing it.
        #[arg(long, short)]
        write: bool,
    },

    // ── Model directory ─────────────────────────────────────────────
    /// Print the merged options of a model directory: options.txt overlaid
    /// with the selected scenario.
    Show {
        /// Model directory (overrides the config file).
        #[arg(long)]
        root: Option<PathBuf>,
        /// Workspace config JSON.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Scenario to overlay.
        #[arg(long)]
        scenario: Option<String>,
    },

    /// Explain a diagnostic ID (e.g. SWO1003).
    Explain { id: String },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Parse { file, offset } => cmd_parse(&file, offset, format)?,
        Cmd::Options { file } => cmd_options(&file)?,
        Cmd::Scenarios { file } => cmd_scenarios(&file, format)?,
        Cmd::Check { file, scenarios } => cmd_check(&file, scenarios, format)?,
        Cmd::Set {
            file,
            key,
            values,
            delete,
            scenario,
            write,
        } => {
            let values: Vec<&str> = values.iter().map(String::as_str).collect();
            let params = (!delete).then_some(values.as_slice());
            cmd_set(&file, &key, params, scenario.as_deref(), write, format)?
        }
        Cmd::Show {
            root,
            config,
            scenario,
        } => cmd_show(root, config.as_deref(), scenario, format)?,
        Cmd::Explain { id } => cmd_explain(&id, format)?,
    }

    Ok(())
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_parse(file: &str, offset: usize, format: Format) -> Result<()> {
    let input = read_file(file)?;
    let res = parse_with_diagnostics(&input, offset);

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "document": res.document,
                "diagnostics": res.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            println!("{}", to_pretty_json(&res.document));
            // Shifted spans do not point into this file.
            if offset == 0 && !res.diagnostics.is_empty() {
                render_diagnostics(&input, file, &res.diagnostics, format)?;
                print_summary(&res.diagnostics);
            }
        }
    }
    Ok(())
}

fn cmd_options(file: &str) -> Result<()> {
    let input = read_file(file)?;
    println!("{}", to_pretty_json_value(&to_options(&input)));
    Ok(())
}

fn cmd_scenarios(file: &str, format: Format) -> Result<()> {
    let input = read_file(file)?;
    let scenarios = to_scenarios(&input);
    match format {
        Format::Json => println!("{}", to_pretty_json_value(&scenarios)),
        Format::Pretty => {
            for scenario in &scenarios {
                println!(
                    "{} (line {}, {} options)",
                    scenario.name().unwrap_or("<unnamed>"),
                    scenario.line + 1,
                    scenario.options.len()
                );
            }
            eprintln!("{} scenarios", scenarios.len());
        }
    }
    Ok(())
}

fn cmd_check(file: &str, scenarios: bool, format: Format) -> Result<()> {
    let input = read_file(file)?;
    let res = if scenarios {
        check_scenarios(&input)
    } else {
        check(&input)
    };

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": res.ok,
                "issues": res.issues,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            render_diagnostics(&input, file, &res.issues, format)?;
            print_summary(&res.issues);
            if res.ok {
                eprintln!("check ok");
            }
        }
    }

    exit_on_errors(&res.issues);
    Ok(())
}

fn cmd_set(
    file: &str,
    key: &str,
    params: Option<&[&str]>,
    scenario: Option<&str>,
    write: bool,
    format: Format,
) -> Result<()> {
    let input = read_file(file)?;
    let updated = match scenario {
        Some(name) => {
            if find_scenario(&to_scenarios(&input), name).is_none() {
                bail!("no scenario named '{name}' in {file}");
            }
            set_scenario_option(&input, name, key, params)
        }
        None => set_option(&input, key, params),
    };

    if !write {
        print!("{updated}");
        return Ok(());
    }
    let changed = updated != input;
    if changed {
        fs::write(file, &updated).with_context(|| format!("failed to write {file}"))?;
    }
    debug!(file, key, changed, "set option");
    status_message(format, changed, "updated", "unchanged", file)
}

fn cmd_show(
    root: Option<PathBuf>,
    config_path: Option<&Path>,
    scenario: Option<String>,
    format: Format,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => WorkspaceConfig::from_json_file(path)?,
        None => WorkspaceConfig::default(),
    };
    if let Some(root) = root {
        config.root = root;
    }
    let store = OptionsStore::new(config);

    if let Some(name) = &scenario {
        let scenarios = store.scenarios()?.unwrap_or_default();
        if find_scenario(&scenarios, name).is_none() {
            bail!(
                "no scenario named '{name}' in {}",
                store.scenarios_path()?.display()
            );
        }
    }
    store.select_scenario(scenario);
    let options = store.full_options()?;

    if format == Format::Pretty && options.is_empty() {
        eprintln!("no options found under {}", store.config().root.display());
    }
    println!("{}", to_pretty_json_value(&options));
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // The explanation is the command's output, so it goes to stdout.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn read_file(file: &str) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
}

/// Emit a status message for `--write` in the appropriate format.
fn status_message(format: Format, condition: bool, if_true: &str, if_false: &str, file: &str) -> Result<()> {
    let msg = if condition { if_true } else { if_false };
    match format {
        Format::Json => {
            let out = serde_json::json!({ "status": msg, "file": file });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => eprintln!("{msg}: {file}"),
    }
    Ok(())
}

/// Exit with code 1 if any diagnostic is an error.
/// Warnings and info do not cause a non-zero exit.
fn exit_on_errors(diagnostics: &[Diagnostic]) {
    if diagnostics.iter().any(|d| d.severity == Severity::Error) {
        process::exit(1);
    }
}
