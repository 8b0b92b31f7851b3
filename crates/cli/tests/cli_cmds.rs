//! CLI tests for the `switch-opts` subcommands.

use std::fs;
use std::process::{Command, Output};

use assert_cmd::cargo;

fn switch_opts() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("switch-opts"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write temp file");
    (dir, path.to_string_lossy().to_string())
}

fn run(args: &[&str]) -> Output {
    switch_opts().args(args).output().expect("run switch-opts")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid json ({e}): {stdout}"))
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected success, stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
}

// ─── parse / options / scenarios ─────────────────────────────────────────────

#[test]
fn parse_json_has_entries_and_offsets() {
    let (_dir, path) = write_temp("options.txt", "--verbose\n--solver gurobi\n");
    let output = run(&["parse", &path, "--output", "json"]);
    assert_success(&output);

    let json = stdout_json(&output);
    let entries = json["document"]["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["name"], "--solver");
    assert_eq!(entries[1]["start"], 10);
    assert_eq!(entries[1]["end"], 25);
    assert_eq!(json["diagnostics"].as_array().map(Vec::len), Some(0));
}

#[test]
fn parse_offset_shifts_positions() {
    let (_dir, path) = write_temp("line.txt", "--solver x");
    let output = run(&["parse", &path, "--offset", "100", "--output", "json"]);
    assert_success(&output);
    assert_eq!(stdout_json(&output)["document"]["entries"][0]["start"], 100);
}

#[test]
fn options_prints_typed_record() {
    let (_dir, path) = write_temp(
        "options.txt",
        "--verbose --solver gurobi\n--solver-options-string \"mipgap=0.01 threads=1\"\n",
    );
    let output = run(&["options", &path]);
    assert_success(&output);
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({
            "verbose": true,
            "solver": "gurobi",
            "solverOptionsString": { "mipgap": 0.01, "threads": 1.0 }
        })
    );
}

#[test]
fn scenarios_json_lists_named_lines() {
    let (_dir, path) = write_temp(
        "scenarios.txt",
        "--scenario-name a --verbose\n--solver x\n--scenario-name b\n",
    );
    let output = run(&["scenarios", &path, "--output", "json"]);
    assert_success(&output);
    let json = stdout_json(&output);
    let names: Vec<_> = json
        .as_array()
        .expect("array")
        .iter()
        .map(|s| s["scenarioName"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn missing_file_fails_with_context() {
    let output = run(&["options", "/definitely/not/here/options.txt"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"), "stderr={stderr}");
}

// ─── check ───────────────────────────────────────────────────────────────────

#[test]
fn check_json_reports_codes() {
    let (_dir, path) = write_temp(
        "options.txt",
        "--solver a\n--solver b\n--demand-response-share lots\n",
    );
    let output = run(&["check", &path, "--output", "json"]);
    assert_eq!(output.status.code(), Some(1));

    let json = stdout_json(&output);
    assert_eq!(json["ok"], false);
    let ids: Vec<_> = json["issues"]
        .as_array()
        .expect("issues")
        .iter()
        .map(|d| d["id"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(ids, vec!["SWO1003", "SWO2002"]);
}

#[test]
fn check_warnings_alone_exit_zero() {
    let (_dir, path) = write_temp(
        "options.txt",
        "--solver-options-string threads=many\n--ev-reserve-types spinning\n",
    );
    let output = run(&["check", &path, "--output", "json"]);
    assert_success(&output);
    assert_eq!(stdout_json(&output)["ok"], true);
}

#[test]
fn check_pretty_fails_on_a_bad_number() {
    let (_dir, path) = write_temp("options.txt", "--demand-response-share\n");
    let output = run(&["check", &path, "--output", "pretty"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SWO2002"), "stderr={stderr}");
    assert!(stderr.contains("1 error"), "stderr={stderr}");
    assert!(!stderr.contains("check ok"), "stderr={stderr}");
}

#[test]
fn check_scenarios_flags_duplicates() {
    let (_dir, path) = write_temp(
        "scenarios.txt",
        "--scenario-name a\n--scenario-name a --verbose\n",
    );
    let output = run(&["check", &path, "--scenarios", "--output", "json"]);
    assert_success(&output);
    assert_eq!(stdout_json(&output)["issues"][0]["id"], "SWO2005");
}

#[test]
fn check_pretty_renders_to_stderr() {
    let (_dir, path) = write_temp("options.txt", "stray --solver a\n");
    let output = run(&["check", &path, "--output", "pretty"]);
    assert_success(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SWO1002"), "stderr={stderr}");
    assert!(stderr.contains("1 warning"), "stderr={stderr}");
}

// ─── set ─────────────────────────────────────────────────────────────────────

#[test]
fn set_prints_edited_text() {
    let (_dir, path) = write_temp("options.txt", "--solver gurobi\n");
    let output = run(&["set", &path, "solver", "cplex"]);
    assert_success(&output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "--solver cplex\n");
    assert_eq!(fs::read_to_string(&path).unwrap(), "--solver gurobi\n");
}

#[test]
fn set_write_updates_file() {
    let (_dir, path) = write_temp("options.txt", "--solver gurobi\n");
    let output = run(&["set", &path, "inputsDir", "inputs/x", "--write", "--output", "json"]);
    assert_success(&output);
    assert_eq!(stdout_json(&output)["status"], "updated");
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "--solver gurobi\n--inputs-dir inputs/x"
    );
}

#[test]
fn set_delete_and_negative_numbers() {
    let (_dir, path) = write_temp("options.txt", "--verbose\n--demand-response-share 0.1\n");
    let output = run(&["set", &path, "verbose", "--delete"]);
    assert_success(&output);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "\n--demand-response-share 0.1\n"
    );

    let output = run(&["set", &path, "demandResponseShare", "-0.5"]);
    assert_success(&output);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "--verbose\n--demand-response-share -0.5\n"
    );
}

#[test]
fn set_unchanged_reports_status() {
    let (_dir, path) = write_temp("options.txt", "--solver x\n");
    let output = run(&["set", &path, "verbose", "--delete", "--write", "--output", "json"]);
    assert_success(&output);
    assert_eq!(stdout_json(&output)["status"], "unchanged");
}

#[test]
fn set_scenario_edits_one_line() {
    let (_dir, path) = write_temp(
        "scenarios.txt",
        "--scenario-name a --solver x\n--scenario-name b\n",
    );
    let output = run(&["set", &path, "solver", "cbc", "--scenario", "b"]);
    assert_success(&output);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "--scenario-name a --solver x\n--scenario-name b --solver cbc\n"
    );

    let output = run(&["set", &path, "solver", "cbc", "--scenario", "nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no scenario named 'nope'"));
}

// ─── show ────────────────────────────────────────────────────────────────────

#[test]
fn show_merges_selected_scenario() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("options.txt"), "--verbose\n--solver gurobi\n").unwrap();
    fs::write(
        dir.path().join("scenarios.txt"),
        "--scenario-name cheap --solver glpk\n",
    )
    .unwrap();
    let root = dir.path().to_string_lossy().to_string();

    let output = run(&["show", "--root", &root, "--scenario", "cheap"]);
    assert_success(&output);
    let json = stdout_json(&output);
    assert_eq!(json["solver"], "glpk");
    assert_eq!(json["verbose"], true);
    assert_eq!(json["scenarioName"], "cheap");

    let output = run(&["show", "--root", &root]);
    assert_success(&output);
    assert_eq!(stdout_json(&output)["solver"], "gurobi");
}

#[test]
fn show_reads_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("opts.txt"), "--solver cbc\n").unwrap();
    let config = dir.path().join("workspace.json");
    fs::write(
        &config,
        serde_json::json!({ "root": dir.path(), "options_file": "opts.txt" }).to_string(),
    )
    .unwrap();

    let output = run(&["show", "--config", &config.to_string_lossy()]);
    assert_success(&output);
    assert_eq!(stdout_json(&output)["solver"], "cbc");
}

// ─── explain ─────────────────────────────────────────────────────────────────

#[test]
fn explain_known_and_unknown_codes() {
    let output = run(&["explain", "SWO1003", "--output", "json"]);
    assert_success(&output);
    let json = stdout_json(&output);
    assert_eq!(json["id"], "SWO1003");
    assert!(json["explanation"].is_string());

    let output = run(&["explain", "SWO9999", "--output", "json"]);
    assert_success(&output);
    assert!(stdout_json(&output)["explanation"].is_null());
}
