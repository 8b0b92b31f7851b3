//! Tests for the options model: coercion of entries into the options record
//! and extraction of scenarios.

mod common;

use common::fixture;
use serde_json::json;
use switch_options_core::{
    OptionValue, ReserveType, SolverParam, find_scenario, to_options, to_scenarios,
};

#[test]
fn flags_and_strings() {
    let options = to_options("--verbose --solver gurobi\n");
    assert_eq!(
        serde_json::to_value(&options).unwrap(),
        json!({ "verbose": true, "solver": "gurobi" })
    );
}

#[test]
fn quoted_solver_options_string() {
    let options = to_options("--solver-options-string \"mipgap=0.01 threads=1\"");
    assert_eq!(
        serde_json::to_value(&options).unwrap(),
        json!({ "solverOptionsString": { "mipgap": 0.01, "threads": 1.0 } })
    );
}

#[test]
fn solver_options_as_separate_values() {
    let options = to_options("--solver-options-string mipgap=0.001 primalopt='' advance=2");
    let solver = options.solver_options().unwrap();
    assert_eq!(solver["mipgap"], SolverParam::Number(0.001));
    assert_eq!(solver["primalopt"], SolverParam::Text(String::new()));
    assert_eq!(solver["advance"], SolverParam::Number(2.0));
}

#[test]
fn full_options_fixture() {
    let options = to_options(&fixture("options.txt"));
    assert_eq!(
        serde_json::to_value(&options).unwrap(),
        json!({
            "contingencyReserveType": ["contingency"],
            "demandResponseReserveTypes": ["regulation"],
            "demandResponseShare": 0.1,
            "evReserveTypes": ["regulation"],
            "forceLngTier": false,
            "inputsDir": "inputs/regulation",
            "regulatingReserveType": ["regulation"],
            "rpsAllocation": "fuel_switch_by_period",
            "solver": "gurobi",
            "solverOptionsString": { "mipgap": 0.01, "threads": 1.0 },
            "sortedOutput": true,
            "spinningRequirementRule": "Hawaii",
            "streamSolver": true,
            "unitContingency": true,
            "verbose": true,
            "includeModules": ["switch_model.hawaii.smooth_dispatch"],
            "moduleSearchPath": ["path1", "path2", "path3"]
        })
    );
}

#[test]
fn typed_accessors() {
    let options = to_options(&fixture("options.txt"));
    assert_eq!(options.flag("verbose"), Some(true));
    assert_eq!(options.flag("forceLngTier"), Some(false));
    assert_eq!(options.number("demandResponseShare"), Some(0.1));
    assert_eq!(options.text("solver"), Some("gurobi"));
    assert_eq!(
        options.list("moduleSearchPath"),
        Some(&["path1".to_string(), "path2".to_string(), "path3".to_string()][..])
    );
    assert_eq!(
        options.reserve_types("contingencyReserveType"),
        Some(vec![ReserveType::Contingency])
    );
    assert_eq!(options.text("verbose"), None);
    assert_eq!(options.number("missing"), None);
}

#[test]
fn flag_values_are_ignored() {
    let options = to_options("--verbose no --force-lng-tier yes");
    assert_eq!(options.flag("verbose"), Some(true));
    assert_eq!(options.flag("forceLngTier"), Some(false));
}

#[test]
fn number_without_value_is_nan() {
    let options = to_options("--demand-response-share");
    assert!(options.number("demandResponseShare").unwrap().is_nan());
}

#[test]
fn unknown_option_takes_first_value_as_string() {
    let options = to_options("--max-iter 10 20 --log-run");
    assert_eq!(options.get("maxIter"), Some(&OptionValue::Text("10".into())));
    assert_eq!(options.get("logRun"), Some(&OptionValue::Missing));
    assert!(options.contains_key("logRun"));
}

#[test]
fn last_write_wins() {
    let options = to_options("--solver glpk\n--verbose\n--solver cplex\n");
    assert_eq!(options.text("solver"), Some("cplex"));
}

#[test]
fn byte_order_mark_does_not_hide_the_first_option() {
    let options = to_options("\u{FEFF}--verbose\n--solver x\n");
    assert_eq!(options.flag("verbose"), Some(true));
    assert_eq!(options.text("solver"), Some("x"));
}

#[test]
fn snake_and_kebab_names_share_a_key() {
    let options = to_options("--inputs-dir a --inputs_dir b");
    assert_eq!(options.len(), 1);
    assert_eq!(options.text("inputsDir"), Some("b"));
}

#[test]
fn reserve_types_keep_unknown_values_in_the_record() {
    let options = to_options("--ev-reserve-types regulation spinning");
    assert_eq!(
        options.list("evReserveTypes").map(|l| l.len()),
        Some(2)
    );
    assert_eq!(
        options.reserve_types("evReserveTypes"),
        Some(vec![ReserveType::Regulation])
    );
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn scenarios_one_per_line() {
    let scenarios = to_scenarios(&fixture("scenarios.txt"));
    let names: Vec<_> = scenarios.iter().map(|s| s.name()).collect();
    assert_eq!(
        names,
        vec![Some("base"), Some("high_dr"), Some("no reserves")]
    );
    assert_eq!(scenarios[1].options.number("demandResponseShare"), Some(0.25));
    assert_eq!(scenarios[1].options.text("evTiming"), Some("optimal"));
    assert_eq!(
        scenarios[2].options.list("excludeModules"),
        Some(&["switch_model.reserves".to_string()][..])
    );
}

#[test]
fn line_without_scenario_name_is_skipped() {
    let scenarios = to_scenarios("--scenario-name a --verbose\n--solver x\n");
    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0].name(), Some("a"));
}

#[test]
fn scenario_offsets_point_at_their_line() {
    let text = fixture("scenarios.txt");
    for scenario in to_scenarios(&text) {
        let line = text.lines().nth(scenario.line).unwrap();
        assert_eq!(&text[scenario.offset..scenario.offset + line.len()], line);
        assert!(line.contains("--scenario-name"));
    }
}

#[test]
fn find_scenario_by_name() {
    let scenarios = to_scenarios(&fixture("scenarios.txt"));
    let found = find_scenario(&scenarios, "no reserves").unwrap();
    assert_eq!(found.options.text("solver"), Some("cplex"));
    assert!(find_scenario(&scenarios, "nope").is_none());
}

#[test]
fn scenarios_do_not_leak_between_lines() {
    let scenarios = to_scenarios("--scenario-name a --verbose\n--scenario-name b\n");
    assert_eq!(scenarios[0].options.flag("verbose"), Some(true));
    assert_eq!(scenarios[1].options.flag("verbose"), None);
}
