//! End-to-end tests for the `swse` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const SHEET: &str = r#"{
    "variables": { "@STRMOD": 2 },
    "attributes": {
        "damage": [
            { "value": "1d8", "source": "Blaster Pistol" },
            { "value": "@STRMOD", "source": "Strength" }
        ],
        "speed": [
            { "value": 6 },
            { "value": 4, "mode": "OVERRIDE", "priority": 2 }
        ],
        "bonus": [
            { "value": 2, "mode": "MULTIPLY", "priority": 10 },
            { "value": 5, "priority": 9 }
        ]
    }
}"#;

fn swse(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_swse"))
        .args(["--color", "never"])
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("SWSE_PRIORITY_ORDER")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

fn sheet_file(content: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.json");
    fs::write(&path, content).unwrap();
    let path = path_string(&path);
    (dir, path)
}

fn path_string(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

// =============================================================================
// eval
// =============================================================================

#[test]
fn eval_prints_the_result() {
    let output = swse(&["eval", "2+3"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "5\n");
}

#[test]
fn eval_with_variables() {
    let output = swse(&["eval", "--set", "@STRMOD=3", "@STRMOD*2"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "6\n");
}

#[test]
fn eval_reads_sheet_variables() {
    let (_dir, path) = sheet_file(SHEET);
    let output = swse(&["eval", "--sheet", &path, "@STRMOD+1"]);
    assert_eq!(stdout(&output), "3\n");
}

#[test]
fn eval_json() {
    let output = swse(&["eval", "--json", "MAX(1,4)"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["result"], serde_json::json!(4));
    assert_eq!(json["warnings"], serde_json::json!([]));
}

#[test]
fn eval_reports_warnings() {
    let output = swse(&["eval", "@WISMOD+1"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "@WISMOD + 1\n");
    assert!(stderr(&output).contains("warning: unresolved variable '@WISMOD'"));
}

#[test]
fn bad_variable_argument_is_rejected() {
    let output = swse(&["eval", "--set", "@STRMOD", "1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("expected @NAME=value"));
}

// =============================================================================
// reduce and inspect
// =============================================================================

#[test]
fn reduce_sums_an_attribute() {
    let (_dir, path) = sheet_file(SHEET);
    assert_eq!(stdout(&swse(&["reduce", "--sheet", &path, "damage"])), "1d8 + 2\n");
    assert_eq!(stdout(&swse(&["reduce", "--sheet", &path, "speed"])), "4\n");
}

#[test]
fn reduce_with_another_strategy() {
    let (_dir, path) = sheet_file(SHEET);
    let output = swse(&["reduce", "--sheet", &path, "--strategy", "MAX", "damage"]);
    assert_eq!(stdout(&output), "1d8\n");
}

#[test]
fn reduce_priority_order_from_flag_and_env() {
    let (_dir, path) = sheet_file(SHEET);
    assert_eq!(stdout(&swse(&["reduce", "--sheet", &path, "bonus"])), "5\n");
    assert_eq!(
        stdout(&swse(&["reduce", "--sheet", &path, "--priority-order", "numeric", "bonus"])),
        "10\n"
    );

    let output = Command::new(env!("CARGO_BIN_EXE_swse"))
        .args(["reduce", "--sheet", &path, "bonus"])
        .env_remove("RUST_LOG")
        .env("SWSE_PRIORITY_ORDER", "numeric")
        .output()
        .unwrap();
    assert_eq!(stdout(&output), "10\n");
}

#[test]
fn reduce_missing_attribute() {
    let (_dir, path) = sheet_file(SHEET);
    let output = swse(&["reduce", "--sheet", &path, "reflex"]);
    assert_eq!(output.status.code(), Some(exitcode::DATAERR));
    assert!(stderr(&output).contains("no attribute 'reflex'"));
}

#[test]
fn invalid_sheet_is_reported() {
    let (_dir, path) = sheet_file("{\n  \"attributes\": [\n");
    let output = swse(&["reduce", "--sheet", &path, "damage"]);
    assert_eq!(output.status.code(), Some(exitcode::SOFTWARE));
    assert!(stderr(&output).contains("invalid sheet"));
}

#[test]
fn missing_sheet_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = path_string(&dir.path().join("missing.json"));
    let output = swse(&["inspect", &path]);
    assert_eq!(output.status.code(), Some(exitcode::SOFTWARE));
    assert!(stderr(&output).contains("Cannot read sheet file"));
}

#[test]
fn inspect_json_reduces_every_attribute() {
    let (_dir, path) = sheet_file(SHEET);
    let output = swse(&["inspect", "--json", &path]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["attributes"]["speed"], serde_json::json!(4));
    assert_eq!(json["attributes"]["damage"], serde_json::json!("1d8 + 2"));
    assert_eq!(json["variables"]["@STRMOD"], serde_json::json!(2));
}

#[test]
fn inspect_prints_tables() {
    let (_dir, path) = sheet_file(SHEET);
    let text = stdout(&swse(&["inspect", &path]));
    assert!(text.contains("Attribute"));
    assert!(text.contains("Blaster Pistol"));
    assert!(text.contains("@STRMOD"));
}

// =============================================================================
// weight and strategies
// =============================================================================

#[test]
fn weight_in_kilograms() {
    assert_eq!(stdout(&swse(&["weight", "2 tons"])), "2000 kg\n");
    assert_eq!(
        stdout(&swse(&["weight", "--quantity", "3", "1/2 kg"])),
        "1.5 kg\n"
    );
    assert_eq!(
        stdout(&swse(&["weight", "--cost-factor", "5", "(40 x Cost Factor) kg"])),
        "200 kg\n"
    );
}

#[test]
fn unreadable_weight() {
    let output = swse(&["weight", "heavy"]);
    assert_eq!(output.status.code(), Some(exitcode::DATAERR));
    assert!(stderr(&output).contains("Unreadable weight: heavy"));
}

#[test]
fn strategies_lists_tags_and_modes() {
    let output = swse(&["strategies", "--json"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let strategies = json["strategies"].as_array().unwrap();
    assert!(strategies.contains(&serde_json::json!({ "tag": "EXPRESSION", "canonical": "SUM" })));
    assert_eq!(json["modes"][6], serde_json::json!({ "name": "POST_MULTIPLY", "code": 6 }));
    assert_eq!(json["option_keys"][0], serde_json::json!("AVAILABLE_GM_BONUSES"));
}
