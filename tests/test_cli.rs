//! Tests for the apicheck binary: exit codes and report output.

mod support;
use support::harness::{load_fixture, TestHarness};

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_valid_config_exits_zero() {
    let harness = TestHarness::new();
    let config = harness.write_config("config.json", &load_fixture("valid_config.json"));

    let output = harness.run(&config, &[]);
    assert!(
        output.status.success(),
        "apicheck failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let out = stdout(&output);
    assert!(out.contains("Loading configuration..."));
    assert!(out.contains("Schema validation passed"));
    assert!(out.contains("VALIDATION PASSED"));
}

#[test]
fn test_cli_invalid_config_exits_one() {
    let harness = TestHarness::new();
    let config = harness.write_config(
        "config.json",
        r#"{"tests": [{"name": "t1", "order": 1}, {"name": "t2", "order": 1}]}"#,
    );

    let output = harness.run(&config, &[]);
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("VALIDATION FAILED"));
    assert!(out.contains("Business Logic Errors:"));
    assert!(out.contains("1. Duplicate test orders: [1]"));
}

#[test]
fn test_cli_quiet_prints_only_report() {
    let harness = TestHarness::new();
    let config = harness.write_config("config.json", &load_fixture("valid_config.json"));

    let output = harness.run(&config, &["--quiet"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(!out.contains("Loading configuration..."));
    assert!(out.contains("API TEST CONFIGURATION VALIDATION REPORT"));
}

#[test]
fn test_cli_json_format() {
    let harness = TestHarness::new();
    let config = harness.write_config("config.json", r#"{"global_auth": {"type": "basic"}}"#);

    let output = harness.run(&config, &["--format", "json"]);
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["valid"], false);
    assert_eq!(
        report["business_errors"][0]["message"],
        "Basic auth missing 'basic' configuration"
    );
}

#[test]
fn test_cli_missing_config_exits_one() {
    let harness = TestHarness::new();
    let missing = harness.path().join("missing.json");

    let output = harness.run(&missing, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error loading configuration"));
}

#[test]
fn test_cli_malformed_schema_exits_one() {
    let harness = TestHarness::new();
    std::fs::write(&harness.schema_path, "{ not json").unwrap();
    let config = harness.write_config("config.json", "{}");

    let output = harness.run(&config, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error loading schema"));
}

#[test]
fn test_cli_missing_arguments_exits_one() {
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_apicheck"))
        .output()
        .expect("Failed to run apicheck");
    assert_eq!(output.status.code(), Some(1));
}
