//! CLI integration tests

use std::path::Path;
use std::process::{Command, Output};

fn eup_command(args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_eup"));
    command
        .args(args)
        .env_remove("EUP_DATA")
        .env_remove("EUP_HORIZON_DAYS")
        .env_remove("EUP_LOG_JSON")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    command
}

fn eup(args: &[&str]) -> Output {
    eup_command(args).output().expect("Failed to execute command")
}

fn write_history(dir: &Path, values: &[f64]) -> String {
    let records: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, kwh)| {
            // 2024-01-01 is a Monday
            format!(
                r#"{{"date": "2024-01-{:02}", "kWh": {}, "amount": {}, "dayOfWeek": {}, "month": 1}}"#,
                i + 1,
                kwh,
                kwh * 20.0,
                (i + 1) % 7
            )
        })
        .collect();
    let path = dir.join("usage.json");
    std::fs::write(&path, format!("[{}]", records.join(",\n"))).unwrap();
    path.display().to_string()
}

fn parse_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout should be JSON")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = eup(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("Energy Usage Predictor"), "Should show app name");
    for command in [
        "forecast",
        "patterns",
        "recommend",
        "anomalies",
        "runway",
        "report",
        "sample",
    ] {
        assert!(stdout.contains(command), "Should show {} command", command);
    }
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = eup(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("eup"), "Should show binary name");
}

/// Test runway requires a balance
#[test]
fn test_runway_requires_balance() {
    let output = eup(&["runway"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--balance"));
}

/// Test forecast of a linear history as JSON
#[test]
fn test_forecast_json_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let values: Vec<f64> = (0..10).map(|i| 10.0 + 2.0 * i as f64).collect();
    let data = write_history(dir.path(), &values);

    let output = eup(&["--data", &data, "--format", "json", "forecast"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json = parse_json(&output);
    assert!((json["dailyKWh"].as_f64().unwrap() - 30.0).abs() < 1e-9);
    assert_eq!(json["trend"], "increasing");
    assert_eq!(json["confidence"], "low");
    assert!((json["fit"]["slope"].as_f64().unwrap() - 2.0).abs() < 1e-9);
}

/// Test runway from a flat history
#[test]
fn test_runway_json() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_history(dir.path(), &[5.0; 10]);

    let output = eup(&[
        "--data", &data, "--format", "json", "--rate", "20", "runway", "--balance", "100",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json = parse_json(&output);
    assert_eq!(json["status"], "depletes");
    assert_eq!(json["daysRemaining"], 1);
    assert_eq!(json["urgency"], "critical");
}

/// Test the full report against the demo series
#[test]
fn test_report_json_on_demo_data() {
    let output = eup(&["--format", "json", "report", "--balance", "500"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json = parse_json(&output);
    assert_eq!(json["records"], 30);
    assert_eq!(json["forecast"]["confidence"], "high");
    assert_eq!(json["recommendation"]["perPeriodBreakdown"].as_array().unwrap().len(), 3);
    assert_eq!(json["anomalies"].as_array().unwrap().len(), 1);
    assert_eq!(json["anomalies"][0]["kind"], "spike");
}

/// Test table output renders
#[test]
fn test_report_table_on_demo_data() {
    let output = eup(&["report", "--balance", "500"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Consumption Forecast"));
    assert!(stdout.contains("Top-up Recommendation"));
    assert!(stdout.contains("Credit Runway"));
}

/// Test an invalid history file is rejected
#[test]
fn test_invalid_data_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"[{"date": "2024-01-01", "kWh": 4.0, "amount": 80.0, "dayOfWeek": 9, "month": 1}]"#,
    )
    .unwrap();

    let output = eup(&["--data", path.to_str().unwrap(), "forecast"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load usage data"));
}

/// Test a generated sample file can be read back
#[test]
fn test_sample_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.json");
    let path_str = path.to_str().unwrap();

    let output = eup(&["sample", "--days", "21", "--output", path_str]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let output = eup(&["--data", path_str, "--format", "json", "patterns"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let json = parse_json(&output);
    assert_eq!(json["dominantPattern"], "Higher on weekends");
}

/// Test a zero forecast horizon is rejected on the command line
#[test]
fn test_zero_horizon_flag_is_rejected() {
    let output = eup(&["--format", "json", "forecast", "--days", "0"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let output = eup(&["report", "--days", "0"]);
    assert!(!output.status.success());
}

/// Test a zero forecast horizon is rejected from the environment
#[test]
fn test_zero_horizon_config_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let output = eup_command(&["forecast"])
        .env("HOME", home.path())
        .env("EUP_HORIZON_DAYS", "0")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("horizon_days"), "{}", stderr);
}

/// Test the forecast horizon flag scales the weekly figure
#[test]
fn test_forecast_horizon_flag() {
    let dir = tempfile::tempdir().unwrap();
    let values: Vec<f64> = (0..10).map(|i| 10.0 + 2.0 * i as f64).collect();
    let data = write_history(dir.path(), &values);

    let output = eup(&["--data", &data, "--format", "json", "forecast", "--days", "14"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json = parse_json(&output);
    assert_eq!(json["horizonDays"], 14);
    assert!((json["weeklyKWh"].as_f64().unwrap() - 420.0).abs() < 1e-9);
}

/// Test metrics are printed after the report
#[test]
fn test_report_prints_metrics() {
    let output = eup(&["--format", "json", "--metrics", "report", "--balance", "500"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    // stdout stays a single JSON document
    parse_json(&output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    let metric = |name: &str| {
        stderr
            .lines()
            .find_map(|line| line.strip_prefix(name)?.strip_prefix(' '))
            .map(|value| value.trim().to_string())
    };
    assert_eq!(metric("usage_predictor_series_loads_total").as_deref(), Some("1"));
    assert_eq!(metric("usage_predictor_records_loaded").as_deref(), Some("30"));
    // Forecast, recommendation and runway each run a forecast
    assert_eq!(metric("usage_predictor_forecasts_generated_total").as_deref(), Some("3"));
    assert_eq!(metric("usage_predictor_anomalies_detected_total").as_deref(), Some("1"));
}

/// Test JSON logs from the config file include the report's runway event
#[test]
fn test_json_logs_from_config() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join(".config").join("eup");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.json"), r#"{"log_json": true}"#).unwrap();

    let output = eup_command(&["--format", "json", "report", "--balance", "500"])
        .env("HOME", home.path())
        .env("RUST_LOG", "debug")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    parse_json(&output);

    let events: Vec<serde_json::Value> = String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str(line).expect("log line should be JSON"))
        .collect();
    let has_event = |name: &str| events.iter().any(|e| e["fields"]["event"] == name);

    assert!(has_event("series_loaded"));
    assert!(has_event("forecast_generated"));
    assert!(has_event("runway_estimated"));
    assert!(has_event("anomaly_detected"));
}
