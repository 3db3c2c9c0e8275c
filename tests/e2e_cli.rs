use assert_cmd::{cargo, prelude::*};
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::TempDir;

const FULL_LOG: &str = "\
datetime,krw_balance,btc_balance,fear_and_greed,decision,reason,action_result\n\
2025-06-01 09:00:00,1000000,0.05,72,buy,Greed climbing,filled\n\
2025-06-01 10:00:00,1100000,0.04,75,hold,Wait for dip,skipped\n\
2025-06-01 11:00:00,900000,0.06,40,sell,Fear spike,filled\n";

fn write_log(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("failed to create log");
    file.write_all(contents.as_bytes()).expect("failed to write log");
    path
}

fn tradeboard() -> Command {
    Command::new(cargo::cargo_bin!("tradeboard"))
}

#[test]
fn show_renders_dashboard_no_color_when_piped() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "trade_history.csv", FULL_LOG);

    let mut cmd = tradeboard();
    cmd.arg("show").arg(&log).arg("--no-color");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("AI Trading Dashboard"))
        .stdout(predicate::str::contains("Recent Records (last 3)"))
        .stdout(predicate::str::contains("Fear & Greed Index"))
        .stdout(predicate::str::contains("Cumulative profit:"))
        .stdout(predicate::str::contains("-10.00 %"))
        .stdout(predicate::str::contains("Trade Execution Log"))
        .stdout(predicate::str::contains("SELL"))
        .stdout(predicate::str::contains("\u{001b}[").not());
}

#[test]
fn missing_file_warns_and_exits_ok() {
    let dir = TempDir::new().unwrap();
    let absent = dir.path().join("trade_history.csv");

    let mut cmd = tradeboard();
    cmd.arg("--no-color").arg("show").arg(&absent);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No trade log found"))
        .stdout(predicate::str::contains("Run the trading bot first"));
}

#[test]
fn missing_datetime_column_fails() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "bad.csv", "krw_balance,btc_balance\n1000000,0.05\n");

    let mut cmd = tradeboard();
    cmd.arg("--no-color").arg("show").arg(&log);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("datetime"));
}

#[test]
fn empty_log_reports_no_records() {
    let dir = TempDir::new().unwrap();
    let log = write_log(
        &dir,
        "empty.csv",
        "datetime,krw_balance,btc_balance\n",
    );

    let mut cmd = tradeboard();
    cmd.arg("--no-color").arg("show").arg(&log);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No surviving records"));
}

#[test]
fn invalid_rows_are_dropped_before_derivation() {
    let dir = TempDir::new().unwrap();
    // Middle rows lack balances or have a bad timestamp; survivors are 100 and 90
    let log = write_log(
        &dir,
        "partial.csv",
        "datetime,krw_balance,btc_balance\n\
         2025-06-01 09:00:00,100,0.1\n\
         2025-06-01 10:00:00,,0.1\n\
         not-a-date,110,0.1\n\
         2025-06-01 12:00:00,90,0.1\n",
    );

    let mut cmd = tradeboard();
    cmd.arg("--no-color").arg("show").arg(&log);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2 records"))
        .stdout(predicate::str::contains("-10.00 %"));
}

#[test]
fn json_mode_emits_artifacts() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "trade_history.csv", FULL_LOG);

    let mut cmd = tradeboard();
    cmd.arg("--json").arg("show").arg(&log);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout should be valid JSON");
    assert_eq!(value["record_count"], 3);
    assert_eq!(value["profit"]["color"], "red");
    assert_eq!(value["decisions"]["counts"].as_array().unwrap().len(), 3);
    assert_eq!(value["log"].as_array().unwrap().len(), 3);
}

#[test]
fn export_writes_html_dashboard() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "trade_history.csv", FULL_LOG);
    let out = dir.path().join("dashboard.html");

    let mut cmd = tradeboard();
    cmd.arg("--no-color")
        .arg("export")
        .arg(&log)
        .arg("--out")
        .arg(&out);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Dashboard exported"));

    let page = std::fs::read_to_string(&out).unwrap();
    assert!(page.contains("plotly"));
    assert!(page.contains("\"record_count\":3"));
}
