use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TRANSACTIONS: &str = r#"[
  {"id": 1, "date": "2024-01-02", "amount": "3000.00", "transaction_type": "INCOME",
   "category": {"id": 1, "name": "Salary"}},
  {"id": 2, "date": "2024-01-05", "amount": "480.00", "transaction_type": "EXPENSE",
   "category": 2},
  {"id": 3, "date": "2024-01-09", "amount": "not money", "transaction_type": "EXPENSE"}
]"#;

const BUDGETS: &str = r#"{"count": 1, "next": null, "results": [
  {"id": 7, "name": "January Essentials", "period_type": "MONTHLY",
   "start_date": "2024-01-01", "end_date": "2024-01-31", "total_amount": "500.00",
   "categories": [{"id": 70, "category": 2, "amount": "500.00"}]}
]}"#;

const CATEGORIES: &str = r#"[
  {"id": 1, "name": "Salary", "is_income": true},
  {"id": 2, "name": "Groceries"}
]"#;

const ALERTS: &str = r#"[
  {"id": 5, "budget_category": 70, "alert_type": "PERCENTAGE", "threshold": "80"}
]"#;

fn write_fixtures(dir: &Path) {
    fs::write(dir.join("transactions.json"), TRANSACTIONS).unwrap();
    fs::write(dir.join("budgets.json"), BUDGETS).unwrap();
    fs::write(dir.join("categories.json"), CATEGORIES).unwrap();
    fs::write(dir.join("alerts.json"), ALERTS).unwrap();
}

/// A command isolated from the user's real settings and environment
fn spendwise(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("spendwise").unwrap();
    cmd.env("SPENDWISE_DATA_DIR", home.path())
        .env_remove("SPENDWISE_API_URL")
        .env_remove("SPENDWISE_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

fn fixture_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());
    dir
}

#[test]
fn progress_shows_budget_from_fixture_dir() {
    let home = TempDir::new().unwrap();
    let data = fixture_dir();

    spendwise(&home)
        .arg("--data-dir")
        .arg(data.path())
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("January Essentials"))
        .stdout(predicate::str::contains("96%"))
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn dashboard_exports_json() {
    let home = TempDir::new().unwrap();
    let data = fixture_dir();

    let output = spendwise(&home)
        .arg("--data-dir")
        .arg(data.path())
        .args(["dashboard", "--period", "2024-01", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["report"], "dashboard");
    assert_eq!(value["data"]["total_income"], "3000.00");
    assert_eq!(value["data"]["total_expenses"], "480.00");
}

#[test]
fn alerts_resolve_budget_category() {
    let home = TempDir::new().unwrap();
    let data = fixture_dir();

    spendwise(&home)
        .arg("--data-dir")
        .arg(data.path())
        .args(["alerts", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("alert_id,budget,category"))
        .stdout(predicate::str::contains("5,January Essentials,Groceries,PERCENTAGE"));
}

#[test]
fn report_written_to_file() {
    let home = TempDir::new().unwrap();
    let data = fixture_dir();
    let out = home.path().join("monthly.csv");

    spendwise(&home)
        .arg("--data-dir")
        .arg(data.path())
        .args(["monthly", "--period", "2024-01", "--format", "csv", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let csv = fs::read_to_string(out).unwrap();
    assert!(csv.contains("2024-01,January 2024,3000.00,480.00,2520.00,"));
}

#[test]
fn unknown_budget_fails() {
    let home = TempDir::new().unwrap();
    let data = fixture_dir();

    spendwise(&home)
        .arg("--data-dir")
        .arg(data.path())
        .args(["progress", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Budget not found: bud-99"));
}

#[test]
fn missing_data_dir_fails() {
    let home = TempDir::new().unwrap();

    spendwise(&home)
        .arg("--data-dir")
        .arg(home.path().join("nope"))
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn data_dir_and_api_url_conflict() {
    let home = TempDir::new().unwrap();
    let data = fixture_dir();

    spendwise(&home)
        .arg("--data-dir")
        .arg(data.path())
        .args(["--api-url", "http://localhost:8000/api", "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used together"));
}

#[test]
fn init_runs_once() {
    let home = TempDir::new().unwrap();

    spendwise(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));
    assert!(home.path().join("config.json").exists());

    spendwise(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn config_redacts_token() {
    let home = TempDir::new().unwrap();

    spendwise(&home)
        .args(["--api-url", "http://localhost:8000/api", "--token", "s3cret", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Source: API at http://localhost:8000/api/"))
        .stdout(predicate::str::contains("Token: set"))
        .stdout(predicate::str::contains("s3cret").not());
}
