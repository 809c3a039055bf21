use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expense(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense").unwrap();
    cmd.env("EXPENSE_TRACKER_DATA_DIR", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn add(dir: &TempDir, amount: &str, category: &str, date: &str) {
    expense(dir)
        .args([
            "add", amount, "-c", category, "-p", "Cash", "-n", "weekly shop", "-d", date,
        ])
        .assert()
        .success();
}

#[test]
fn add_then_list_shows_expense() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args([
            "add", "500", "-c", "Groceries", "-p", "Cash", "-n", "weekly shop", "-d",
            "2024-03-15",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense added: ₹500.00 for Groceries"));

    expense(&dir)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("weekly shop"))
        .stdout(predicate::str::contains("1 expense(s), total ₹500.00"));

    assert!(dir
        .path()
        .join("data")
        .join("expense-tracker-data.json")
        .exists());
}

#[test]
fn add_rejects_non_positive_amount() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["add", "0", "-c", "Travel", "-p", "UPI", "-n", "bus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than 0"));
}

#[test]
fn add_rejects_unknown_category() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["add", "10", "-c", "Food", "-p", "UPI", "-n", "snack"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Food"));
}

#[test]
fn breakdown_and_trend_reports() {
    let dir = TempDir::new().unwrap();
    add(&dir, "100", "Groceries", "2024-02-10");
    add(&dir, "300", "Travel", "2024-03-05");

    expense(&dir)
        .args(["report", "trend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Feb 2024"))
        .stdout(predicate::str::contains("Mar 2024"));

    expense(&dir)
        .args(["report", "breakdown", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Travel"))
        .stdout(predicate::str::contains("100.0%"));

    expense(&dir)
        .args(["report", "breakdown", "--monthly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Select a month"))
        .stdout(predicate::str::contains("Available months: Feb 2024, Mar 2024"));

    expense(&dir)
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₹400.00"))
        .stdout(predicate::str::contains("₹200.00"));
}

#[test]
fn list_filters_by_category() {
    let dir = TempDir::new().unwrap();
    add(&dir, "100", "Groceries", "2024-02-10");
    add(&dir, "300", "Travel", "2024-03-05");

    expense(&dir)
        .args(["list", "-c", "travel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("total ₹300.00"));
}

#[test]
fn delete_unknown_id_is_not_an_error() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["delete", "exp-deadbeef"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing deleted"));
}

#[test]
fn delete_by_display_id() {
    let dir = TempDir::new().unwrap();
    add(&dir, "500", "Groceries", "2024-03-15");

    let export = expense(&dir)
        .args(["export", "all", "--format", "json"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&export.stdout).unwrap();
    let id = value["expenses"][0]["id"].as_str().unwrap().to_string();

    expense(&dir)
        .args(["delete", &id[..8]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense deleted: ₹500.00 removed"));

    expense(&dir)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses match"));
}

#[test]
fn corrupt_data_file_does_not_block_startup() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(
        dir.path().join("data").join("expense-tracker-data.json"),
        "{{{{ not json",
    )
    .unwrap();

    expense(&dir)
        .args(["list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("could not be read"));

    assert!(dir
        .path()
        .join("data")
        .join("expense-tracker-data.corrupt.json")
        .exists());
}

#[test]
fn audit_log_records_operations() {
    let dir = TempDir::new().unwrap();
    add(&dir, "500", "Groceries", "2024-03-15");

    expense(&dir)
        .args(["audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"));
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("expense-tracker-data"));
}

#[test]
fn init_writes_config_once() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized expense tracker"));
    assert!(dir.path().join("config.json").exists());

    expense(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}
