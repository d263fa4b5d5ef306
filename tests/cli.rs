use assert_cmd::Command;
use predicates::prelude::*;

fn linetally(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("linetally").unwrap();
    cmd.env("HOME", home);
    cmd
}

fn write_report(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

const REPORT: &str = "\
ACCOUNT_NUM,CUSTOMER,PROVIDER,CYCLE,COMP_PAID,NOTE
12025551234,Jane Doe,Verizon,11/2025,$150.00,Component:Upfront
12025551234,Jane Doe,Verizon,11/2025,$12.50,Monthly residual
3105559876,Alex Smith,AT&T,11/2025,(25.00),Chargeback early disconnect
555,Broken Row,AT&T,11/2025,$10.00,Residual
";

#[test]
fn test_full_ingest_flow() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");

    linetally(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized database"));

    linetally(home.path())
        .args(["users", "add", "store-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("store-12"));

    let report = write_report(home.path(), "comp.csv", REPORT);

    linetally(home.path())
        .args(["ingest", report.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "3 transactions for 2 new and 1 existing lines (1 skipped)",
        ));

    // Re-running the identical file only skips.
    linetally(home.path())
        .args(["ingest", report.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "0 transactions for 0 new and 3 existing lines (4 skipped)",
        ));

    linetally(home.path())
        .args(["lines"])
        .assert()
        .success()
        .stdout(predicate::str::contains("202-555-1234"))
        .stdout(predicate::str::contains("complete"));

    linetally(home.path())
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$150.00"));

    let export = home.path().join("lines.csv");
    linetally(home.path())
        .args(["export", "--output", export.to_str().unwrap()])
        .assert()
        .success();
    let exported = std::fs::read_to_string(&export).unwrap();
    assert!(exported.contains("2025551234"));
    assert!(exported.contains("complete"));
}

#[test]
fn test_ingest_without_user_fails_fast() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");
    linetally(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success();

    let report = write_report(home.path(), "comp.csv", REPORT);
    linetally(home.path())
        .args(["ingest", report.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user selected"));
}

#[test]
fn test_ingest_empty_file_fails_fast() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");
    linetally(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success();
    linetally(home.path())
        .args(["users", "add", "store-12"])
        .assert()
        .success();

    let report = write_report(home.path(), "empty.csv", "");
    linetally(home.path())
        .args(["ingest", report.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Empty report"));
}
