use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE_CSV: &str = "date,type,amount,category\n\
    2024-03-05,Sale,100.00,Beverages\n\
    2024-03-20,Expense,40.00,Rent\n";

fn write_sample(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("transactions.csv");
    std::fs::write(&path, SAMPLE_CSV).expect("write sample csv");
    path
}

#[test]
fn monthly_table_report_succeeds() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write_sample(&dir);
    Command::cargo_bin("tally_core_cli")
        .expect("binary exists")
        .arg(&csv)
        .args(["--granularity", "monthly", "--reference", "2024-06-01"])
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly profit analysis"))
        .stdout(predicate::str::contains("Mar"))
        .stdout(predicate::str::contains("Total"));
}

#[test]
fn json_format_emits_buckets() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write_sample(&dir);
    Command::cargo_bin("tally_core_cli")
        .expect("binary exists")
        .arg(&csv)
        .args([
            "--granularity",
            "quarterly",
            "--reference",
            "2024-06-01",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"granularity\": \"Quarterly\""))
        .stdout(predicate::str::contains("\"buckets\""));
}

#[test]
fn custom_range_flags_drive_a_custom_report() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write_sample(&dir);
    Command::cargo_bin("tally_core_cli")
        .expect("binary exists")
        .arg(&csv)
        .args(["--from", "2024-03-01", "--to", "2024-03-31"])
        .args(["--reference", "2024-06-01"])
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("Custom profit analysis"))
        .stdout(predicate::str::contains("2024-03"));
}

#[test]
fn half_open_custom_range_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write_sample(&dir);
    Command::cargo_bin("tally_core_cli")
        .expect("binary exists")
        .arg(&csv)
        .args(["--from", "2024-03-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from and --to"));
}

#[test]
fn missing_file_fails_cleanly() {
    Command::cargo_bin("tally_core_cli")
        .expect("binary exists")
        .arg("does-not-exist.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn export_writes_bucket_csv() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write_sample(&dir);
    let out = dir.path().join("buckets.csv");
    Command::cargo_bin("tally_core_cli")
        .expect("binary exists")
        .arg(&csv)
        .args(["--granularity", "monthly", "--reference", "2024-06-01"])
        .arg("--no-color")
        .arg("--export")
        .arg(&out)
        .assert()
        .success();
    let raw = std::fs::read_to_string(&out).expect("read export");
    assert!(raw.starts_with("period,revenue,expense,profit"));
}
