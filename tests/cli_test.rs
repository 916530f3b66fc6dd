use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("eventsweep"));
    cmd.arg("tests/fixtures/seed.json");

    // c1 (expired, no activity) is cancelled with two notifications; e1 and
    // e3 are then deleted with one owner notification each; c2/e2 are future.
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("contracts_scanned=2"))
        .stdout(predicate::str::contains("contracts_cancelled=1"))
        .stdout(predicate::str::contains("events_scanned=3"))
        .stdout(predicate::str::contains("events_deleted=2"))
        .stdout(predicate::str::contains("notifications_sent=4"))
        .stdout(predicate::str::contains("errors=0"));

    Ok(())
}

#[test]
fn test_cli_runs_without_seed_or_db() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("eventsweep"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("contracts_scanned=0"))
        .stdout(predicate::str::contains("events_scanned=0"));

    Ok(())
}

#[test]
fn test_cli_fails_on_missing_seed_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("eventsweep"));
    cmd.arg("tests/fixtures/does_not_exist.json");

    cmd.assert().failure();

    Ok(())
}
