mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use common::write_session_script;
use predicates::prelude::*;
use serde_json::json;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let script_path = dir.path().join("session.json");
    write_session_script(
        &script_path,
        &json!({
            "paymentMethods": [
                { "nonce": "old-nonce", "type": "creditCard", "details": { "bin": "123456" } }
            ],
            "verification": {
                "overrides": { "amount": "3.00" },
                "outcome": {
                    "status": "success",
                    "nonce": "upgraded-nonce",
                    "liabilityShifted": true,
                    "liablityShiftPossible": true
                }
            }
        }),
    )?;

    let mut cmd = Command::new(cargo_bin!());
    cmd.arg(&script_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"upgraded-nonce\""))
        .stdout(predicate::str::contains("\"liablityShiftPossible\": true"))
        .stderr(predicate::str::contains("all payment method views ready"));

    Ok(())
}

#[test]
fn test_cli_reports_verification_failure_in_summary() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let script_path = dir.path().join("session.json");
    write_session_script(
        &script_path,
        &json!({
            "paymentMethods": [
                { "nonce": "old-nonce", "type": "creditCard", "details": { "bin": "123456" } }
            ],
            "verification": {
                "outcome": { "status": "failure", "message": "A message" }
            }
        }),
    )?;

    let mut cmd = Command::new(cargo_bin!());
    cmd.arg(&script_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"error\": \"A message\""))
        .stderr(predicate::str::contains("verification failed: A message"));

    Ok(())
}

#[test]
fn test_cli_rejects_missing_script() {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("does-not-exist.json");

    cmd.assert().failure();
}
