use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const CATS: [&str; 12] = [
    "--topic",
    "Cats",
    "--objective",
    "Inform",
    "--audience",
    "Kids",
    "--slides",
    "2",
    "--breakdown",
    "intro,end",
    "--file-url",
    "https://x.com/a.pdf",
];

/// The binary run from an empty directory with no service settings, so a
/// stray `.env` or exported variable cannot leak in.
fn aippt(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("aippt-cli").expect("bin");
    cmd.current_dir(dir.path())
        .env_remove("AIPPT_API_URL")
        .env_remove("AIPPT_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn generate_reports_every_invalid_field() {
    let tmp = tempfile::tempdir().unwrap();
    aippt(&tmp)
        .args(["generate", "--slides", "0", "--lang", "xx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Topic is required"))
        .stderr(predicate::str::contains("Number of slides must be positive"))
        .stderr(predicate::str::contains("Language must be one of"))
        .stderr(predicate::str::contains("Please provide a valid URL"));
}

#[test]
fn generate_refuses_to_run_without_service_settings() {
    let tmp = tempfile::tempdir().unwrap();
    aippt(&tmp)
        .arg("generate")
        .args(CATS)
        .assert()
        .failure()
        .stderr(predicate::str::contains("AIPPT_API_URL"));
}

#[test]
fn offline_generate_prints_markdown() {
    let tmp = tempfile::tempdir().unwrap();
    aippt(&tmp)
        .args(["--offline", "generate"])
        .args(CATS)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Cats"))
        .stdout(predicate::str::contains("## Intro"))
        .stdout(predicate::str::contains("## End"));
}

#[test]
fn offline_generate_prints_json() {
    let tmp = tempfile::tempdir().unwrap();
    let output = aippt(&tmp)
        .args(["generate", "--offline", "--json", "--lang", "fr"])
        .args(CATS)
        .output()
        .unwrap();
    assert!(output.status.success());
    let deck: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(deck["title"], "Cats");
    assert_eq!(deck["slides"].as_array().map(Vec::len), Some(2));
    assert_eq!(deck["slides"][0]["title"], "Intro");
}

#[test]
fn help_lists_subcommands() {
    let tmp = tempfile::tempdir().unwrap();
    aippt(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("--offline"));
}
