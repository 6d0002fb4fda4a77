//! CLI behavior tests that stop short of the network: argument handling and
//! input validation all fail before any remote service is contacted.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn amplidesign() -> Command {
    Command::cargo_bin("amplidesign").unwrap()
}

#[test]
fn test_help_describes_input() {
    amplidesign()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("guide_name"))
        .stdout(predicate::str::contains("guide_seq"));
}

#[test]
fn test_version_flag() {
    amplidesign()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("amplidesign"));
}

#[test]
fn test_no_arguments_is_usage_error() {
    amplidesign()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_input_file_fails() {
    amplidesign()
        .arg("/no/such/guides.tsv")
        .assert()
        .failure();
}

#[test]
fn test_missing_required_column_fails() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    writeln!(input, "guide_name\tsequence").unwrap();
    writeln!(input, "g1\tACGTACGTACGTACGTACGT").unwrap();

    amplidesign()
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("guide_seq"));
}

#[test]
fn test_empty_table_fails() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    writeln!(input, "guide_name\tguide_seq").unwrap();

    amplidesign()
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no guide records"));
}
