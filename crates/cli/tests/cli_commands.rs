use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

const TABLE: &str = "class,name,email\n\
    A,Alice,alice@example.com\n\
    A,Bob,bob@example.com\n\
    A,Carol,carol@example.com\n\
    B,Dan,dan@example.com\n\
    B,Erin,erin@example.com\n\
    C,Frank,frank@example.com\n";

#[test]
fn assign_runs_end_to_end() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    fs::write(root.join("klassen.csv"), TABLE).expect("write table");

    // `.csv` is appended to the bare input name.
    cargo_bin_cmd!("buddyweek")
        .current_dir(root)
        .arg("assign")
        .arg("--input")
        .arg("klassen")
        .arg("--output")
        .arg(".")
        .arg("--seed")
        .arg("12")
        .assert()
        .success()
        .stdout(predicate::str::contains("Assigned 2 group(s), 5 member(s)"))
        .stdout(predicate::str::contains("Skipped 1 group(s)"));

    let out = root.join("buddyweek_output");
    let names = fs::read_to_string(out.join("names/A assigned_names.txt")).expect("names A");
    assert_eq!(names.lines().count(), 3);
    assert!(out.join("addresses/B assigned_addresses.txt").is_file());
    assert!(!out.join("names/C assigned_names.txt").exists());

    cargo_bin_cmd!("buddyweek")
        .arg("verify")
        .arg("--output")
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("A (3 members): OK"))
        .stdout(predicate::str::contains("B (2 members): OK"));
}

#[test]
fn assign_accepts_original_flag_names() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("klassen.csv");
    fs::write(&input, TABLE).expect("write table");

    cargo_bin_cmd!("buddyweek")
        .arg("assign")
        .arg("-i")
        .arg(&input)
        .arg("--outputfolder")
        .arg(dir.path())
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"input_sha256\""));
}

#[test]
fn assign_abort_fails_on_single_member_group() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("klassen.csv");
    fs::write(&input, TABLE).expect("write table");

    cargo_bin_cmd!("buddyweek")
        .arg("assign")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(dir.path())
        .arg("--on-degenerate")
        .arg("abort")
        .assert()
        .failure()
        .stderr(predicate::str::contains("single member"));

    assert!(!dir.path().join("buddyweek_output").exists());
}

#[test]
fn assign_rejects_unknown_policy() {
    let dir = tempdir().expect("tempdir");
    cargo_bin_cmd!("buddyweek")
        .arg("assign")
        .arg("--input")
        .arg(dir.path().join("x.csv"))
        .arg("--output")
        .arg(dir.path())
        .arg("--on-degenerate")
        .arg("maybe")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid policy"));
}

#[test]
fn assign_requires_input_and_output() {
    cargo_bin_cmd!("buddyweek").arg("assign").assert().failure();
}

#[test]
fn assign_reports_missing_input() {
    let dir = tempdir().expect("tempdir");
    cargo_bin_cmd!("buddyweek")
        .arg("assign")
        .arg("--input")
        .arg(dir.path().join("absent"))
        .arg("--output")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file does not exist"));
}

#[test]
fn groups_lists_members() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("klassen.csv");
    fs::write(&input, TABLE).expect("write table");

    cargo_bin_cmd!("buddyweek")
        .arg("groups")
        .arg("--input")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Groups (3), members: 6"))
        .stdout(predicate::str::contains("C (1) [single member: cannot be assigned]"));
}
