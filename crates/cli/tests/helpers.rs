use std::fs;

use buddyweek::{build_rng, canonicalize_or_current, resolve_input_path};
use rand::Rng;
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let cwd = std::env::current_dir().expect("cwd");
    assert_eq!(canonicalize_or_current(".").expect("canonicalize"), cwd);
}

#[test]
fn canonicalize_or_current_joins_missing_relative_path() {
    let cwd = std::env::current_dir().expect("cwd");
    let result = canonicalize_or_current("does-not-exist-yet").expect("canonicalize");
    assert_eq!(result, cwd.join("does-not-exist-yet"));
}

#[test]
fn resolve_input_path_appends_csv_extension() {
    let tmp = tempdir().expect("tempdir");
    let csv = tmp.path().join("klassen.csv");
    fs::write(&csv, "class,name,email\n").expect("write csv");

    let bare = tmp.path().join("klassen");
    let resolved = resolve_input_path(bare.to_str().expect("utf8 path")).expect("resolve");
    assert_eq!(resolved, csv.canonicalize().expect("canon csv"));

    let explicit = resolve_input_path(csv.to_str().expect("utf8 path")).expect("resolve");
    assert_eq!(explicit, resolved);
}

#[test]
fn resolve_input_path_errors_when_missing() {
    let tmp = tempdir().expect("tempdir");
    let missing = tmp.path().join("nothing-here");
    let err = resolve_input_path(missing.to_str().expect("utf8 path")).unwrap_err();
    assert!(err.to_string().contains("Input file does not exist"), "unexpected error: {err}");
    assert!(err.to_string().contains("nothing-here.csv"), "unexpected error: {err}");
}

#[test]
fn build_rng_is_reproducible_with_seed() {
    let mut first = build_rng(Some(17));
    let mut second = build_rng(Some(17));
    let a: Vec<u32> = (0..8).map(|_| first.gen()).collect();
    let b: Vec<u32> = (0..8).map(|_| second.gen()).collect();
    assert_eq!(a, b);
}
