use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn cnf_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dpllsat"))
        .args(args)
        .output()
        .expect("failed to run dpllsat")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn missing_argument() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("USAGE"));
    assert!(output.stdout.is_empty());
}

#[test]
fn extra_argument() {
    let file = cnf_file("p cnf 1 1\n1 0\n");
    let path = file.path().to_str().expect("utf-8 path");
    let output = run(&[path, path]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_file() {
    let file = cnf_file("");
    let missing = file.path().with_extension("missing");
    let output = run(&[missing.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("I/O error"));
}

#[test]
fn parse_failure() {
    let file = cnf_file("p cnf 1 1\n1 x 0\n");
    let output = run(&[file.path().to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 2: invalid literal 'x'"));
    assert!(output.stdout.is_empty());
}

#[test]
fn huge_header_fails_cleanly() {
    let file = cnf_file("p cnf 18446744073709551615 1\n1 0\n");
    let output = run(&[file.path().to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("parse error"));
}

#[test]
fn sat() {
    let file = cnf_file("c forced\np cnf 3 2\n1 0\n-1 -2 0\n");
    let output = run(&[file.path().to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "SAT\n1 true\n2 false\n3 false\n");
}

#[test]
fn unsat() {
    let file = cnf_file("p cnf 1 2\n1 0\n-1 0\n");
    for &search in &["iterative", "recursive", "trail"] {
        let output = run(&[file.path().to_str().expect("utf-8 path"), "--search", search]);
        assert_eq!(output.status.code(), Some(0));
        assert_eq!(stdout(&output), "UNSAT\n");
    }
}

#[test]
fn seeded_runs_agree() {
    let file = cnf_file("p cnf 4 4\n1 2 0\n-1 -2 0\n3 4 0\n-3 -4 0\n");
    let path = file.path().to_str().expect("utf-8 path");
    let first = run(&[path, "--seed", "17"]);
    let second = run(&[path, "--seed", "17"]);
    assert_eq!(first.status.code(), Some(0));
    assert!(stdout(&first).starts_with("SAT\n"));
    assert_eq!(stdout(&first), stdout(&second));
}

#[test]
fn strict_zero_lines() {
    let file = cnf_file("p cnf 1 2\n1 0\n0\n");
    let path = file.path().to_str().expect("utf-8 path");
    assert_eq!(stdout(&run(&[path])), "SAT\n1 true\n");
    assert_eq!(stdout(&run(&[path, "--strict-zero-lines"])), "UNSAT\n");
}
