use assert_cmd::Command;
use predicates::prelude::*;

use std::fs;
use std::path::Path;

const DISTMX: &str = "A B 0.01\nB C 0.02\nD E 0.5\n";

fn write_input(dir: &Path, content: &str) -> String {
    let path = dir.join("distmx.txt");
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn sparseclust() -> Command {
    Command::cargo_bin("sparseclust").unwrap()
}

#[test]
fn single_linkage_per_label() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), DISTMX);
    let output = dir.path().join("clusters.tsv");
    sparseclust()
        .args(["--input", &input, "--output", output.to_str().unwrap(), "--cutoff", "0.6"])
        .assert()
        .success();
    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text, "0\tA\n0\tB\n0\tC\n1\tD\n1\tE\n");
}

#[test]
fn strict_cutoff() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), DISTMX);
    let output = dir.path().join("clusters.tsv");
    sparseclust()
        .args(["--input", &input, "--output", output.to_str().unwrap()])
        .args(["--cutoff", "0.02", "--includeequal", "false"])
        .assert()
        .success();
    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text, "0\tA\n0\tB\n1\tC\n2\tD\n3\tE\n");
}

#[test]
fn complete_linkage_per_cluster() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), DISTMX);
    let output = dir.path().join("clusters.tsv");
    sparseclust()
        .args(["--input", &input, "--output", output.to_str().unwrap()])
        .args(["--cutoff", "0.03", "--method", "exact"])
        .assert()
        .success();
    let text = fs::read_to_string(&output).unwrap();
    // A-C is absent, C can not join A and B
    assert_eq!(text, "0\tA, B\n1\tC\n2\tD\n3\tE\n");
}

#[test]
fn missing_required_flag() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), DISTMX);
    sparseclust()
        .args(["--input", &input, "--cutoff", "0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output"));
}

#[test]
fn bad_cutoff_and_bad_distance() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("clusters.tsv");
    let input = write_input(dir.path(), DISTMX);
    sparseclust()
        .args(["--input", &input, "--output", output.to_str().unwrap(), "--cutoff", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cutoff"));
    //
    let input = write_input(dir.path(), "A B 0.01\nB C x\n");
    sparseclust()
        .args(["--input", &input, "--output", output.to_str().unwrap(), "--cutoff", "0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("clusters.tsv");
    let input = dir.path().join("absent.txt");
    sparseclust()
        .args(["--input", input.to_str().unwrap(), "--output", output.to_str().unwrap()])
        .args(["--cutoff", "0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.txt"));
}
