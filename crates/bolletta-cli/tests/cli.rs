//! End-to-end tests for the bolletta CLI.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const ENEL_SAMPLE: &str = "\
Enel Energia SpA - Mercato libero dell'energia
N° Cliente 105627590
Codice Fiscale NGLDIA74A56I293T
Codice POD IT001E83788734
Gentile IDA ANGELINO
La fornitura di energia elettrica e attiva in
Via Diaz Armando 100 81031 Aversa CE
Consumo 50.729kWh consumi rilevati
";

fn bolletta() -> Command {
    Command::cargo_bin("bolletta").unwrap()
}

#[test]
fn test_process_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bill.txt");
    fs::write(&input, ENEL_SAMPLE).unwrap();

    bolletta()
        .args(["process", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"))
        .stdout(predicate::str::contains("\"pod\": \"IT001E83788734\""))
        .stdout(predicate::str::contains("\"provider\": \"enel\""));
}

#[test]
fn test_process_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bill.txt");
    fs::write(&input, ENEL_SAMPLE).unwrap();

    bolletta()
        .args(["process", input.to_str().unwrap(), "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IT001E83788734"))
        .stdout(predicate::str::contains("Aversa"));
}

#[test]
fn test_process_empty_file_is_a_success_with_zero_confidence() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    fs::write(&input, "").unwrap();

    bolletta()
        .args(["process", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"))
        .stdout(predicate::str::contains("\"confidence\": 0"));
}

#[test]
fn test_process_missing_file_fails() {
    bolletta()
        .args(["process", "/nonexistent/bill.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_batch_summary() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), ENEL_SAMPLE).unwrap();
    fs::write(dir.path().join("b.txt"), "nessun dato in questo file").unwrap();
    let out_dir = dir.path().join("out");

    let pattern = format!("{}/*.txt", dir.path().display());
    bolletta()
        .args([
            "batch",
            &pattern,
            "--output-dir",
            out_dir.to_str().unwrap(),
            "--summary",
        ])
        .assert()
        .success();

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("IT001E83788734"));

    assert!(out_dir.join("a.json").exists());
    assert!(out_dir.join("b.json").exists());
}
