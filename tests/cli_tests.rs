//! Command-line Test Suite
//!
//! Runs the compiled binary against the embedded knowledge base and against
//! custom knowledge base files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const CUSTOM_KB: &str = r#"{
  "diseases": [
    {"name": "Flu", "required": ["fever", "cough"], "optional": ["fatigue"], "exclusions": ["pneumonia"]},
    {"name": "Cold", "required": ["runny_nose", "sneezing"]}
  ],
  "synonyms": {"high temperature": "fever"}
}"#;

fn solver() -> Command {
    Command::cargo_bin("symptom-solver").expect("binary is built")
}

fn write_kb(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".json").expect("temp file");
    file.write_all(contents.as_bytes()).expect("write knowledge base");
    file
}

#[test]
fn test_diagnose_forward_text() {
    let kb = write_kb(CUSTOM_KB);
    solver()
        .args(["diagnose", "High Temperature", "cough", "--knowledge-base"])
        .arg(kb.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 Flu\n   Score: 80.00%"));
}

#[test]
fn test_diagnose_forward_json() {
    let kb = write_kb(CUSTOM_KB);
    let output = solver()
        .args(["--format", "json", "diagnose", "fever", "cough", "fatigue"])
        .arg("--knowledge-base")
        .arg(kb.path())
        .output()
        .expect("command runs");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(json["results"][0]["disease"], "Flu");
    assert_eq!(json["results"][0]["score"], serde_json::json!(1.0));
    assert_eq!(json["results"][0]["method"], "Forward Chaining");
}

#[test]
fn test_diagnose_backward_possible() {
    let kb = write_kb(CUSTOM_KB);
    solver()
        .args(["diagnose", "fever", "cough", "--mode", "backward", "--goal", "Flu"])
        .arg("--knowledge-base")
        .arg(kb.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Flu (POSSIBLE)"))
        .stdout(predicate::str::contains("Backward Chaining (Goal: Flu)"));
}

#[test]
fn test_diagnose_backward_unknown_goal() {
    let kb = write_kb(CUSTOM_KB);
    solver()
        .args(["diagnose", "fever", "--mode", "backward", "--goal", "Malaria"])
        .arg("--knowledge-base")
        .arg(kb.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Disease not in KB"));
}

#[test]
fn test_diagnose_backward_requires_goal() {
    solver()
        .args(["diagnose", "fever", "--mode", "backward"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Goal required for backward"));
}

#[test]
fn test_diagnose_reads_stdin() {
    let kb = write_kb(CUSTOM_KB);
    solver()
        .args(["--format", "tsv", "diagnose", "-", "--knowledge-base"])
        .arg(kb.path())
        .write_stdin("runny nose, sneezing\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cold\tForward Chaining\t1.0000"));
}

#[test]
fn test_diagnose_no_matches() {
    solver()
        .args(["diagnose", "completely_unknown_symptom"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No matching diseases found."));
}

#[test]
fn test_degenerate_knowledge_base_rejected() {
    let kb = write_kb(r#"{"diseases": [{"name": "Ghost", "required": []}], "synonyms": {}}"#);
    solver()
        .args(["diagnose", "fever", "--knowledge-base"])
        .arg(kb.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Disease 'Ghost' has no required or optional symptoms",
        ));
}

#[test]
fn test_knowledge_list_embedded() {
    solver()
        .args(["knowledge", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Knowledge Base"))
        .stdout(predicate::str::contains("Flu"));
}

#[test]
fn test_knowledge_show_missing() {
    solver()
        .args(["knowledge", "show", "Malaria"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Disease not found: Malaria"));
}

#[test]
fn test_knowledge_export_round_trip() {
    let kb = write_kb(CUSTOM_KB);
    let dir = tempfile::tempdir().expect("temp dir");
    let out = dir.path().join("export.json");

    solver()
        .args(["knowledge", "export"])
        .arg(&out)
        .arg("--knowledge-base")
        .arg(kb.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 diseases"));

    let reloaded = symptom_solver::KnowledgeBase::load_from_file(&out).expect("reloadable export");
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.synonyms().resolve("high temperature"), "fever");
}
