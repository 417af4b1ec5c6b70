//! End-to-end tests for the varanno binary
//!
//! These run the compiled binary against a wiremock VEP server and check:
//! - report contents and summary output
//! - overwrite protection
//! - fatal input errors and exit codes

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn varanno() -> Command {
    let mut cmd = Command::cargo_bin("varanno").unwrap();
    cmd.env_remove("VARANNO_SERVER_URL")
        .env_remove("VARANNO_LOG_LEVEL")
        .env_remove("VARANNO_LOG_OUTPUT")
        .env("NO_COLOR", "1")
        .arg("--pacing-delay-ms")
        .arg("0")
        .arg("--retry-delay-secs")
        .arg("0");
    cmd
}

#[tokio::test]
async fn test_annotate_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vep/human/id/rs699"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "start": 230710048,
            "end": 230710048,
            "most_severe_consequence": "missense_variant",
            "transcript_consequences": [
                {"gene_symbol": "AGT", "biotype": "protein_coding"},
                {"gene_symbol": "AGT", "biotype": "nonsense_mediated_decay"}
            ]
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/vep/human/id/rs1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ids.txt");
    let output = dir.path().join("annotations.tsv");
    std::fs::write(&input, "rs699\nrs1\n").unwrap();

    varanno()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("-a")
        .arg("biotype")
        .arg("--max-retries")
        .arg("2")
        .arg("--server-url")
        .arg(mock_server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total identifiers: 2"))
        .stdout(predicate::str::contains("Successfully annotated: 1"))
        .stdout(predicate::str::contains("Failure rate: 50.0%"));

    let report = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines[0],
        "identifier\tstart\tend\tmost_severe_consequence\tgene_symbols\tbiotype"
    );
    assert_eq!(
        lines[1],
        "rs699\t230710048\t230710048\tmissense_variant\tAGT\tprotein_coding"
    );
    assert_eq!(lines[2], "rs1\t\t\t\t\t");
}

#[tokio::test]
async fn test_existing_output_requires_force() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ids.txt");
    let output = dir.path().join("annotations.tsv");
    std::fs::write(&input, "rs699\n").unwrap();
    std::fs::write(&output, "previous run").unwrap();

    varanno()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous run");
}

#[test]
fn test_missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    varanno()
        .arg("-i")
        .arg(dir.path().join("missing.txt"))
        .arg("-o")
        .arg(dir.path().join("out.tsv"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot read input file"));
}

#[test]
fn test_help_lists_flags() {
    Command::cargo_bin("varanno")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--additional-field"))
        .stdout(predicate::str::contains("--max-retries"))
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn test_markdown_help_prints_reference_without_paths() {
    Command::cargo_bin("varanno")
        .unwrap()
        .arg("--markdown-help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--max-retries"))
        .stdout(predicate::str::contains("--additional-field"));
}

#[test]
fn test_markdown_help_is_hidden_from_help() {
    Command::cargo_bin("varanno")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--markdown-help").not());
}
