use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("govhealth-validate").unwrap()
}

const EXPORT: &str = r#"{
    "organizations": [
        {
            "profile": {
                "id": "org-pass",
                "industry": "technology",
                "application_tier": "tier_2",
                "sla_target": 99.95
            },
            "findings": [
                { "id": "f1", "severity": "medium", "status": "open", "title": "patching cadence" }
            ]
        },
        {
            "profile": {
                "id": "org-fail",
                "application_tier": "tier_1",
                "sla_target": 98.0
            },
            "findings": [
                { "id": "f1", "severity": "critical", "status": "open", "title": "no audit trail" },
                { "id": "f2", "severity": "critical", "status": "open", "title": "no encryption" },
                { "id": "f3", "severity": "critical", "status": "open", "title": "shared credentials" },
                { "id": "f4", "severity": "critical", "status": "open", "title": "open egress" }
            ],
            "tech_stack": [
                { "name": "node", "version": "16.0.0", "major_versions_behind": 4 }
            ]
        }
    ]
}"#;

fn write_export(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn failing_export_exits_one_and_names_the_failure() {
    let export = write_export(EXPORT);
    cmd()
        .args(["--input", export.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(contains("org-fail"))
        .stdout(contains("FAIL"))
        .stdout(contains("2 organization(s) validated, 1 passed"));
}

#[test]
fn single_passing_organization_exits_zero() {
    let export = write_export(EXPORT);
    cmd()
        .args([
            "--input",
            export.path().to_str().unwrap(),
            "--org",
            "org-pass",
        ])
        .assert()
        .success()
        .stdout(contains("org-pass"))
        .stdout(contains("PASS"));
}

#[test]
fn json_output_is_machine_readable() {
    let export = write_export(EXPORT);
    let assert = cmd()
        .args([
            "--input",
            export.path().to_str().unwrap(),
            "--org",
            "org-pass",
            "--json",
        ])
        .assert()
        .success();

    let output = assert.get_output();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["ok"], true);
    assert_eq!(value["results"][0]["organization_id"], "org-pass");
    assert_eq!(value["results"][0]["health_index"]["grade"], "A");
}

#[test]
fn brief_suppresses_dimension_detail_but_keeps_issues() {
    let export = write_export(EXPORT);
    cmd()
        .args([
            "--input",
            export.path().to_str().unwrap(),
            "--org",
            "org-fail",
            "--brief",
        ])
        .assert()
        .code(1)
        .stdout(contains("issue:"))
        .stdout(contains("audit_readiness").not());
}

#[test]
fn unknown_organization_is_an_input_error() {
    let export = write_export(EXPORT);
    cmd()
        .args([
            "--input",
            export.path().to_str().unwrap(),
            "--org",
            "org-missing",
        ])
        .assert()
        .code(2)
        .stderr(contains("unknown organization"));
}

#[test]
fn unreadable_export_is_an_input_error() {
    cmd()
        .args(["--input", "/nonexistent/export.json"])
        .assert()
        .code(2)
        .stderr(contains("export"));
}
