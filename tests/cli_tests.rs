//! End-to-end CLI tests driven through the compiled binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cloudplan_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cloudplan").unwrap();
    cmd.current_dir(dir);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Writes a project config and a dev stack file into `dir`.
fn write_project(dir: &Path) {
    fs::write(
        dir.join("cloudplan.toml"),
        r#"[defaults]
project = "demo"
stack = "dev"
stacks_dir = "stacks"
"#,
    )
    .unwrap();

    fs::create_dir_all(dir.join("stacks")).unwrap();
    fs::write(
        dir.join("stacks/dev.yaml"),
        r#"config:
  resource_group: demo-rg
  team: platform
secrets:
  adminPassword: env:VM_ADMIN_PASSWORD
"#,
    )
    .unwrap();
}

#[test]
fn list_shows_builtin_blueprints() {
    let dir = tempdir().unwrap();
    cloudplan_cmd(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("aws-serverless-api"))
        .stdout(predicate::str::contains("aws-static-site"))
        .stdout(predicate::str::contains("azure-vm-network"))
        .stdout(predicate::str::contains("azure-static-site"));
}

#[test]
fn render_emits_a_json_manifest() {
    let dir = tempdir().unwrap();
    write_project(dir.path());

    let output = cloudplan_cmd(dir.path())
        .args(["render", "aws-serverless-api"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let manifest: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(manifest["version"], 1);
    assert_eq!(manifest["project"], "demo");
    assert_eq!(manifest["stack"], "dev");
    assert_eq!(manifest["resources"].as_array().unwrap().len(), 16);
}

#[test]
fn render_writes_yaml_to_a_file() {
    let dir = tempdir().unwrap();
    write_project(dir.path());

    cloudplan_cmd(dir.path())
        .args([
            "render",
            "azure-static-site",
            "--format",
            "yaml",
            "--output",
            "manifest.yaml",
        ])
        .assert()
        .success();

    let rendered = fs::read_to_string(dir.path().join("manifest.yaml")).unwrap();
    assert!(rendered.contains("name: sa"));
    assert!(rendered.contains("staticEndpoint"));
}

#[test]
fn render_vm_manifest_keeps_the_password_a_reference() {
    let dir = tempdir().unwrap();
    write_project(dir.path());

    cloudplan_cmd(dir.path())
        .args(["render", "azure-vm-network"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$secret"))
        .stdout(predicate::str::contains("env:VM_ADMIN_PASSWORD"));
}

#[test]
fn validate_reports_resource_and_edge_counts() {
    let dir = tempdir().unwrap();
    write_project(dir.path());

    cloudplan_cmd(dir.path())
        .args(["validate", "azure-vm-network", "--show-order"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no cycles"))
        .stdout(predicate::str::contains("serverVm"));
}

#[test]
fn graph_emits_dot() {
    let dir = tempdir().unwrap();
    write_project(dir.path());

    cloudplan_cmd(dir.path())
        .args(["graph", "aws-serverless-api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph"))
        .stdout(predicate::str::contains("publicHttpApi"));
}

#[test]
fn unknown_blueprint_fails_with_blueprint_exit_code() {
    let dir = tempdir().unwrap();
    write_project(dir.path());

    cloudplan_cmd(dir.path())
        .args(["render", "no-such-blueprint"])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("no-such-blueprint"));
}

#[test]
fn missing_stack_config_fails_with_config_exit_code() {
    let dir = tempdir().unwrap();
    // No stack file at all: the VM blueprint needs resource_group.
    fs::write(
        dir.path().join("cloudplan.toml"),
        "[defaults]\nproject = \"demo\"\n",
    )
    .unwrap();

    cloudplan_cmd(dir.path())
        .args(["render", "azure-vm-network"])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("resource_group"));
}

#[test]
fn configured_log_level_raises_the_base_filter() {
    let dir = tempdir().unwrap();
    write_project(dir.path());
    fs::write(
        dir.path().join("cloudplan.toml"),
        r#"[defaults]
project = "demo"

[logging]
log_level = "info"
"#,
    )
    .unwrap();

    // No -v flag: the configured level alone must enable the info event
    // emitted when the manifest is captured.
    cloudplan_cmd(dir.path())
        .args(["render", "azure-static-site"])
        .assert()
        .success()
        .stderr(predicate::str::contains("captured manifest"));
}

#[test]
fn default_log_level_stays_quiet() {
    let dir = tempdir().unwrap();
    write_project(dir.path());

    cloudplan_cmd(dir.path())
        .args(["render", "azure-static-site"])
        .assert()
        .success()
        .stderr(predicate::str::contains("captured manifest").not());
}

#[test]
fn explicit_stack_flag_selects_the_stack_file() {
    let dir = tempdir().unwrap();
    write_project(dir.path());
    fs::write(
        dir.path().join("stacks/prod.yaml"),
        "config:\n  resource_group: prod-rg\nsecrets:\n  adminPassword: env:PROD_PASSWORD\n",
    )
    .unwrap();

    let output = cloudplan_cmd(dir.path())
        .args(["render", "azure-vm-network", "--stack", "prod"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let manifest: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(manifest["stack"], "prod");
    assert_eq!(manifest["secrets"]["adminPassword"], "env:PROD_PASSWORD");
}
