//! CLI integration tests
//!
//! Runs the built binary and checks:
//! - Help and version output
//! - Detect output and exit codes
//! - Compile and release against a staged droplet
//! - Configuration file handling

mod support;

use std::process::Command;
use support::{deployments, droplet_with_runtime, jboss_stage_binary, write};
use tempfile::TempDir;

fn jboss_stage() -> Command {
    let mut command = Command::new(jboss_stage_binary());
    for var in [
        "JBOSS_STAGE_VERSION",
        "JBOSS_STAGE_SANDBOX",
        "JBOSS_STAGE_JAVA_HOME",
        "JBOSS_STAGE_MAIN_CLASS",
        "JBOSS_STAGE_DISTRIBUTION",
        "JBOSS_STAGE_ADDITIONAL_LIBRARIES",
        "JBOSS_STAGE_LOG_LEVEL",
        "RUST_LOG",
    ] {
        command.env_remove(var);
    }
    command
}

#[test]
fn test_cli_help() {
    let output = jboss_stage()
        .arg("--help")
        .output()
        .expect("Failed to execute jboss-stage");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("jboss-stage"));
    assert!(stdout.contains("detect"));
    assert!(stdout.contains("compile"));
    assert!(stdout.contains("release"));
}

#[test]
fn test_cli_version() {
    let output = jboss_stage()
        .arg("--version")
        .output()
        .expect("Failed to execute jboss-stage");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_detect_war_prints_tag() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "WEB-INF/web.xml", "<web-app/>");

    let output = jboss_stage()
        .arg("detect")
        .arg(dir.path())
        .output()
        .expect("Failed to execute jboss-stage");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "jboss=7.1.1_Final"
    );
}

#[test]
fn test_detect_not_applicable_exit_code() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app.jar", "jar");

    let output = jboss_stage()
        .arg("detect")
        .arg(dir.path())
        .output()
        .expect("Failed to execute jboss-stage");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_detect_json_format() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "META-INF/application.xml", "<application/>");

    let output = jboss_stage()
        .args(["detect", "--format", "json"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute jboss-stage");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["deployable"], "ear");
    assert_eq!(value["tag"], "jboss=7.1.1_Final");
}

#[test]
fn test_detect_respects_config_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "WEB-INF/web.xml", "<web-app/>");
    let config_dir = TempDir::new().unwrap();
    let config = write(
        config_dir.path(),
        "stage.yml",
        "version: 8.2.1_Final\njava_main_class: com.example.Main\n",
    );

    let output = jboss_stage()
        .arg("--config")
        .arg(&config)
        .arg("detect")
        .arg(dir.path())
        .output()
        .expect("Failed to execute jboss-stage");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_config_file_exit_code() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "stage.yml", "unknown_key: true\n");

    let output = jboss_stage()
        .arg("--config")
        .arg(&config)
        .arg("detect")
        .arg(dir.path())
        .output()
        .expect("Failed to execute jboss-stage");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_compile_and_release() {
    let dir = droplet_with_runtime();
    let root = dir.path();
    write(root, "WEB-INF/web.xml", "<web-app/>");
    let libs = TempDir::new().unwrap();
    let extra = write(libs.path(), "extra.jar", "extra");

    let compile = jboss_stage()
        .arg("compile")
        .arg(root)
        .arg("--library")
        .arg(&extra)
        .output()
        .expect("Failed to execute jboss-stage");
    assert_eq!(
        compile.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&compile.stderr)
    );
    assert!(deployments(root).join("ROOT.war.dodeploy").is_file());
    assert!(deployments(root)
        .join("ROOT.war/WEB-INF/lib/extra.jar")
        .is_file());

    let release = jboss_stage()
        .arg("release")
        .arg(root)
        .output()
        .expect("Failed to execute jboss-stage");
    assert!(release.status.success());
    let command = String::from_utf8_lossy(&release.stdout);
    assert!(command.contains("-Djboss.http.port=$PORT"));
    assert!(command
        .trim()
        .ends_with("exec $PWD/.java-buildpack/jboss/bin/standalone.sh -b 0.0.0.0"));
}

#[test]
fn test_compile_without_runtime_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "WEB-INF/web.xml", "<web-app/>");

    let output = jboss_stage()
        .arg("compile")
        .arg(dir.path())
        .output()
        .expect("Failed to execute jboss-stage");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_release_yaml_format() {
    let dir = droplet_with_runtime();

    let output = jboss_stage()
        .args(["release", "--format", "yaml"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute jboss-stage");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("command:"));
    assert!(stdout.contains("java_opts:"));
}

#[test]
fn test_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "WEB-INF/web.xml", "<web-app/>");

    let output = jboss_stage()
        .args(["--log-level", "debug", "detect"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute jboss-stage");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "jboss=7.1.1_Final"
    );
}
