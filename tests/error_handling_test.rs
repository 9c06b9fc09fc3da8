//! Error handling integration tests
//!
//! Covers the failure modes of a staging run:
//! - Missing application directory
//! - Runtime files absent from the sandbox
//! - Unreadable additional libraries
//! - Malformed distribution archives
//! - Configuration errors

mod support;

use jboss_stage::config::{ConfigError, StageConfig};
use jboss_stage::{
    Container, Droplet, JBoss, ManifestMainClass, PreExtracted, RealFileSystem, StagingError,
    Tarball,
};
use std::fs;
use std::path::PathBuf;
use support::{deployments, droplet_with_runtime, write, JAVA_HOME, SANDBOX};
use tempfile::TempDir;

fn jboss() -> JBoss {
    JBoss::new(
        "7.1.1_Final",
        Box::new(PreExtracted),
        Box::new(ManifestMainClass::new()),
    )
}

#[test]
fn test_missing_application_root() {
    let result = Droplet::open(
        &RealFileSystem,
        "/nonexistent/jboss-stage/app",
        SANDBOX,
        JAVA_HOME,
    );
    assert!(result.is_err());
}

#[test]
fn test_missing_start_script_aborts_before_staging() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "WEB-INF/web.xml", "<web-app/>");
    fs::create_dir_all(root.join(SANDBOX)).unwrap();

    let droplet = Droplet::open(&RealFileSystem, root, SANDBOX, JAVA_HOME).unwrap();
    let err = jboss().compile(&RealFileSystem, &droplet).unwrap_err();

    match err.downcast_ref::<StagingError>() {
        Some(StagingError::MissingRuntimeFile(path)) => {
            assert!(path.ends_with("bin/standalone.sh"));
        }
        other => panic!("Expected MissingRuntimeFile, got {:?}", other),
    }
    assert!(!deployments(root).join("ROOT.war").exists());
}

#[test]
fn test_missing_standalone_xml_is_fatal() {
    let dir = droplet_with_runtime();
    let root = dir.path();
    write(root, "WEB-INF/web.xml", "<web-app/>");
    fs::remove_file(
        root.join(SANDBOX)
            .join("standalone/configuration/standalone.xml"),
    )
    .unwrap();

    let droplet = Droplet::open(&RealFileSystem, root, SANDBOX, JAVA_HOME).unwrap();
    let err = jboss().compile(&RealFileSystem, &droplet).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<StagingError>(),
        Some(StagingError::MissingRuntimeFile(_))
    ));
    assert!(!deployments(root).join("ROOT.war.dodeploy").exists());
}

#[test]
fn test_missing_library_leaves_no_marker() {
    let dir = droplet_with_runtime();
    let root = dir.path();
    write(root, "WEB-INF/web.xml", "<web-app/>");

    let droplet = Droplet::open(&RealFileSystem, root, SANDBOX, JAVA_HOME)
        .unwrap()
        .with_additional_libraries(vec![PathBuf::from("/nonexistent/extra.jar")]);
    let result = jboss().compile(&RealFileSystem, &droplet);

    assert!(result.is_err());
    assert!(deployments(root).join("ROOT.war").is_dir());
    assert!(!deployments(root).join("ROOT.war.dodeploy").exists());
}

#[test]
fn test_corrupt_distribution_archive() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "WEB-INF/web.xml", "<web-app/>");
    let downloads = TempDir::new().unwrap();
    let archive = write(downloads.path(), "not-a-tarball.tar.gz", "garbage");

    let container = JBoss::new(
        "7.1.1_Final",
        Box::new(Tarball::new(&archive)),
        Box::new(ManifestMainClass::new()),
    );
    let droplet = Droplet::open(&RealFileSystem, root, SANDBOX, JAVA_HOME).unwrap();

    assert!(container.compile(&RealFileSystem, &droplet).is_err());
    assert!(!deployments(root).join("ROOT.war").exists());
}

#[test]
fn test_missing_distribution_archive() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "META-INF/application.xml", "<application/>");

    let container = JBoss::new(
        "7.1.1_Final",
        Box::new(Tarball::new("/nonexistent/jboss.tar.gz")),
        Box::new(ManifestMainClass::new()),
    );
    let droplet = Droplet::open(&RealFileSystem, root, SANDBOX, JAVA_HOME).unwrap();

    let err = container.compile(&RealFileSystem, &droplet).unwrap_err();
    assert!(format!("{:#}", err).contains("jboss.tar.gz"));
}

#[test]
fn test_config_file_not_found() {
    let result = StageConfig::load(Some(PathBuf::from("/nonexistent/stage.yml").as_path()));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn test_config_invalid_yaml() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "stage.yml", "sandbox: [unterminated");

    let result = StageConfig::from_file(&path);
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn test_config_absolute_sandbox_rejected() {
    let config = StageConfig {
        sandbox: PathBuf::from("/opt/jboss"),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("sandbox"));
}
