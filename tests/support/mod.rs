//! Shared helpers for building droplets on disk

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SANDBOX: &str = ".java-buildpack/jboss";
pub const JAVA_HOME: &str = ".java-buildpack/open_jdk_jre";

pub const DEFAULT_STANDALONE_XML: &str = r#"<server>
    <subsystem xmlns="urn:jboss:domain:web:1.1">
        <virtual-server name="default-host" enable-welcome-root="true">
            <location name="/" handler="welcome-content"/>
        </virtual-server>
    </subsystem>
</server>
"#;

pub fn jboss_stage_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.join("jboss-stage")
}

pub fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// A droplet whose sandbox already holds an extracted runtime
pub fn droplet_with_runtime() -> TempDir {
    let dir = TempDir::new().unwrap();
    install_runtime(dir.path());
    dir
}

pub fn install_runtime(root: &Path) {
    let sandbox = root.join(SANDBOX);
    write(&sandbox, "bin/standalone.sh", "#!/bin/sh\n");
    write(
        &sandbox,
        "standalone/configuration/standalone.xml",
        DEFAULT_STANDALONE_XML,
    );
    fs::create_dir_all(sandbox.join("standalone/deployments")).unwrap();
    fs::create_dir_all(root.join(JAVA_HOME).join("bin")).unwrap();
}

pub fn deployments(root: &Path) -> PathBuf {
    root.join(SANDBOX).join("standalone/deployments")
}
