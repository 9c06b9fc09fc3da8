use crate::droplet::Application;
use crate::fs::FileSystem;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const MARIADB_JAR: &str = "lib/mariadb-java-client-2.3.0.jar";
pub const MARIADB_MODULE_XML: &str = "META-INF/cf/module.xml";
pub const MARIADB_MODULE_DIR: &str = "modules/system/layers/base/org/mariadb/mariadb-java-client/main/";

pub fn module_dir(sandbox: &Path) -> PathBuf {
    sandbox.join(MARIADB_MODULE_DIR)
}

/// Registers a bundled MariaDB driver as a JBoss module. The module
/// directory is always created; the jar and its descriptor are copied
/// independently when the application ships them.
pub fn install_driver(fs: &dyn FileSystem, application: &Application, sandbox: &Path) -> Result<()> {
    let destination = module_dir(sandbox);
    fs.create_dir_all(&destination)?;

    for relative in [MARIADB_JAR, MARIADB_MODULE_XML] {
        let source = application.path(relative);
        if fs.exists(&source) {
            info!(source = %source.display(), "Installing MariaDB driver module file");
            fs.copy_into(&source, &destination)?;
        } else {
            debug!(path = relative, "No bundled driver file");
        }
    }

    Ok(())
}
