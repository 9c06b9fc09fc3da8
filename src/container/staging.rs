use super::deployable::{deployments, Deployable};
use crate::droplet::Application;
use crate::fs::FileSystem;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Copies every top-level entry of the application into the deployment
/// root, merging with anything already there.
pub fn stage_application(
    fs: &dyn FileSystem,
    application: &Application,
    sandbox: &Path,
    deployable: Deployable,
) -> Result<()> {
    let root = deployable.deployment_root(sandbox);
    info!(deployment = %root.display(), "Staging application as {}", deployable);

    fs.create_dir_all(&root)?;
    for child in application.children() {
        debug!(entry = %child.display(), "Copying application entry");
        fs.copy_into(child, &root)?;
    }

    Ok(())
}

/// Copies the additional libraries, in order, into the deployable's library
/// directory. The first failure stops the remaining copies.
pub fn place_libraries(
    fs: &dyn FileSystem,
    libraries: &[PathBuf],
    sandbox: &Path,
    deployable: Deployable,
) -> Result<()> {
    if libraries.is_empty() {
        return Ok(());
    }

    let destination = deployable.libraries(sandbox);
    fs.create_dir_all(&destination)?;

    for library in libraries {
        debug!(library = %library.display(), destination = %destination.display(), "Adding library");
        fs.copy_into(library, &destination)?;
    }
    info!(count = libraries.len(), "Added additional libraries");

    Ok(())
}

/// Signals the deployment scanner. Must be the last write of a staging run.
pub fn write_marker(fs: &dyn FileSystem, sandbox: &Path, deployable: Deployable) -> Result<()> {
    let scan_dir = deployments(sandbox);
    fs.create_dir_all(&scan_dir)?;

    let marker = deployable.marker(sandbox);
    fs.touch(&marker)?;
    info!(marker = %marker.display(), "Marked deployment for auto-deploy");

    Ok(())
}
