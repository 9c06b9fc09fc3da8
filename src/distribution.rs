//! Placement of the JBoss runtime distribution into the sandbox.
//!
//! Resolving and downloading a distribution is handled upstream; the
//! implementations here either trust that the sandbox is already populated
//! or expand a local `.tar.gz` into it.

use crate::error::StagingError;
use crate::fs::FileSystem;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

pub const START_SCRIPT: &str = "bin/standalone.sh";

pub trait Distribution: Send + Sync {
    /// Places the runtime into `sandbox`
    fn install(&self, fs: &dyn FileSystem, sandbox: &Path) -> Result<()>;
}

/// The runtime was extracted into the sandbox by an earlier step
#[derive(Debug, Clone, Copy, Default)]
pub struct PreExtracted;

impl Distribution for PreExtracted {
    fn install(&self, fs: &dyn FileSystem, sandbox: &Path) -> Result<()> {
        let start_script = sandbox.join(START_SCRIPT);
        if !fs.is_file(&start_script) {
            return Err(StagingError::MissingRuntimeFile(start_script).into());
        }
        debug!(sandbox = %sandbox.display(), "Using pre-extracted distribution");
        Ok(())
    }
}

/// A gzipped tarball on local disk whose single top-level directory holds
/// the distribution, as JBoss and WildFly releases are packaged.
#[derive(Debug, Clone)]
pub struct Tarball {
    archive: PathBuf,
}

impl Tarball {
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        Self {
            archive: archive.into(),
        }
    }
}

/// Drops the archive's top-level directory and rejects anything that is
/// not a plain relative path.
fn strip_top_level(path: &Path) -> Result<Option<PathBuf>, StagingError> {
    let mut stripped = PathBuf::new();
    let mut top_level_seen = false;
    for component in path.components() {
        match component {
            Component::Normal(part) if top_level_seen => stripped.push(part),
            Component::Normal(_) => top_level_seen = true,
            Component::CurDir => {}
            _ => return Err(StagingError::UnsafeArchiveEntry(path.to_path_buf())),
        }
    }
    Ok((!stripped.as_os_str().is_empty()).then_some(stripped))
}

impl Distribution for Tarball {
    fn install(&self, fs: &dyn FileSystem, sandbox: &Path) -> Result<()> {
        info!(archive = %self.archive.display(), sandbox = %sandbox.display(), "Expanding distribution");

        let compressed = fs.read(&self.archive)?;
        let decoder = flate2::read::GzDecoder::new(&compressed[..]);
        let mut archive = tar::Archive::new(decoder);

        fs.create_dir_all(sandbox)?;

        let mut files = 0usize;
        for entry in archive
            .entries()
            .context(format!("Failed to read tar entries from {:?}", self.archive))?
        {
            let mut entry = entry.context("Failed to read tar entry")?;
            let path = entry
                .path()
                .context("Failed to get entry path")?
                .into_owned();

            let Some(relative) = strip_top_level(&path)? else {
                continue;
            };
            let dest = sandbox.join(&relative);
            let entry_type = entry.header().entry_type();

            if entry_type.is_dir() {
                fs.create_dir_all(&dest)?;
            } else if entry_type.is_file() {
                if let Some(parent) = dest.parent() {
                    fs.create_dir_all(parent)?;
                }
                let mut content = Vec::new();
                entry
                    .read_to_end(&mut content)
                    .context(format!("Failed to read {:?} from archive", path))?;
                fs.write(&dest, &content)?;
                let mode = entry.header().mode().context("Invalid mode in tar header")?;
                fs.set_mode(&dest, mode)?;
                files += 1;
            } else {
                debug!(entry = %path.display(), "Skipping non-regular archive entry");
            }
        }

        debug!(files, "Distribution expanded");
        Ok(())
    }
}
