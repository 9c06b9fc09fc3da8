use super::{DirEntry, FileMetadata, FileSystem, FileType};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn file_type_of(meta: &fs::Metadata) -> FileType {
    if meta.is_file() {
        FileType::File
    } else if meta.is_dir() {
        FileType::Directory
    } else {
        FileType::Symlink
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn metadata(&self, path: &Path) -> Result<FileMetadata> {
        let meta = fs::metadata(path).context(format!("Failed to get metadata for {:?}", path))?;

        Ok(FileMetadata {
            size: meta.len(),
            file_type: file_type_of(&meta),
        })
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).context(format!("Failed to read file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents).context(format!("Failed to write file {:?}", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let entries = fs::read_dir(path).context(format!("Failed to read directory {:?}", path))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            let file_type = if path.is_file() {
                FileType::File
            } else if path.is_dir() {
                FileType::Directory
            } else {
                FileType::Symlink
            };

            result.push(DirEntry {
                path,
                name,
                file_type,
            });
        }

        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).context(format!("Failed to create directory {:?}", path))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        fs::copy(from, to).context(format!("Failed to copy {:?} to {:?}", from, to))?;
        Ok(())
    }

    #[cfg(unix)]
    fn set_mode(&self, path: &Path, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .context(format!("Failed to set permissions on {:?}", path))
    }

    #[cfg(not(unix))]
    fn set_mode(&self, _path: &Path, _mode: u32) -> Result<()> {
        Ok(())
    }

    fn copy_into(&self, from: &Path, dest_dir: &Path) -> Result<()> {
        let name = from
            .file_name()
            .ok_or_else(|| anyhow!("Cannot copy {:?}: path has no file name", from))?;
        let target = dest_dir.join(name);

        if !from.is_dir() {
            return self.copy_file(from, &target);
        }

        // Links below `from` are recreated as links, never followed
        for entry in WalkDir::new(from).follow_links(false) {
            let entry = entry.context(format!("Failed to walk {:?}", from))?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .context(format!("Entry {:?} escaped {:?}", entry.path(), from))?;
            let dest = target.join(relative);

            if entry.file_type().is_dir() {
                self.create_dir_all(&dest)?;
            } else if entry.path_is_symlink() {
                copy_symlink(entry.path(), &dest)?;
            } else {
                self.copy_file(entry.path(), &dest)?;
            }
        }

        Ok(())
    }
}

#[cfg(unix)]
fn copy_symlink(link: &Path, dest: &Path) -> Result<()> {
    let target = fs::read_link(link).context(format!("Failed to read link {:?}", link))?;
    if fs::symlink_metadata(dest).is_ok() {
        fs::remove_file(dest).context(format!("Failed to replace {:?}", dest))?;
    }
    std::os::unix::fs::symlink(&target, dest)
        .context(format!("Failed to link {:?} to {:?}", dest, target))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, dest: &Path) -> Result<()> {
    fs::copy(link, dest).context(format!("Failed to copy {:?} to {:?}", link, dest))?;
    Ok(())
}
