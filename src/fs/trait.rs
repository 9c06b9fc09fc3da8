//! FileSystem trait definition

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Metadata about a file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub size: u64,
    pub file_type: FileType,
}

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

impl FileMetadata {
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn len(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }
}

/// Abstraction over the file operations used while staging a droplet
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Get file/directory metadata
    fn metadata(&self, path: &Path) -> Result<FileMetadata>;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Read file contents as raw bytes
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write a file, replacing any previous content. The parent must exist.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// List directory contents
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Create a directory and all of its missing parents
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Copy a single file to `to`, overwriting it if present
    fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;

    /// Set unix permission bits on a path
    fn set_mode(&self, path: &Path, mode: u32) -> Result<()>;

    /// Create an empty file, truncating it if it already exists
    fn touch(&self, path: &Path) -> Result<()> {
        self.write(path, &[])
    }

    /// Copy `from` into `dest_dir` under its own name, recursing into
    /// directories and merging with whatever is already there.
    fn copy_into(&self, from: &Path, dest_dir: &Path) -> Result<()> {
        let name = from
            .file_name()
            .ok_or_else(|| anyhow!("Cannot copy {:?}: path has no file name", from))?;
        let target = dest_dir.join(name);

        if self.is_dir(from) {
            self.create_dir_all(&target)?;
            for entry in self.read_dir(from)? {
                self.copy_into(entry.path(), &target)?;
            }
            Ok(())
        } else {
            self.copy_file(from, &target)
        }
    }
}
