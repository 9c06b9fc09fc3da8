use std::path::PathBuf;
use thiserror::Error;

/// Typed staging failures. Everything else surfaces as an `anyhow::Error`
/// carrying the path that failed.
#[derive(Error, Debug)]
pub enum StagingError {
    #[error("Runtime file missing from sandbox: {0}")]
    MissingRuntimeFile(PathBuf),
    #[error("Path {path} is not inside droplet root {root}")]
    OutsideDropletRoot { path: PathBuf, root: PathBuf },
    #[error("Archive entry escapes the sandbox: {0}")]
    UnsafeArchiveEntry(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_runtime_file_message() {
        let err = StagingError::MissingRuntimeFile(PathBuf::from(
            "/sandbox/standalone/configuration/standalone.xml",
        ));
        assert_eq!(
            err.to_string(),
            "Runtime file missing from sandbox: /sandbox/standalone/configuration/standalone.xml"
        );
    }

    #[test]
    fn test_outside_root_message() {
        let err = StagingError::OutsideDropletRoot {
            path: PathBuf::from("/opt/jboss"),
            root: PathBuf::from("/home/vcap/app"),
        };
        assert!(err.to_string().contains("/opt/jboss"));
        assert!(err.to_string().contains("/home/vcap/app"));
    }
}
