//! Configuration for jboss-stage
//!
//! Settings are read from an optional YAML file, then overridden by
//! environment variables, then by command-line flags. Anything left unset
//! falls back to the defaults below.
//!
//! # Environment Variables
//!
//! - `JBOSS_STAGE_VERSION`: runtime version reported by `detect` - default: "7.1.1_Final"
//! - `JBOSS_STAGE_SANDBOX`: sandbox directory, relative to the droplet root - default: ".java-buildpack/jboss"
//! - `JBOSS_STAGE_JAVA_HOME`: JRE directory, relative to the droplet root - default: ".java-buildpack/open_jdk_jre"
//! - `JBOSS_STAGE_MAIN_CLASS`: explicit main class (disqualifies WAR applications)
//! - `JBOSS_STAGE_DISTRIBUTION`: local `.tar.gz` holding the runtime
//! - `JBOSS_STAGE_ADDITIONAL_LIBRARIES`: `PATH`-style list of extra library jars
//! - `JBOSS_STAGE_LOG_LEVEL`: logging level - default: "info"
//!
//! # Example
//!
//! ```yaml
//! version: 7.1.1_Final
//! sandbox: .java-buildpack/jboss
//! additional_libraries:
//!   - /tmp/buildpack/lib/client-certificate-mapper.jar
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

const DEFAULT_VERSION: &str = "7.1.1_Final";
const DEFAULT_SANDBOX: &str = ".java-buildpack/jboss";
const DEFAULT_JAVA_HOME: &str = ".java-buildpack/open_jdk_jre";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageConfig {
    /// Runtime version, reported in the detect tag
    pub version: String,

    /// Sandbox directory relative to the droplet root
    pub sandbox: PathBuf,

    /// JRE directory relative to the droplet root
    pub java_home: PathBuf,

    /// Main class configured for the application, if any
    pub java_main_class: Option<String>,

    /// Local distribution tarball; when unset the sandbox must already
    /// contain an extracted runtime
    pub distribution: Option<PathBuf>,

    /// Libraries added to every deployment
    pub additional_libraries: Vec<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            sandbox: PathBuf::from(DEFAULT_SANDBOX),
            java_home: PathBuf::from(DEFAULT_JAVA_HOME),
            java_main_class: None,
            distribution: None,
            additional_libraries: Vec::new(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl StageConfig {
    /// Loads the file at `path` (or the defaults) and applies environment
    /// overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(version) = env::var("JBOSS_STAGE_VERSION") {
            self.version = version;
        }
        if let Ok(sandbox) = env::var("JBOSS_STAGE_SANDBOX") {
            self.sandbox = PathBuf::from(sandbox);
        }
        if let Ok(java_home) = env::var("JBOSS_STAGE_JAVA_HOME") {
            self.java_home = PathBuf::from(java_home);
        }
        if let Ok(main_class) = env::var("JBOSS_STAGE_MAIN_CLASS") {
            self.java_main_class = Some(main_class);
        }
        if let Ok(distribution) = env::var("JBOSS_STAGE_DISTRIBUTION") {
            self.distribution = Some(PathBuf::from(distribution));
        }
        if let Some(libraries) = env::var_os("JBOSS_STAGE_ADDITIONAL_LIBRARIES") {
            self.additional_libraries = env::split_paths(&libraries)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }
        if let Ok(level) = env::var("JBOSS_STAGE_LOG_LEVEL") {
            self.log_level = level.to_lowercase();
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "version must not be empty".to_string(),
            ));
        }

        validate_relative("sandbox", &self.sandbox)?;
        validate_relative("java_home", &self.java_home)?;

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }
}

/// Sandbox-like paths must name a directory strictly below the droplet root
fn validate_relative(field: &str, path: &Path) -> Result<(), ConfigError> {
    if !path.components().any(|c| matches!(c, Component::Normal(_))) {
        return Err(ConfigError::ValidationFailed(format!(
            "{} must name a directory below the droplet root, got {:?}",
            field, path
        )));
    }
    if !path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir)) {
        return Err(ConfigError::ValidationFailed(format!(
            "{} must be a relative path inside the droplet, got {}",
            field,
            path.display()
        )));
    }
    Ok(())
}
