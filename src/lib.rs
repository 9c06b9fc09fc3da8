//! jboss-stage - stages Java web applications onto a JBoss runtime
//!
//! Given an uploaded application (the droplet root), this library decides
//! whether it is a WAR or an EAR, lays it out inside a JBoss installation
//! and builds the shell command that starts the server.
//!
//! # Core Concepts
//!
//! - **Droplet**: the application directory plus the sandbox the runtime is
//!   installed into, and the launch environment collected while staging
//! - **Deployable**: the WAR or EAR classification that decides every
//!   deployment path
//! - **Container**: the detect / compile / release lifecycle, implemented
//!   by [`JBoss`]
//!
//! # Example Usage
//!
//! ```no_run
//! use jboss_stage::{Container, Droplet, JBoss, ManifestMainClass, PreExtracted, RealFileSystem};
//!
//! fn stage() -> anyhow::Result<()> {
//!     let fs = RealFileSystem;
//!     let jboss = JBoss::new(
//!         "7.1.1_Final",
//!         Box::new(PreExtracted),
//!         Box::new(ManifestMainClass::new()),
//!     );
//!
//!     let mut droplet = Droplet::open(
//!         &fs,
//!         "/tmp/app",
//!         ".java-buildpack/jboss",
//!         ".java-buildpack/open_jdk_jre",
//!     )?;
//!
//!     if jboss.compile(&fs, &droplet)?.is_some() {
//!         println!("{}", jboss.release(&mut droplet)?.command);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`container`]: classification, staging steps and the launch command
//! - [`distribution`]: getting the runtime into the sandbox
//! - [`droplet`]: the application snapshot and launch environment
//! - [`fs`]: filesystem abstraction with real and in-memory implementations

pub mod cli;
pub mod config;
pub mod container;
pub mod distribution;
pub mod droplet;
pub mod error;
pub mod fs;
pub mod main_class;
pub mod util;

pub use config::{ConfigError, StageConfig};
pub use container::{Container, Deployable, JBoss, Release};
pub use distribution::{Distribution, PreExtracted, Tarball};
pub use droplet::{Application, Droplet};
pub use error::StagingError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use main_class::{MainClassDetector, ManifestMainClass};
pub use util::{config_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_jboss_stage() {
        assert_eq!(NAME, "jboss-stage");
    }
}
