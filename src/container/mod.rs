//! The JBoss container: decides whether an application belongs on JBoss,
//! stages it into the runtime's deployment directory, and produces the
//! command that starts the server.
//!
//! Staging is a fixed, strictly ordered sequence of steps sharing one
//! [`Deployable`] classification:
//!
//! 1. install the distribution into the sandbox
//! 2. [`configuration::patch_configuration`]
//! 3. [`driver::install_driver`]
//! 4. [`staging::stage_application`]
//! 5. [`staging::place_libraries`]
//! 6. [`staging::write_marker`], always last
//!
//! The first failing step aborts the run. Nothing is rolled back.

pub mod configuration;
pub mod deployable;
pub mod driver;
pub mod jboss;
pub mod release;
pub mod staging;

pub use deployable::{classify, Deployable};
pub use jboss::JBoss;
pub use release::{launch_command, Release};

use crate::droplet::Droplet;
use crate::fs::FileSystem;
use anyhow::Result;

/// Lifecycle of a container component in the staging pipeline
pub trait Container: Send + Sync {
    fn name(&self) -> &str;

    /// Tag describing the container when it applies to the droplet
    fn detect(&self, fs: &dyn FileSystem, droplet: &Droplet) -> Result<Option<String>>;

    /// Prepares the droplet. Returns `None` when the container does not apply.
    fn compile(&self, fs: &dyn FileSystem, droplet: &Droplet) -> Result<Option<Deployable>>;

    /// Launch command for the prepared droplet
    fn release(&self, droplet: &mut Droplet) -> Result<Release>;
}
