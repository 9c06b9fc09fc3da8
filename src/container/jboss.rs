use super::configuration::patch_configuration;
use super::deployable::{classify, Deployable};
use super::driver::install_driver;
use super::release::{launch_command, Release};
use super::staging::{place_libraries, stage_application, write_marker};
use super::Container;
use crate::distribution::Distribution;
use crate::droplet::Droplet;
use crate::fs::FileSystem;
use crate::main_class::MainClassDetector;
use anyhow::Result;
use tracing::info;

pub struct JBoss {
    version: String,
    distribution: Box<dyn Distribution>,
    detector: Box<dyn MainClassDetector>,
}

impl JBoss {
    pub fn new(
        version: impl Into<String>,
        distribution: Box<dyn Distribution>,
        detector: Box<dyn MainClassDetector>,
    ) -> Self {
        Self {
            version: version.into(),
            distribution,
            detector,
        }
    }

    /// Tag printed by `detect`, e.g. `jboss=7.1.1_Final`
    pub fn tag(&self) -> String {
        format!("jboss={}", self.version)
    }

    pub fn classify(&self, fs: &dyn FileSystem, droplet: &Droplet) -> Result<Option<Deployable>> {
        classify(fs, &droplet.application, self.detector.as_ref())
    }
}

impl Container for JBoss {
    fn name(&self) -> &str {
        "JBoss"
    }

    fn detect(&self, fs: &dyn FileSystem, droplet: &Droplet) -> Result<Option<String>> {
        Ok(self.classify(fs, droplet)?.map(|_| self.tag()))
    }

    fn compile(&self, fs: &dyn FileSystem, droplet: &Droplet) -> Result<Option<Deployable>> {
        let Some(deployable) = self.classify(fs, droplet)? else {
            info!("Application is neither a WAR nor an EAR, nothing to stage");
            return Ok(None);
        };
        info!(version = %self.version, "Staging {} onto JBoss", deployable);

        let sandbox = droplet.sandbox();
        self.distribution.install(fs, sandbox)?;
        patch_configuration(fs, &droplet.application, sandbox)?;
        install_driver(fs, &droplet.application, sandbox)?;
        stage_application(fs, &droplet.application, sandbox, deployable)?;
        place_libraries(fs, &droplet.additional_libraries, sandbox, deployable)?;
        write_marker(fs, sandbox, deployable)?;

        Ok(Some(deployable))
    }

    fn release(&self, droplet: &mut Droplet) -> Result<Release> {
        Ok(launch_command(droplet)?)
    }
}
