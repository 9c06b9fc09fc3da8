use crate::droplet::Application;
use crate::fs::FileSystem;
use crate::main_class::MainClassDetector;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const WEB_INF: &str = "WEB-INF";
pub const APPLICATION_XML: &str = "META-INF/application.xml";
pub const DEPLOYMENTS: &str = "standalone/deployments";

/// Shape of the application, decided once per staging run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployable {
    War,
    Ear,
}

impl Deployable {
    /// Name of the exploded deployment inside `standalone/deployments`
    pub fn root_name(&self) -> &'static str {
        match self {
            Deployable::War => "ROOT.war",
            Deployable::Ear => "ROOT.ear",
        }
    }

    pub fn marker_name(&self) -> &'static str {
        match self {
            Deployable::War => "ROOT.war.dodeploy",
            Deployable::Ear => "ROOT.ear.dodeploy",
        }
    }

    /// Library directory relative to the deployment root
    pub fn library_dir(&self) -> &'static str {
        match self {
            Deployable::War => "WEB-INF/lib",
            Deployable::Ear => "lib",
        }
    }

    pub fn deployment_root(&self, sandbox: &Path) -> PathBuf {
        deployments(sandbox).join(self.root_name())
    }

    pub fn marker(&self, sandbox: &Path) -> PathBuf {
        deployments(sandbox).join(self.marker_name())
    }

    pub fn libraries(&self, sandbox: &Path) -> PathBuf {
        self.deployment_root(sandbox).join(self.library_dir())
    }
}

impl fmt::Display for Deployable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deployable::War => write!(f, "WAR"),
            Deployable::Ear => write!(f, "EAR"),
        }
    }
}

/// Deployment-scan directory of the runtime
pub fn deployments(sandbox: &Path) -> PathBuf {
    sandbox.join(DEPLOYMENTS)
}

/// Decides whether the application can be deployed to JBoss, and how.
///
/// An enterprise descriptor always wins. A web application only qualifies
/// when it does not declare a main class of its own.
pub fn classify(
    fs: &dyn FileSystem,
    application: &Application,
    detector: &dyn MainClassDetector,
) -> Result<Option<Deployable>> {
    if fs.exists(&application.path(APPLICATION_XML)) {
        debug!("Found {}, treating application as EAR", APPLICATION_XML);
        return Ok(Some(Deployable::Ear));
    }

    if fs.is_dir(&application.path(WEB_INF)) {
        if let Some(main_class) = detector.main_class(fs, application)? {
            debug!(main_class = %main_class, "WEB-INF present but application declares a main class");
            return Ok(None);
        }
        return Ok(Some(Deployable::War));
    }

    Ok(None)
}
