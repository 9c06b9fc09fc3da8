//! Detection of a runnable `main` entry point in the application.
//!
//! An application that declares a main class is a standalone executable and
//! should be launched directly rather than deployed into an application
//! server, so the JBoss container steps aside for WAR-shaped applications
//! that have one.

use crate::droplet::Application;
use crate::fs::FileSystem;
use anyhow::Result;
use tracing::debug;

pub const MANIFEST: &str = "META-INF/MANIFEST.MF";
const MAIN_CLASS_ATTRIBUTE: &str = "Main-Class";

pub trait MainClassDetector: Send + Sync {
    /// The main class declared by the application, if any
    fn main_class(&self, fs: &dyn FileSystem, application: &Application)
        -> Result<Option<String>>;
}

/// Uses an explicitly configured main class when present, otherwise the
/// `Main-Class` attribute of the application's manifest.
#[derive(Debug, Clone, Default)]
pub struct ManifestMainClass {
    configured: Option<String>,
}

impl ManifestMainClass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_configured(configured: Option<String>) -> Self {
        Self {
            configured: configured.filter(|c| !c.trim().is_empty()),
        }
    }
}

impl MainClassDetector for ManifestMainClass {
    fn main_class(
        &self,
        fs: &dyn FileSystem,
        application: &Application,
    ) -> Result<Option<String>> {
        if let Some(configured) = &self.configured {
            debug!(main_class = %configured, "Using configured main class");
            return Ok(Some(configured.clone()));
        }

        let manifest = application.path(MANIFEST);
        if !fs.is_file(&manifest) {
            return Ok(None);
        }

        let content = fs.read_to_string(&manifest)?;
        let main_class = manifest_attribute(&content, MAIN_CLASS_ATTRIBUTE);
        if let Some(main_class) = &main_class {
            debug!(main_class = %main_class, "Found Main-Class in manifest");
        }
        Ok(main_class)
    }
}

/// Looks up a main-section attribute in JAR manifest text, folding
/// continuation lines (lines starting with a single space).
pub fn manifest_attribute(content: &str, name: &str) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();
    for line in content.lines() {
        if let Some(continuation) = line.strip_prefix(' ') {
            if let Some(last) = lines.last_mut() {
                last.push_str(continuation);
                continue;
            }
        }
        if line.is_empty() {
            // end of the main section
            break;
        }
        lines.push(line.to_string());
    }

    lines.iter().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.trim().eq_ignore_ascii_case(name) {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })
}
