use crate::droplet::Application;
use crate::error::StagingError;
use crate::fs::FileSystem;
use anyhow::Result;
use regex::{Captures, Regex};
use std::path::Path;
use tracing::{debug, info};

pub const STANDALONE_XML: &str = "standalone/configuration/standalone.xml";
pub const STANDALONE_CONF: &str = "bin/standalone.conf";
pub const CUSTOM_STANDALONE_XML: &str = "META-INF/cf/standalone.xml";
pub const CUSTOM_STANDALONE_CONF: &str = "META-INF/cf/standalone.conf";

const WELCOME_CONTENT: &str = r#"<location name="/" handler="welcome-content"/>"#;

/// Comments out the welcome-content handler so the application can own `/`.
/// Text without the registration, or where it is already commented out, is
/// returned unchanged.
pub fn disable_welcome_content(config: &str) -> Result<String> {
    let pattern = Regex::new(&format!(r"(<!--\s*)?{}", regex::escape(WELCOME_CONTENT)))?;
    let replacement = format!("<!-- {} -->", WELCOME_CONTENT);
    Ok(pattern
        .replace_all(config, |caps: &Captures| match caps.get(1) {
            Some(_) => caps[0].to_string(),
            None => replacement.clone(),
        })
        .into_owned())
}

/// Installs the server configuration for the container: the application's
/// own `standalone.xml` when it ships one, otherwise the default one with
/// the welcome content disabled. A bundled `standalone.conf` replaces the
/// launch environment defaults.
pub fn patch_configuration(
    fs: &dyn FileSystem,
    application: &Application,
    sandbox: &Path,
) -> Result<()> {
    let standalone_xml = sandbox.join(STANDALONE_XML);
    let custom_xml = application.path(CUSTOM_STANDALONE_XML);

    if fs.exists(&custom_xml) {
        info!(source = %custom_xml.display(), "Using application-provided standalone.xml");
        fs.copy_file(&custom_xml, &standalone_xml)?;
    } else {
        if !fs.is_file(&standalone_xml) {
            return Err(StagingError::MissingRuntimeFile(standalone_xml).into());
        }
        let original = fs.read_to_string(&standalone_xml)?;
        let modified = disable_welcome_content(&original)?;
        if modified == original {
            debug!("No welcome-content registration found in standalone.xml");
        } else {
            info!("Disabled welcome-content handler in standalone.xml");
        }
        fs.write(&standalone_xml, modified.as_bytes())?;
    }

    let custom_conf = application.path(CUSTOM_STANDALONE_CONF);
    if fs.exists(&custom_conf) {
        info!(source = %custom_conf.display(), "Using application-provided standalone.conf");
        fs.copy_file(&custom_conf, &sandbox.join(STANDALONE_CONF))?;
    }

    Ok(())
}
