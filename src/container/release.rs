use crate::distribution::START_SCRIPT;
use crate::droplet::{relative_to, Droplet};
use crate::error::StagingError;
use serde::{Deserialize, Serialize};
use tracing::debug;

const BIND_ADDRESS: &str = "0.0.0.0";

/// Launch command for the staged runtime together with the JVM options
/// that went into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub command: String,
    pub java_opts: Vec<String>,
}

/// Registers the launch environment on the droplet and renders the start
/// command. The command runs from the droplet root, so the start script is
/// addressed through `$PWD`.
pub fn launch_command(droplet: &mut Droplet) -> Result<Release, StagingError> {
    droplet
        .environment_variables
        .add_environment_variable("JAVA_OPTS", "$JAVA_OPTS");

    droplet
        .java_opts
        .add_system_property("jboss.http.port", "$PORT")
        .add_system_property("java.net.preferIPv4Stack", true)
        .add_system_property("java.net.preferIPv4Addresses", true);

    let start_script = relative_to(&droplet.sandbox.join(START_SCRIPT), &droplet.root)?;

    let parts = [
        droplet.launch_env_vars(),
        droplet.java_home.as_env_var(&droplet.root)?,
        "exec".to_string(),
        format!("$PWD/{}", start_script.display()),
        "-b".to_string(),
        BIND_ADDRESS.to_string(),
    ];

    let command = parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    debug!(command = %command, "Built launch command");

    Ok(Release {
        command,
        java_opts: droplet.java_opts.iter().map(str::to_string).collect(),
    })
}
