//! Launch environment builders: environment variables, JVM options and
//! the Java home assignment.

use crate::error::StagingError;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Ordered set of environment variable assignments for the launch command.
/// Adding a variable that already exists replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentVariables {
    vars: Vec<(String, String)>,
}

impl EnvironmentVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_environment_variable(
        &mut self,
        key: impl Into<String>,
        value: impl Display,
    ) -> &mut Self {
        let key = key.into();
        let value = value.to_string();
        match self.vars.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.vars.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Renders `KEY=value` pairs joined by spaces
    pub fn as_env_vars(&self) -> String {
        self.iter()
            .map(|(k, v)| assignment(k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// JVM options collected for the launch. System properties are keyed, so
/// setting the same property twice keeps only the latest value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JavaOpts {
    opts: Vec<String>,
}

impl JavaOpts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_system_property(&mut self, key: &str, value: impl Display) -> &mut Self {
        let prefix = format!("-D{}=", key);
        let opt = format!("{}{}", prefix, value);
        match self.opts.iter_mut().find(|o| o.starts_with(&prefix)) {
            Some(existing) => *existing = opt,
            None => self.opts.push(opt),
        }
        self
    }

    pub fn add_option(&mut self, opt: impl Into<String>) -> &mut Self {
        self.opts.push(opt.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.opts.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.opts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.opts.len()
    }

    /// Options joined by spaces, without any assignment wrapper
    pub fn joined(&self) -> String {
        self.opts.join(" ")
    }
}

/// Location of the JRE installed into the droplet by an earlier step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaHome {
    root: PathBuf,
}

impl JavaHome {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `JAVA_HOME=$PWD/<path relative to the droplet root>`
    pub fn as_env_var(&self, droplet_root: &Path) -> Result<String, StagingError> {
        let relative = relative_to(&self.root, droplet_root)?;
        Ok(format!("JAVA_HOME=$PWD/{}", relative.display()))
    }
}

/// Path of `path` relative to `root`, which must contain it
pub fn relative_to(path: &Path, root: &Path) -> Result<PathBuf, StagingError> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .map_err(|_| StagingError::OutsideDropletRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })
}

pub(crate) fn assignment(key: &str, value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("{}=\"{}\"", key, value)
    } else {
        format!("{}={}", key, value)
    }
}
