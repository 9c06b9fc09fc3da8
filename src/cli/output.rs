//! Output formatting for release and detection results
//!
//! Human output is exactly what the surrounding pipeline consumes: the bare
//! launch command or the detect tag. JSON and YAML wrap the same data for
//! tooling.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::container::{Deployable, Release};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub tag: String,
    pub deployable: Deployable,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_release(&self, release: &Release) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.to_json(release),
            OutputFormat::Yaml => self.to_yaml(release),
            OutputFormat::Human => Ok(release.command.clone()),
        }
    }

    pub fn format_detection(&self, detection: &Detection) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.to_json(detection),
            OutputFormat::Yaml => self.to_yaml(detection),
            OutputFormat::Human => Ok(detection.tag.clone()),
        }
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        serde_json::to_string_pretty(value).context("Failed to serialize output to JSON")
    }

    fn to_yaml<T: Serialize>(&self, value: &T) -> Result<String> {
        serde_yaml::to_string(value).context("Failed to serialize output to YAML")
    }
}
