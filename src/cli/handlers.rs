use super::commands::{CompileArgs, DetectArgs, DropletArgs, ReleaseArgs};
use super::output::{Detection, OutputFormatter};
use crate::config::StageConfig;
use crate::container::{Container, JBoss};
use crate::distribution::{Distribution, PreExtracted, Tarball};
use crate::droplet::Droplet;
use crate::fs::{FileSystem, RealFileSystem};
use crate::main_class::ManifestMainClass;

use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, error, info};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_NOT_APPLICABLE: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Applies the droplet flags shared by every subcommand on top of the
/// loaded configuration
fn with_droplet_args(mut config: StageConfig, args: &DropletArgs) -> StageConfig {
    if let Some(sandbox) = &args.sandbox {
        debug!("Sandbox overridden to: {}", sandbox.display());
        config.sandbox = sandbox.clone();
    }
    if let Some(java_home) = &args.java_home {
        debug!("JRE directory overridden to: {}", java_home.display());
        config.java_home = java_home.clone();
    }
    config
}

fn build_container(config: &StageConfig) -> JBoss {
    let distribution: Box<dyn Distribution> = match &config.distribution {
        Some(archive) => Box::new(Tarball::new(archive.clone())),
        None => Box::new(PreExtracted),
    };
    JBoss::new(
        config.version.clone(),
        distribution,
        Box::new(ManifestMainClass::with_configured(
            config.java_main_class.clone(),
        )),
    )
}

fn open_droplet(fs: &dyn FileSystem, root: PathBuf, config: &StageConfig) -> Result<Droplet> {
    debug!("Droplet root: {}", root.display());
    Ok(Droplet::open(fs, root, &config.sandbox, &config.java_home)?
        .with_additional_libraries(config.additional_libraries.clone()))
}

fn validated(config: StageConfig) -> Option<StageConfig> {
    match config.validate() {
        Ok(()) => Some(config),
        Err(e) => {
            error!("Configuration error: {}", e);
            None
        }
    }
}

pub fn handle_detect(args: &DetectArgs, config: StageConfig) -> i32 {
    let Some(config) = validated(with_droplet_args(config, &args.droplet)) else {
        return EXIT_ERROR;
    };
    let fs = RealFileSystem;
    let container = build_container(&config);

    let result = open_droplet(&fs, args.droplet.application.clone(), &config)
        .and_then(|droplet| container.classify(&fs, &droplet));

    match result {
        Ok(Some(deployable)) => {
            info!("Detected {} application", deployable);
            let detection = Detection {
                tag: container.tag(),
                deployable,
            };
            match OutputFormatter::new(args.format.into()).format_detection(&detection) {
                Ok(output) => {
                    println!("{}", output);
                    EXIT_SUCCESS
                }
                Err(e) => {
                    error!("Failed to format detection result: {:#}", e);
                    EXIT_ERROR
                }
            }
        }
        Ok(None) => {
            info!("{} does not apply to this application", container.name());
            EXIT_NOT_APPLICABLE
        }
        Err(e) => {
            error!("Detection failed: {:#}", e);
            EXIT_ERROR
        }
    }
}

pub fn handle_compile(args: &CompileArgs, config: StageConfig) -> i32 {
    let mut config = with_droplet_args(config, &args.droplet);
    if let Some(distribution) = &args.distribution {
        config.distribution = Some(distribution.clone());
    }
    if !args.libraries.is_empty() {
        config.additional_libraries = args.libraries.clone();
    }
    let Some(config) = validated(config) else {
        return EXIT_ERROR;
    };

    let fs = RealFileSystem;
    let container = build_container(&config);

    let result = open_droplet(&fs, args.droplet.application.clone(), &config)
        .and_then(|droplet| container.compile(&fs, &droplet));

    match result {
        Ok(Some(deployable)) => {
            info!("Staged {} application", deployable);
            EXIT_SUCCESS
        }
        Ok(None) => {
            info!("Nothing staged");
            EXIT_SUCCESS
        }
        Err(e) => {
            error!("Compile failed: {:#}", e);
            EXIT_ERROR
        }
    }
}

pub fn handle_release(args: &ReleaseArgs, config: StageConfig) -> i32 {
    let Some(config) = validated(with_droplet_args(config, &args.droplet)) else {
        return EXIT_ERROR;
    };
    let fs = RealFileSystem;
    let container = build_container(&config);

    let result = open_droplet(&fs, args.droplet.application.clone(), &config)
        .and_then(|mut droplet| container.release(&mut droplet))
        .and_then(|release| OutputFormatter::new(args.format.into()).format_release(&release));

    match result {
        Ok(output) => {
            println!("{}", output);
            EXIT_SUCCESS
        }
        Err(e) => {
            error!("Release failed: {:#}", e);
            EXIT_ERROR
        }
    }
}
