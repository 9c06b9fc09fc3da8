use jboss_stage::cli::handlers::EXIT_ERROR;
use jboss_stage::cli::{handle_compile, handle_detect, handle_release, CliArgs, Commands};
use jboss_stage::util::logging::{config_from_env, init_logging, parse_level};
use jboss_stage::{StageConfig, NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();

    let config = match StageConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_ERROR);
        }
    };

    init_logging(config_from_env(Some(log_level(&args, &config))));

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => handle_detect(detect_args, config),
        Commands::Compile(compile_args) => handle_compile(compile_args, config),
        Commands::Release(release_args) => handle_release(release_args, config),
    };

    process::exit(exit_code);
}

/// `--log-level` wins, then `-v` / `-q`, then the configured level
fn log_level(args: &CliArgs, config: &StageConfig) -> Level {
    if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level(&config.log_level)
    }
}
