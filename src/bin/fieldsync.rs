//! Fieldsync CLI binary.

use std::process;

use clap::Parser;
use fieldsync::config::{ConfigLoader, FieldsyncConfig};
use fieldsync::logging::{init_logging, LoggingConfig};
use fieldsync::tooling::cli::{execute, Cli};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = load_config(&cli);
    let logging_config = build_logging_config(&cli, &config);
    if let Err(err) = init_logging(Some(&logging_config)) {
        eprintln!("failed to initialize logging: {}", err);
        process::exit(1);
    }

    info!("fieldsync starting");

    match execute(&cli, &config) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(err) => {
            error!("command failed: {:#}", err);
            eprintln!("error: {:#}", err);
            process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> FieldsyncConfig {
    let loaded = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(&cli.workspace),
    };
    match loaded {
        Ok(config) => config,
        Err(err) => {
            eprintln!("warning: using default configuration: {}", err);
            FieldsyncConfig::default()
        }
    }
}

/// CLI flags override the config file, which overrides defaults.
fn build_logging_config(cli: &Cli, config: &FieldsyncConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.clone();
    }
    logging
}
