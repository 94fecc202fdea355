//! Tradepay developer CLI

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod config;
mod env_vars;
mod file_storage;
mod sub_commands;

const DEFAULT_WORK_DIR: &str = ".tradepay";

/// Inspect fees, validate payment forms and drive the demo stage
#[derive(Parser)]
#[command(name = "tradepay-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to working dir
    #[arg(short, long)]
    work_dir: Option<PathBuf>,
    /// Path to the config file, defaults to `config.toml` in the working dir
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Logging level
    #[arg(short, long, default_value = "error")]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the service fee for an amount
    Fees(sub_commands::fees::FeesSubCommand),
    /// Validate a payment form snapshot
    Validate(sub_commands::validate::ValidateSubCommand),
    /// Read or change the demo stage
    Stage(sub_commands::stage::StageSubCommand),
    /// List review error scenarios
    Scenarios(sub_commands::scenarios::ScenariosSubCommand),
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    let env_filter = EnvFilter::new(args.log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let work_dir = match &args.work_dir {
        Some(work_dir) => work_dir.clone(),
        None => home::home_dir()
            .ok_or_else(|| anyhow!("Could not determine home directory"))?
            .join(DEFAULT_WORK_DIR),
    };

    fs::create_dir_all(&work_dir)?;

    let config_file = args
        .config
        .clone()
        .unwrap_or_else(|| work_dir.join(config::CONFIG_FILE_NAME));
    let settings = config::load_settings(&config_file)?;

    match &args.command {
        Commands::Fees(sub_command_args) => sub_commands::fees::fees(settings, sub_command_args),
        Commands::Validate(sub_command_args) => {
            sub_commands::validate::validate(settings, sub_command_args)
        }
        Commands::Stage(sub_command_args) => sub_commands::stage::stage(&work_dir, sub_command_args),
        Commands::Scenarios(sub_command_args) => {
            sub_commands::scenarios::scenarios(sub_command_args)
        }
    }
}
