//! servicebus-config
//!
//! Operator tool for Service Bus JMS settings.
//!
//! ```text
//! config file ──▶ env overlay ──▶ validate ──▶ check: summary / errors
//!                                         └──▶ show:  connection + listener settings
//! ```
//!
//! Never opens a connection; all it does is resolve and print.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use servicebus_jms_config::config::loader::{load_config, load_config_without_env};
use servicebus_jms_config::config::{ConfigError, ServiceBusJmsConfig};
use servicebus_jms_config::jms::resolve_all;
use servicebus_jms_config::observability::logging;

#[derive(Parser)]
#[command(name = "servicebus-config")]
#[command(about = "Validate and inspect Service Bus JMS configuration", long_about = None)]
struct Cli {
    /// Log level for this tool (RUST_LOG overrides it)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a configuration file
    Check {
        file: PathBuf,

        /// Ignore SERVICEBUS_* environment variables
        #[arg(long)]
        no_env: bool,
    },
    /// Print the resolved connection and listener settings
    Show {
        file: PathBuf,

        #[arg(long)]
        no_env: bool,

        #[arg(long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Toml,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(&logging::default_directive(&cli.log_level));

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Check { file, no_env } => {
            let config = load(&file, no_env)?;
            println!(
                "OK: {} (pricing tier {}, idle timeout {} ms)",
                file.display(),
                config.tier().map(|t| t.as_str()).unwrap_or_default(),
                config.idle_timeout
            );
        }
        Commands::Show { file, no_env, format } => {
            let config = load(&file, no_env)?;
            let resolved = resolve_all(&config)?;
            let out = match format {
                Format::Toml => toml::to_string_pretty(&resolved)?,
                Format::Json => serde_json::to_string_pretty(&resolved)?,
            };
            println!("{}", out);
        }
    }
    Ok(())
}

fn load(file: &Path, no_env: bool) -> Result<ServiceBusJmsConfig, ConfigError> {
    if no_env {
        load_config_without_env(file)
    } else {
        load_config(file)
    }
}
