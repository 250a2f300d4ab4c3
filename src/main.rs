use clap::{Parser, Subcommand};
use std::path::PathBuf;

use golf_shot_db::config::{ServeConfig, SyncConfig};
use golf_shot_db::{serve, sync};

#[derive(Parser, Debug)]
#[command(author, version, about = "Record golf shots over HTTP and sync rounds between databases")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the tracking API server
    Serve {
        /// Port to listen on (overrides the PORT environment variable)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Pull unsynced rounds from a remote server into a local database
    Sync {
        /// Path to config file (TOML format)
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Serve { port } => {
            let mut config = ServeConfig::from_env()?;
            if let Some(port) = port {
                config.port = port;
            }
            serve::serve(config)
        }
        Command::Sync { config } => run_sync(config),
    }
}

fn run_sync(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config_content = std::fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read config file '{}': {}", config_path.display(), e))?;
    let config: SyncConfig = toml::from_str(&config_content)
        .map_err(|e| format!("Failed to parse config file '{}': {}", config_path.display(), e))?;
    config.validate()?;

    sync::sync_rounds(&config)?;
    Ok(())
}
