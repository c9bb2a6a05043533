//! bs-api - Command line front end of the `bs_api` Brawl Stars client.
//!
//! # Configuration
//!
//! The API token comes from a YAML file and/or environment variables, see the
//! [`config`] module:
//!
//! ```yaml
//! api:
//!   token: "your-api-token"
//! ```
//!
//! ```bash
//! export BS_API_API__TOKEN="your-api-token"
//! ```
//!
//! # Usage
//!
//! ```bash
//! bs-api --config config.yaml player "#8VJVG4PVC"
//! bs-api last-battle "#8VJVG4PVC"
//! bs-api wins "#8VJVG4PVC"
//! bs-api icon "#8VJVG4PVC" --output avatar
//! bs-api find "#2PP" Roky
//! bs-api members "#2PP"
//! bs-api top-players --region fr
//! bs-api top-clubs
//! bs-api top-brawler leon --region us
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)
//!   - Set to `debug` to see request URLs and decoded payloads
//!   - Set to `warn` or `error` for minimal logging

use bs_api::{BrawlClient, BsRequester};
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{commands::Command, config::Config};

mod commands;
mod config;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// Optional when the token is provided through `BS_API_API__TOKEN`.
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting bs-api {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config: {}", e);
            std::process::exit(2);
        }
    };

    let requester = BsRequester::with_url(&config.api.url, &config.api.token);
    let client = BrawlClient::with_requester(requester);

    if let Err(e) = commands::run(&client, args.command).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
