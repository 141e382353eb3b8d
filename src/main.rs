mod api;
mod cli;
mod config;
mod error;
mod job_manager;
mod models;
mod status_monitor;
mod utils;

use anyhow::Result;
use api::HttpJobApi;
use clap::Parser;
use cli::{Cli, Commands};
use error::ClientError;
use status_monitor::ThreadSleeper;
use tracing::error;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse_from(cli::normalize_go_style_args(std::env::args_os()));

    if let Err(err) = run(cli) {
        let category = err
            .chain()
            .find_map(|e| e.downcast_ref::<ClientError>())
            .map(|e| e.category().as_str())
            .unwrap_or("unexpected");
        error!(category, "{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.api.to_config();
    let api = HttpJobApi::new(config.clone());
    let mut sleeper = ThreadSleeper;

    match cli.command {
        Some(Commands::Watch { job_id }) => {
            cli::handle_watch(&job_id, &config, &api, &mut sleeper)?;
        }
        None => {
            cli::handle_submit(&cli.job, &config, &api, &mut sleeper)?;
        }
    }

    Ok(())
}
