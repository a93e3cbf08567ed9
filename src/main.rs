//! Aura Monitor - A terminal dashboard for industrial machine health
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::time::Duration;

use clap::Parser;

use auramon_client::{load_settings, Gateway, HttpGateway};
use auramon_core::prelude::*;

/// Aura Monitor - A terminal dashboard for industrial machine health
#[derive(Parser, Debug)]
#[command(name = "auramon")]
#[command(about = "A terminal dashboard for the Aura machine monitoring API", long_about = None)]
struct Args {
    /// Base URL of the Aura API (overrides config)
    #[arg(long, value_name = "URL")]
    api_base_url: Option<String>,

    /// Refresh interval in milliseconds (overrides config)
    #[arg(long, value_name = "MS")]
    refresh_interval: Option<u64>,

    /// Probe the backend's health endpoint and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    let args = Args::parse();

    auramon_core::logging::init()?;

    let cwd = std::env::current_dir()?;
    let mut settings = load_settings(&cwd);
    if let Some(url) = args.api_base_url {
        settings.api_base_url = url;
    }
    if let Some(interval) = args.refresh_interval {
        settings.refresh_interval_ms = interval;
    }

    if args.check {
        return check_backend(&settings).await;
    }

    info!("Starting dashboard against {}", settings.api_base_url);
    auramon_tui::run(settings).await
}

/// One-shot backend probe for scripting and service checks.
async fn check_backend(settings: &auramon_client::Settings) -> Result<()> {
    let gateway = HttpGateway::new(
        &settings.api_base_url,
        Duration::from_millis(settings.request_timeout_ms),
    )?;

    match gateway.check_health().await {
        Ok(health) => {
            match health.version {
                Some(version) => println!("{} ({})", health.status, version),
                None => println!("{}", health.status),
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("backend unreachable at {}: {}", settings.api_base_url, e);
            std::process::exit(1);
        }
    }
}
