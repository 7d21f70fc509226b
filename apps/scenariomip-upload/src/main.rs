//! # scenariomip-upload
//!
//! Publishes the ScenarioMIP core variables as a new version of their
//! Zenodo record.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                 apps/scenariomip-upload (THE BINARY)          │
//! │                                                               │
//! │  ┌─────────────┐   ┌──────────────┐   ┌──────────────────┐   │
//! │  │    CLI      │──▶│  run_upload  │──▶│    Publisher     │   │
//! │  │   (clap)    │   │              │   │ (ZenodoClient)   │   │
//! │  └─────────────┘   └──────┬───────┘   └──────────────────┘   │
//! │                           ▼                                   │
//! │                  ┌──────────────────┐                         │
//! │                  │ scenariomip-core │                         │
//! │                  │   (THE LOGIC)    │                         │
//! │                  └──────────────────┘                         │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! export ZENODO_TOKEN=...
//! scenariomip-upload "ScenarioMIP variables.xlsx" --verbose
//! scenariomip-upload "ScenarioMIP variables.xlsx" --publish
//! ```

use clap::Parser;
use scenariomip_upload::{Cli, LogLevel, execute};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.logging_level);

    if let Err(e) = execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries the summary and the final URL.
///
/// `RUST_LOG` overrides `--logging-level`. `SCENARIOMIP_LOG_FORMAT=json`
/// enables machine-parseable output.
fn init_tracing(level: LogLevel) {
    let log_format =
        std::env::var("SCENARIOMIP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| level.directive().into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
