//! `hntr` -- console for hntr reconnaissance boxes.
//!
//! # Environment variables
//!
//! | Variable                  | Default                     | Description                        |
//! |---------------------------|-----------------------------|------------------------------------|
//! | `HNTR_API_URL`            | `http://localhost:8080/api` | Base URL of the box API            |
//! | `HNTR_BOX_ID`             | --                          | Box to operate on                  |
//! | `HNTR_TIMEOUT_SECS`       | `30`                        | Request timeout                    |
//! | `HNTR_RETRIES`            | `3`                         | Retries of idempotent requests     |
//! | `HNTR_POLL_INTERVAL_SECS` | `10`                        | Refresh interval of `--watch`      |

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hntr_client::config::ClientConfig;
use hntr_console::app;
use hntr_console::cli::Cli;
use hntr_console::context::Console;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the rendered pages.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hntr_console=info,hntr_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url.clone() {
        config.api_url = url;
    }
    tracing::debug!(api_url = %config.api_url, box_id = ?cli.box_id, "Starting hntr console");

    let console = Console::new(config, cli.box_id).context("Invalid API configuration")?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    let mut stdout = std::io::stdout();
    let mut print = |text: &str| -> std::io::Result<()> {
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    };

    app::run(&console, cli.command, shutdown, &mut print).await?;
    Ok(())
}
