//! Hover DNS command-line client.
//!
//! Manages TXT records across one or more Hover domains, in the spirit of
//! `lego --dns hover`:
//!
//! ```text
//! export HOVER_PASSFILE=~/.config/hover.json
//! hoverdns --domains example.com add --host _acme-challenge --value ABCDE
//! hoverdns --domains example.com delete --host _acme-challenge
//! ```

mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use hoverdns_api::{Client, HoverError};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if is_expected(&e) {
                tracing::warn!("{e:#}");
            } else {
                tracing::error!("{e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by `-v`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,hoverdns={level},hoverdns_api={level}"))
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose),
        )
        .with(filter)
        .init();
}

/// Whether the failure is an expected outcome (bad input, unknown domain)
/// rather than a fault; decides warn versus error.
fn is_expected(e: &anyhow::Error) -> bool {
    e.chain()
        .find_map(|cause| cause.downcast_ref::<HoverError>())
        .is_some_and(HoverError::is_expected)
}

async fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::resolve(&cli.global, |name| std::env::var(name).ok())?;
    tracing::debug!(
        accept_tos = cli.global.accept_tos,
        email = ?settings.email,
        "ACME placeholder flags are accepted and ignored"
    );

    let mut client = Client::new(settings.credential, &settings.client)
        .context("Failed to create Hover client")?;

    commands::run(&mut client, &settings.domains, &cli.command).await
}
