//! Command-line entry-point for the MapAmigo address book.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::process::ExitCode;

use color_eyre::eyre::Result;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    cli::run().await
}
