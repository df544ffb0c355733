//! Croft CLI
//!
//! Command-line interface for Croft content and carts.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use croft_cli::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    croft_cli::app::run(args).await
}
