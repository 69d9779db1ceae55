// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use arb_client::{
    cli::{self, Cli, Commands},
    config::{AppConfig, ConfigError},
    error::AppError,
    logging::init_logging,
};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = match AppConfig::load(&cli.config) {
        // Key generation never touches the network.
        Err(ConfigError::Io { .. }) if matches!(cli.command, Commands::NewAddress) => {
            AppConfig::default()
        }
        loaded => loaded?,
    };

    // Held until exit so buffered log lines are flushed.
    let _guard = init_logging(&config.logging)?;
    tracing::debug!(config = ?config, "Configuration loaded");

    cli::run(cli.command, &config, cli.json).await
}
