// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>
//!
//! infohub — command-line client for the Information Hub Data API.
//!
//! Runs a single operation per invocation and prints the normalized response
//! as pretty JSON. Problems reported by the service go to stderr and set a
//! non-zero exit status.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use infohub_client::client::InfoHubClient;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let config = args.config();
    tracing::debug!(base_url = %config.base_url, "Connecting to Information Hub");

    let client = match InfoHubClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    let outcome = cli::run(&client, args.command).await;

    match serde_json::to_string_pretty(&outcome.output) {
        Ok(text) => println!("{text}"),
        Err(e) => tracing::error!(error = %e, "Could not render output"),
    }

    match outcome.problem {
        Some(problem) => {
            eprintln!("{problem}");
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}
