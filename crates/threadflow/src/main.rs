// SPDX-FileCopyrightText: 2026 ThreadFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ThreadFlow - AI-assisted social thread planning and scheduled publishing.
//!
//! This is the binary entry point for the ThreadFlow backend.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;

use clap::{Parser, Subcommand};

/// ThreadFlow - AI-assisted social thread planning and scheduled publishing.
#[derive(Parser, Debug)]
#[command(name = "threadflow", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the dispatch daemon.
    Serve,
    /// Run a single dispatch pass and exit.
    Dispatch,
    /// Generate a thread draft from an idea (optionally queueing it).
    Generate {
        /// The content idea to build a thread from.
        idea: String,
        /// Queue the generated thread for this account ID.
        #[arg(long)]
        queue_for: Option<i64>,
    },
    /// Exchange a short-lived Threads token and store the connection.
    Connect {
        /// Short-lived access token from the OAuth redirect.
        token: String,
    },
    /// Validate and print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match threadflow_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            threadflow_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => commands::serve::run(config).await,
        Some(Commands::Dispatch) => commands::dispatch::run(config).await,
        Some(Commands::Generate { idea, queue_for }) => {
            commands::generate::run(config, &idea, queue_for).await
        }
        Some(Commands::Connect { token }) => commands::connect::run(config, &token).await,
        Some(Commands::Config) => commands::config::run(config),
        None => {
            println!("threadflow: use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
