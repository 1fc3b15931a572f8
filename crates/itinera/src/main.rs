// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Itinera - AI travel itinerary planner.
//!
//! This is the binary entry point: the HTTP server and the interactive shell.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shell;
mod shutdown;

use clap::{Parser, Subcommand};
use colored::Colorize;

/// Itinera - AI travel itinerary planner.
#[derive(Parser, Debug)]
#[command(name = "itinera", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// Launch the interactive planner against a running server.
    Shell {
        /// Server base URL (overrides client.server_url).
        #[arg(long)]
        server: Option<String>,
    },
    /// Print the effective configuration with secrets masked.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match itinera_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            itinera_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Shell { server }) => {
            let url = server.unwrap_or_else(|| config.client.server_url.clone());
            shell::run_shell(&url).await
        }
        Some(Commands::Config) => {
            print_config(&config);
            Ok(())
        }
        None => {
            println!("itinera: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

fn print_config(config: &itinera_config::ItineraConfig) {
    match toml::to_string_pretty(&config.redacted()) {
        Ok(text) => print!("{text}"),
        Err(e) => eprintln!("{}: failed to render config: {e}", "error".red()),
    }
}
