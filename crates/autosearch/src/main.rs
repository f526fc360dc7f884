// SPDX-FileCopyrightText: 2026 Autosearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Autosearch - decide whether a query needs a live web search.
//!
//! Results are printed to stdout as JSON; logs go to stderr.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;

use std::path::PathBuf;

use autosearch_core::DecisionMode;
use clap::{Parser, Subcommand};
use serde::Serialize;

/// Autosearch - decide whether a query needs a live web search.
#[derive(Parser, Debug)]
#[command(name = "autosearch", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide for a single query.
    Decide {
        query: String,
        /// `hybrid` or `heuristic`; defaults to `decision.mode`.
        #[arg(long)]
        mode: Option<DecisionMode>,
    },
    /// Decide for several queries concurrently.
    Batch {
        #[arg(required = true, num_args = 1..=100)]
        queries: Vec<String>,
        #[arg(long)]
        mode: Option<DecisionMode>,
    },
    /// Show the heuristic signals, score and category for a query.
    Analyze { query: String },
    /// Check that the model classifier is reachable and its model is available.
    Health,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => autosearch_config::load_and_validate_path(path),
        None => autosearch_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            autosearch_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.service.log_level);
    autosearch_arbiter::register_metrics();

    let arbiter = match commands::build_arbiter(&config) {
        Ok(arbiter) => arbiter,
        Err(e) => {
            eprintln!("autosearch: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Decide { query, mode } => {
            print_json(&commands::decide(&arbiter, &query, mode).await);
        }
        Commands::Batch { queries, mode } => {
            print_json(&commands::batch(&arbiter, &queries, mode).await);
        }
        Commands::Analyze { query } => {
            print_json(&commands::analyze(&arbiter, &query));
        }
        Commands::Health => match commands::health(&arbiter).await {
            Ok(report) => {
                print_json(&report);
                if !report.is_healthy() {
                    std::process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("autosearch: health check failed: {e}");
                std::process::exit(1);
            }
        },
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("autosearch: failed to encode output: {e}");
            std::process::exit(1);
        }
    }
}

/// Stderr subscriber; `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("autosearch={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
