// SPDX-FileCopyrightText: 2026 Optiplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optiplan - resolve SVG optimization plugin plans.
//!
//! This is the binary entry point: it loads the layered configuration,
//! resolves it against the plugin registry and prints the grouped plan.

mod plugins;
mod resolve;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// Optiplan - resolve SVG optimization plugin plans.
#[derive(Parser, Debug)]
#[command(name = "optiplan", version, about, long_about = None)]
struct Cli {
    /// Log level for optiplan crates (overridden by `RUST_LOG`).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the configuration into a grouped plugin plan.
    Resolve(ResolveArgs),
    /// List or search the built-in plugin catalog.
    Plugins {
        /// Case-insensitive substring matched against names and descriptions.
        query: Option<String>,

        /// Register an extra plugin template file before listing (repeatable).
        #[arg(long = "template", value_name = "FILE")]
        templates: Vec<PathBuf>,
    },
}

/// Arguments of `optiplan resolve`.
#[derive(clap::Args, Debug, Default)]
pub struct ResolveArgs {
    /// Read user configuration from this file instead of the XDG hierarchy.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read the defaults document from this file instead of the built-in one.
    #[arg(long, value_name = "FILE")]
    pub defaults: Option<PathBuf>,

    /// Treat the configured plugin list as complete and skip the defaults.
    #[arg(long)]
    pub full: bool,

    /// Override `floatPrecision` in every plugin that declares it.
    #[arg(long, value_name = "N")]
    pub precision: Option<u32>,

    /// Enable multipass optimization.
    #[arg(long)]
    pub multipass: bool,

    /// Register an extra plugin template file (repeatable).
    #[arg(long = "template", value_name = "FILE")]
    pub templates: Vec<PathBuf>,

    /// Print the plan as JSON.
    #[arg(long)]
    pub json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Resolve(args) => match resolve::run_resolve(&args, cli.plain) {
            Ok(()) => ExitCode::SUCCESS,
            Err(errors) => {
                optiplan_config::render_errors(&errors);
                ExitCode::FAILURE
            }
        },
        Commands::Plugins { query, templates } => {
            match plugins::run_plugins(query.as_deref().unwrap_or_default(), &templates, cli.plain) {
                Ok(()) => ExitCode::SUCCESS,
                Err(errors) => {
                    optiplan_config::render_errors(&errors);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// Initialize the tracing subscriber with an env filter, writing to stderr.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("optiplan={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn resolve_flags_parse() {
        let cli = Cli::parse_from([
            "optiplan",
            "resolve",
            "--full",
            "--precision",
            "4",
            "--template",
            "a.toml",
            "--template",
            "b.toml",
            "--json",
        ]);
        match cli.command {
            Commands::Resolve(args) => {
                assert!(args.full);
                assert_eq!(args.precision, Some(4));
                assert_eq!(args.templates.len(), 2);
                assert!(args.json);
                assert!(!args.multipass);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn plugins_query_is_optional() {
        let cli = Cli::parse_from(["optiplan", "plugins"]);
        match cli.command {
            Commands::Plugins { query, templates } => {
                assert!(query.is_none());
                assert!(templates.is_empty());
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.log_level, "warn");
    }
}
