//! CLI command definitions for the `botique` binary.
//!
//! Uses clap derive macros for argument parsing. Two commands: `serve`
//! runs the storefront service, `migrate` applies ledger migrations.

use clap::{Parser, Subcommand};

/// Cart keeper and checkout service for a chat storefront.
#[derive(Parser)]
#[command(name = "botique", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Bridge tracing spans to the OpenTelemetry stdout exporter.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST service (restores the cart snapshot first).
    Serve {
        /// Bind address override, e.g. 0.0.0.0:9000. Defaults to the
        /// configured `listen_addr`.
        #[arg(long)]
        addr: Option<String>,
    },

    /// Apply order-ledger schema migrations and exit.
    Migrate,
}
