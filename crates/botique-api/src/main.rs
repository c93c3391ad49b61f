//! Botique CLI and REST API entry point.
//!
//! Binary name: `botique`
//!
//! Parses CLI arguments, restores the cart snapshot, then either serves
//! the REST API or applies order-ledger migrations.

mod cli;
mod http;
mod state;

use clap::Parser;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default filter from verbosity; RUST_LOG wins when set.
    let directives = match cli.verbose {
        0 => "info",
        1 => "info,botique=debug",
        _ => "trace",
    };
    botique_observe::tracing_setup::init_tracing(directives, cli.otel)
        .map_err(|err| anyhow::anyhow!(err))?;

    let state = AppState::init().await?;

    match cli.command {
        Commands::Migrate => {
            state.checkout.ledger().run_migrations().await?;
            println!("Ledger migrations applied.");
        }

        Commands::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| state.config.listen_addr.clone());
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(addr = %addr, data_dir = %state.data_dir.display(), "Botique API listening");
            println!("  Botique API listening on http://{addr}");
            println!("  Press Ctrl+C to stop");

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
            botique_observe::tracing_setup::shutdown_tracing();
        }
    }

    Ok(())
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
