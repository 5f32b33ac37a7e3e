//! Mentor REST API entry point.
//!
//! Binary name: `mentord`
//!
//! Parses CLI arguments, loads the routing configuration, instantiates the
//! configured course backends, then starts the HTTP server.

mod http;
mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use state::AppState;

#[derive(Parser)]
#[command(name = "mentord", about = "Tutoring-session event routing service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 8080)]
        port: u16,

        /// Path to the routing configuration file.
        #[arg(short, long, default_value = "mentor.toml", env = "MENTOR_CONFIG")]
        config: PathBuf,

        /// SQLite database URL; defaults to a file under MENTOR_DATA_DIR.
        #[arg(long, env = "MENTOR_DATABASE_URL")]
        database: Option<String>,

        /// Also export spans via OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            config,
            database,
            otel,
        } => {
            mentor_observe::tracing_setup::init_tracing(otel)
                .map_err(|e| anyhow::anyhow!("cannot initialize tracing: {e}"))?;

            let state = AppState::init(&config, database).await?;
            info!(
                backends = ?state.registry.backend_names(),
                "course backends registered"
            );

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("mentor api listening on http://{addr}");

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            mentor_observe::tracing_setup::shutdown_tracing();
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
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
