//! # charbook-server
//!
//! Multi-user word-collection web service.
//!
//! This binary provides:
//! - **Registration and session login** gating every other route
//! - **Word ingestion** (free-text submissions split into tokens)
//! - **Unique-character view** over everything a user has submitted,
//!   newest contributing word first
//! - **`.docx` export** of the same character sequence as a download
//!
//! State lives in a SQLite database whose file and schema are created
//! automatically on first startup.

mod auth;
mod config;
mod error;
mod export;
mod extract;
mod routes;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use charbook_store::Database;

use crate::config::ServerConfig;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,charbook_server=debug")),
        )
        .init();

    info!("Starting charbook server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Open the database (creates the file and schema on first start)
    // -----------------------------------------------------------------------
    let database = match &config.database_path {
        Some(path) => Database::open_at(path)?,
        None => Database::new()?,
    };

    let state = AppState {
        db: Arc::new(Mutex::new(database)),
    };

    // -----------------------------------------------------------------------
    // 4. Run the HTTP server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = routes::serve(state, config.http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
