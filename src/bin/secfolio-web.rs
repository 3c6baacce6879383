//! secfolio web server
//!
//! Serves the portfolio with the persisted palette, mode, and layout, plus a
//! JSON API for changing them and for the contact form.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001, preferences in the config dir)
//! secfolio-web
//!
//! # Keep selections in memory only
//! secfolio-web --port 8080 --ephemeral
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use secfolio::branding::{APP_DISPLAY_NAME, WEB_BINARY_NAME};
use secfolio::config::Config;
use secfolio::storage::{DurableStore, FileStore, MemoryStore, UnavailableStore};
use secfolio::web::{self, AppState};

/// secfolio web server
#[derive(Parser, Debug)]
#[command(name = WEB_BINARY_NAME, author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Keep selections in memory instead of the preferences file
    #[arg(long)]
    ephemeral: bool,

    /// Run with storage disabled; every read and write fails
    #[arg(long, conflicts_with = "ephemeral")]
    no_storage: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting {APP_DISPLAY_NAME} web server");
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Using default configuration: {e:#}");
        Config::default()
    });

    let store: Arc<dyn DurableStore> = if args.no_storage {
        info!("Storage disabled; selections last until the next request changes them");
        Arc::new(UnavailableStore)
    } else if args.ephemeral {
        info!("Keeping selections in memory");
        Arc::new(MemoryStore::new())
    } else {
        let store = FileStore::open_default()?;
        info!("Preferences file: {}", store.path().display());
        Arc::new(store)
    };

    let state = AppState::new(config, store)?;

    // Build socket address
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    web::run_server(state, addr).await
}
