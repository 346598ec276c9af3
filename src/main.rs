//! Redirect service (v1)
//!
//! Answers every request it receives with either a redirect, when a stored
//! rule (or the legacy fixup) applies, or a 404.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ http server ──▶ not-found fallback (404)
//!                          │                    │
//!                          ▼                    ▼
//!                   request id / trace   redirect middleware
//!                                               │
//!                                               ▼
//!                     ┌──────────── redirect resolver ────────────┐
//!                     │ normalize → candidates → querystring      │
//!                     │   → destination + status code             │
//!                     │   → legacy fixup                          │
//!                     └───────────────┬───────────────────────────┘
//!                                     │ snapshot per request
//!                                     ▼
//!                     rule store (ArcSwap) ◀── rules watcher ◀── rules file
//!
//!     Client Response ◀── 3xx + Location, or 404
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use redirector::config::loader::load_config;
use redirector::config::RedirectorConfig;
use redirector::lifecycle::signals::shutdown_signal;
use redirector::lifecycle::startup::{initial_rules, start_rules_reload};
use redirector::observability::init_logging;
use redirector::rules::RuleStore;
use redirector::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "redirector")]
#[command(about = "Redirects unmatched requests according to stored rules", long_about = None)]
struct Args {
    /// Configuration file (TOML). Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rules file, overriding `redirects.rules_path`.
    #[arg(short, long)]
    rules: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RedirectorConfig::default(),
    };
    if let Some(rules) = args.rules {
        config.redirects.rules_path = Some(rules);
    }

    init_logging(&config.observability);
    tracing::info!("redirector v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        base_url = %config.site.base_url,
        default_redirect_code = ?config.redirects.default_redirect_code,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let store = Arc::new(RuleStore::new(initial_rules(&config.redirects)?));
    let shutdown = Shutdown::new();

    // Held for the lifetime of the server; dropping it stops the watch.
    let _watcher = match (&config.redirects.rules_path, config.redirects.watch_rules) {
        (Some(path), true) => Some(start_rules_reload(path, store.clone(), shutdown.subscribe())?),
        _ => None,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(config, store)?;
    let server_shutdown = shutdown.subscribe();
    let server_task = tokio::spawn(server.run(listener, server_shutdown));

    shutdown_signal().await;
    shutdown.trigger();
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
