//! # json-server
//!
//! Composition root that serves a JSON file as a REST API.
//!
//! ## Responsibilities
//! - Parse configuration (CLI flags, env vars, config file)
//! - Install the log subscriber when request logging is enabled
//! - Load the document once to discover and classify its keys
//! - Construct the file store and application services
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod cli;
mod config;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::Notify;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use jsonserver_adapter_http_axum::state::AppState;
use jsonserver_adapter_storage_json_file::JsonFileStore;
use jsonserver_app::id_generator::RandomIdGenerator;
use jsonserver_app::services::document_service::DocumentService;
use jsonserver_domain::key::ResourceKey;

use crate::cli::Cli;
use crate::config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_LOG_FILTER, LoggingConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref();
    let mut config = Config::load(config_path).with_context(|| {
        let path = config_path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        format!("failed to load {}", path.display())
    })?;
    cli.apply_to(&mut config);
    config.validate().context("invalid configuration")?;

    init_tracing(&config.logging);

    let store = JsonFileStore::new(config.storage.file.clone());
    let document_service = DocumentService::new(store, RandomIdGenerator::new());
    let keys = document_service
        .discover()
        .await
        .with_context(|| format!("failed to load {}", config.storage.file.display()))?;

    let state = AppState::new(document_service, keys);
    print_banner(config.server.port, &state.keys);
    let app = jsonserver_adapter_http_axum::router::build_with_timeout(
        state,
        config.request_timeout(),
    );

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!(
        bind_addr = %bind_addr,
        file = %config.storage.file.display(),
        "json-server started"
    );

    let draining = Arc::new(Notify::new());
    let notify = Arc::clone(&draining);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        notify.notify_one();
    });

    tokio::select! {
        result = server.into_future() => result.context("server error")?,
        () = drain_deadline(&draining, config.shutdown_timeout()) => {
            tracing::warn!("in-flight requests did not finish in time, exiting");
        }
    }

    tracing::info!("json-server stopped");
    Ok(())
}

/// Resolves `grace` after shutdown has started.
async fn drain_deadline(draining: &Notify, grace: Duration) {
    draining.notified().await;
    tokio::time::sleep(grace).await;
}

/// Install the subscriber only when logging is on; without it every
/// `tracing` event is dropped.
fn init_tracing(logging: &LoggingConfig) {
    if !logging.enabled {
        return;
    }
    let filter = EnvFilter::try_new(&logging.filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {:?} ({err}), using default", logging.filter);
        EnvFilter::new(DEFAULT_LOG_FILTER)
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn print_banner(port: u16, keys: &[ResourceKey]) {
    let base = format!("http://localhost:{port}");
    println!("\n  json-server is running\n");
    println!("  Resources");
    if keys.is_empty() {
        println!("  (none)");
    }
    for key in keys {
        println!("  {base}{}", key.collection_path());
    }
    println!("\n  Database\n  {base}/db\n");
    println!("  Home\n  {base}\n");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "unable to install ctrl+c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "unable to install sigterm handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
