use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::{routing::get, Router};
use clap::Parser;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::{info, warn};

use invai_api::{
    api_v1_routes,
    config::{init_tracing, load_config},
    openapi::swagger_ui,
    store::{DatasetPayload, SnapshotStore},
    AppState,
};

#[derive(Parser, Debug)]
#[command(name = "invai-api", about = "Inventory analytics API server", version)]
struct Cli {
    /// JSON dataset to load at startup (same shape as PUT /api/v1/datasets)
    #[arg(long)]
    dataset: Option<String>,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config().context("failed to load configuration")?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    init_tracing(config.log_level(), config.log_json);

    let snapshots = match cli.dataset.as_deref().or(config.dataset_path.as_deref()) {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read dataset file {path}"))?;
            let payload: DatasetPayload = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse dataset file {path}"))?;
            let snapshot = payload.into_snapshot();
            let counts = snapshot.table_counts();
            info!(
                products = counts.products,
                sales = counts.sales,
                inventory = counts.inventory,
                "dataset loaded from {path}"
            );
            SnapshotStore::new(snapshot)
        }
        None => {
            warn!("no dataset configured; starting with an empty snapshot");
            SnapshotStore::empty()
        }
    };

    let cors = build_cors(&config)?;
    let state = AppState {
        config: config.clone(),
        snapshots,
    };

    let app = Router::new()
        .route("/", get(|| async { "InvAI Analytics API. See /docs." }))
        .nest("/api/v1", api_v1_routes())
        .merge(swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;

    info!(%addr, environment = %config.environment, "starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

/// Explicit origin list when configured; otherwise permissive, which is
/// acceptable only outside production.
fn build_cors(config: &invai_api::config::AppConfig) -> anyhow::Result<CorsLayer> {
    match config.cors_allowed_origins.as_deref() {
        Some(origins) => {
            let parsed: Result<Vec<HeaderValue>, _> = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(HeaderValue::from_str)
                .collect();
            let parsed = parsed.context("invalid CORS origin in cors_allowed_origins")?;
            Ok(CorsLayer::new()
                .allow_origin(parsed)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any))
        }
        None => {
            if !config.is_development() {
                warn!("no CORS origins configured outside development; allowing any origin");
            }
            Ok(CorsLayer::permissive())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => warn!("failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
