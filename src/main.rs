use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod auth;
mod batch;
mod carriers;
mod cli;
mod config;
mod errors;
mod models;
mod proxy;

use auth::TokenCache;
use proxy::client::TrackingClient;

/// Shared application state passed to handlers.
pub struct AppState {
    pub config: config::Config,
    pub tracker: TrackingClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "trackgate=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    let result = match args.command {
        Some(cli::Commands::Serve { port }) => {
            let port = port.unwrap_or(cfg.port);
            run_server(cfg, port).await
        }
        Some(cli::Commands::Batch { file }) => run_batch(cfg, &file).await,
        None => {
            let port = cfg.port;
            run_server(cfg, port).await
        }
    };

    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

async fn run_server(cfg: config::Config, port: u16) -> anyhow::Result<()> {
    let tokens = TokenCache::new(&cfg);
    let tracker = TrackingClient::new(&cfg, tokens);

    let state = Arc::new(AppState {
        tracker,
        config: cfg,
    });

    let app = api::api_router()
        .with_state(state.clone())
        // CSV uploads are small; 1 MB is plenty
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .layer(axum::middleware::from_fn(request_id_middleware));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Trackgate listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS: the configured frontend origin plus localhost for development.
fn cors_layer(cfg: &config::Config) -> CorsLayer {
    use axum::http::{HeaderName, Method};
    use tower_http::cors::AllowOrigin;

    let frontend_origin = cfg.frontend_origin.clone();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            let origin_str = origin.to_str().unwrap_or("");
            frontend_origin.as_deref() == Some(origin_str)
                || origin_str.starts_with("http://localhost:")
                || origin_str.starts_with("http://127.0.0.1:")
        }))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
        ])
}

/// Middleware: injects a unique X-Request-Id into every response so clients
/// can correlate errors with gateway logs.
async fn request_id_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let req_id = uuid::Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(val) = axum::http::HeaderValue::from_str(&req_id) {
        resp.headers_mut().insert("x-request-id", val);
    }
    resp
}

async fn run_batch(cfg: config::Config, file: &Path) -> anyhow::Result<()> {
    let csv_text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let tokens = TokenCache::new(&cfg);
    let tracker = TrackingClient::new(&cfg, tokens);
    let items = batch::run(&tracker, &csv_text).await;

    if items.is_empty() {
        println!("No valid rows found.");
        return Ok(());
    }

    println!(
        "{:<10} {:<16} {:<16} {:<8} DETAIL",
        "ID", "CARRIER", "TRACKING", "STATUS"
    );
    for item in &items {
        let detail = match item.status {
            batch::BatchStatus::Success => item
                .result
                .as_ref()
                .and_then(|r| r.last_event.as_ref())
                .and_then(|e| e.description.clone())
                .unwrap_or_else(|| "-".into()),
            _ => item.error.clone().unwrap_or_else(|| "-".into()),
        };
        println!(
            "{:<10} {:<16} {:<16} {:<8} {}",
            item.id,
            item.carrier_id,
            item.tracking_number,
            item.status.as_str(),
            detail
        );
    }

    Ok(())
}
