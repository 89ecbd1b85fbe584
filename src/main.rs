//! simple-router demo server.
//!
//! Serves a small set of regex routes through the router:
//!
//! ```text
//! GET  /health                    → "ok"
//! GET  /greet/(?P<name>\w+)       → {"name": "..."}
//! POST /echo                      → request body echoed back
//! ```

use std::path::PathBuf;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Json},
};
use clap::Parser;
use serde_json::json;

use simple_router::http::HttpServer;
use simple_router::lifecycle::{signals, startup, Shutdown};
use simple_router::observability::init_logging;
use simple_router::routing::{get_param, RouteError, Router};

#[derive(Parser)]
#[command(name = "simple-router")]
#[command(about = "Regex-routed demo HTTP server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

fn demo_routes() -> Result<Router, RouteError> {
    let mut router = Router::new();
    router
        .get("/health", |_req: Request<Body>| async { "ok" })?
        .get(r"/greet/(?P<name>\w+)", |req: Request<Body>| async move {
            let name = get_param(&req, "name").unwrap_or_default().to_string();
            Json(json!({ "name": name }))
        })?
        .post("/echo", |req: Request<Body>| async move {
            match axum::body::to_bytes(req.into_body(), 64 * 1024).await {
                Ok(bytes) => (StatusCode::OK, bytes).into_response(),
                Err(_) => StatusCode::PAYLOAD_TOO_LARGE.into_response(),
            }
        })?;
    Ok(router)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = startup::load_with_bind_override(cli.config.as_deref(), cli.bind)?;

    init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let router = demo_routes()?;
    let listener = startup::bind_listener(&config.listener).await?;

    let shutdown = Shutdown::new();
    signals::forward_to(shutdown.clone());

    let server = HttpServer::new(config, router);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
