//! RouteSafe demo server
//!
//! Main entry point for the demo routing backend.

use axum::Router;
use axum::http::{HeaderValue, Method};
use infrastructure::{AppConfig, ServerConfig, init_logging};
use presentation_http::create_router;
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config.logging)?;

    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }
    if let Err(problems) = config.validate() {
        anyhow::bail!("Invalid configuration:\n{problems}");
    }

    info!("RouteSafe demo server v{} starting...", env!("CARGO_PKG_VERSION"));

    let app = with_middleware(create_router(), &config.server);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Add tracing and CORS (order matters: last added = outermost)
fn with_middleware(app: Router, server: &ServerConfig) -> Router {
    let app = app.layer(TraceLayer::new_for_http());
    if !server.cors_enabled {
        return app;
    }

    let cors = if server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };
    app.layer(cors)
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
