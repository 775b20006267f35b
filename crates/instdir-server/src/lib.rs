//! Read-only HTTP surface over the institution directory.
//!
//! | Route | Body |
//! |---|---|
//! | `GET /institutions/` | paginated list, filters on the query string |
//! | `GET /institutions/countries/` | `{ "countries": [..] }` |
//! | `GET /institutions/{id}/` | full detail, 404 `{"detail": ..}` if unknown |
//! | `GET /stats/` | dataset counts |
//! | `GET /health` | `ok` |
//!
//! The static `countries/` segment takes precedence over `{id}`, so an
//! institution whose id is literally `countries` has no detail route.
//! Imported ids are the export's own id cells or row positions.
//!
//! A repeated list parameter (`?page=2&page=3`) keeps its last value.
//!
//! Configuration comes from `INSTDIR_*` environment variables, see
//! [`config::Config::load`].

use std::sync::Arc;

use axum::{routing::get, Router};
use signal::ctrl_c;
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use routes::{countries_handler, detail_handler, health_handler, list_handler, stats_handler};
use state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/institutions/", get(list_handler))
        .route("/institutions/countries/", get(countries_handler))
        .route("/institutions/:id/", get(detail_handler))
        .route("/stats/", get(stats_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// `INSTDIR_LOG`, then `RUST_LOG`, then `info`.
pub fn init_tracing() {
    let filter = std::env::var("INSTDIR_LOG")
        .ok()
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    fmt().with_env_filter(filter).init();
}

pub async fn start_server(config: Config) -> anyhow::Result<()> {
    info!("Initializing state...");
    let state = AppState::new(&config)?;

    info!("Binding to {}", config.bind);
    let listener = TcpListener::bind(&config.bind).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
                info!("Received SIGTERM, shutting down");
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
