//! Picko Gateway HTTP Server
//!
//! HTTP layer for the gift-exchange front end, built with Axum.
//!
//! # Endpoints
//!
//! ## API passthrough (relayed verbatim to the backend)
//! - `POST /api/event` - Create an event
//! - `GET /api/event/:id` - Event detail
//! - `POST /api/event/:id/send-emails` - Notify participants
//! - `GET /api/event/register/:token` - Event behind a registration link
//! - `POST /api/event/register/:token` - Register a participant
//! - `PATCH /api/participant/:id` - Update a participant
//! - `GET /api/participant/me/:token` - Personal status
//! - `GET /api/draw/reveal/:token` - Assignment behind a reveal link
//!
//! ## Page data
//! - `GET /` - Home (event creation form)
//! - `GET /event/:id` - Organizer dashboard
//! - `GET /register/:token` - Registration form
//! - `GET /join/:token` - Assignment reveal
//! - `GET /my/:token` - Personal status
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use picko::api::{serve, AppState};
//! use picko::client::ReqwestFetch;
//! use picko::config::Config;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let state = AppState::from_config(&config, Arc::new(ReqwestFetch::new()));
//!     serve(state, &config.server).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::client::LocalFetch;
use crate::config::ServerConfig;
use crate::pages::PageLoader;

/// Passthrough routes, relative to `/api`
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/event", post(routes::passthrough::create_event))
        .route("/event/:id", get(routes::passthrough::get_event))
        .route("/event/:id/send-emails", post(routes::passthrough::send_emails))
        .route(
            "/event/register/:token",
            get(routes::passthrough::get_registration).post(routes::passthrough::submit_registration),
        )
        .route("/participant/:id", patch(routes::passthrough::update_participant))
        .route("/participant/me/:token", get(routes::passthrough::get_my_status))
        .route("/draw/reveal/:token", get(routes::passthrough::reveal_assignment))
}

fn page_routes() -> Router<Arc<PageLoader>> {
    Router::new()
        .route("/", get(routes::pages::home))
        .route("/event/:id", get(routes::pages::event))
        .route("/register/:token", get(routes::pages::register))
        .route("/join/:token", get(routes::pages::join))
        .route("/my/:token", get(routes::pages::my_status))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the gateway router with all routes and middleware.
///
/// Page loaders reach the `/api` routes through an in-process
/// [`LocalFetch`], so page data always goes through the same proxy path
/// a browser would use.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let christmas_theme = state.christmas_theme;

    // Create shared state
    let shared_state = Arc::new(state);

    let api = Router::new()
        .nest("/api", api_routes())
        .with_state(Arc::clone(&shared_state));

    let loader = PageLoader::new(Arc::new(LocalFetch::new(api.clone())), christmas_theme);
    let pages = page_routes().with_state(Arc::new(loader));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health))
        .with_state(shared_state);

    Router::new()
        .merge(api)
        .merge(pages)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the gateway server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Picko gateway listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Picko gateway shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
