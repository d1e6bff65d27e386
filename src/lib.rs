//! # Picko
//!
//! Front-end gateway for a Secret Santa gift-exchange service. Sits in
//! front of the Picko backend API and serves the data behind each page.
//!
//! ## Features
//!
//! - **Same-origin proxy**: `/api/...` calls relayed verbatim to the backend
//! - **Page data**: one loader per routed page, with typed not-found/failure
//! - **Transformers**: backend snake_case payloads to camelCase view models
//! - **Client helpers**: feedback flag, persisted dark mode, localized dates
//!
//! ## Modules
//!
//! - [`client`]: Outbound HTTP with a pluggable transport
//! - [`proxy`]: Backend forwarder behind the passthrough routes
//! - [`models`]: Backend wire types, view models and transformers
//! - [`pages`]: Page loaders and their errors
//! - [`ui`]: Front-end state helpers
//! - [`api`]: HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use picko::{AppState, Config, ReqwestFetch};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let state = AppState::from_config(&config, Arc::new(ReqwestFetch::new()));
//!
//!     picko::serve(state, &config.server).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod models;
pub mod pages;
pub mod proxy;
pub mod ui;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, AppState};

pub use client::{
    fetch_json, ApiClient, ClientError, Fetch, FetchError, LocalFetch, ReqwestFetch,
    RequestOptions,
};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig};

pub use models::{
    transform_assignment, transform_event, transform_my_status, transform_registration_event,
    AssignmentData, EventData, MyStatusData, RegistrationEventData,
};

pub use pages::{PageError, PageLoader};

pub use proxy::{BackendProxy, ProxyError, ProxyOptions};

pub use ui::{format_date_long, DarkMode, FeedbackState, FilePreferenceStore, PreferenceStore};
