//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::client::Fetch;
use crate::config::{Config, ServerConfig};
use crate::proxy::BackendProxy;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Forwarder for the `/api/...` passthrough routes
    pub proxy: Arc<BackendProxy>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Festive decorations flag handed to the home page
    pub christmas_theme: bool,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(proxy: BackendProxy, config: ServerConfig, christmas_theme: bool) -> Self {
        Self {
            proxy: Arc::new(proxy),
            config: Arc::new(config),
            christmas_theme,
            start_time: Instant::now(),
        }
    }

    /// Build state from resolved configuration, sending backend calls through `fetch`
    pub fn from_config(config: &Config, fetch: Arc<dyn Fetch>) -> Self {
        let proxy = BackendProxy::new(config.backend.api_base_url.clone(), fetch);
        Self::new(proxy, config.server.clone(), config.theme.christmas)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
