//! Data Transfer Objects
//!
//! Response types owned by the gateway itself. Everything under `/api`
//! is relayed untouched and has no DTO here.

use serde::Serialize;

/// Full health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "ok" or "unreachable"
    pub backend: String,
    pub backend_url: String,
    pub uptime_seconds: u64,
    pub version: String,
}
