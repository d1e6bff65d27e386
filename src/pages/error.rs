//! Page Errors
//!
//! What a page shows when its loader fails.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::client::FetchError;

#[derive(Error, Debug)]
pub enum PageError {
    /// The proxy route answered 404
    #[error("{message}")]
    NotFound { message: String },

    /// The proxy route answered any other non-2xx status
    #[error("{message}")]
    LoadFailed { status: u16, message: String },

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid page data: {0}")]
    Decode(#[from] serde_json::Error),
}

impl PageError {
    pub fn status(&self) -> u16 {
        match self {
            PageError::NotFound { .. } => StatusCode::NOT_FOUND.as_u16(),
            PageError::LoadFailed { status, .. } => *status,
            PageError::Fetch(_) | PageError::Decode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR.as_u16()
            }
        }
    }
}

/// Body of an error page
#[derive(Debug, Serialize)]
pub struct PageErrorBody {
    pub status: u16,
    pub message: String,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            PageError::NotFound { .. } | PageError::LoadFailed { .. } => {
                tracing::debug!(status, error = %self, "Page load failed");
            }
            PageError::Fetch(_) | PageError::Decode(_) => {
                tracing::error!(status, error = %self, "Page load failed");
            }
        }

        let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = PageErrorBody {
            status: code.as_u16(),
            message: self.to_string(),
        };
        (code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = PageError::NotFound {
            message: "Event not found".to_string(),
        };
        assert_eq!(not_found.status(), 404);
        assert_eq!(not_found.to_string(), "Event not found");

        let failed = PageError::LoadFailed {
            status: 503,
            message: "Failed to load event".to_string(),
        };
        assert_eq!(failed.status(), 503);

        assert_eq!(PageError::Fetch(FetchError::Timeout).status(), 500);
    }

    #[test]
    fn test_into_response_uses_page_status() {
        let response = PageError::LoadFailed {
            status: 502,
            message: "Failed to load assignment".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
