//! Fetch Abstraction
//!
//! A [`Fetch`] is whatever actually moves a request: the network
//! ([`ReqwestFetch`]) or an in-process router ([`LocalFetch`]). Callers
//! that want to control transport hand one in explicitly.

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{header::CONTENT_TYPE, HeaderMap, Method, Request, StatusCode},
    Router,
};
use thiserror::Error;
use tower::util::ServiceExt;

/// Outbound request handed to a [`Fetch`]
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: Method,
    /// Absolute URL for network fetches, a path for local ones
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl FetchRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }
}

/// Response returned by a [`Fetch`]
///
/// The body is read eagerly; if reading it failed the reason is kept so
/// callers can decide whether that matters.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    body: Result<Bytes, String>,
}

impl FetchResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: Ok(body.into()),
        }
    }

    /// Response whose body could not be read
    pub fn with_unreadable_body(
        status: StatusCode,
        headers: HeaderMap,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            status,
            headers,
            body: Err(reason.into()),
        }
    }

    /// True for any 2xx status
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    pub fn bytes(&self) -> Result<&Bytes, FetchError> {
        self.body
            .as_ref()
            .map_err(|reason| FetchError::Body(reason.clone()))
    }

    /// Body as text, or an empty string if it could not be read
    pub fn text_lossy(&self) -> String {
        self.body
            .as_ref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default()
    }
}

/// Transport-level failures. HTTP error statuses are not failures here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if e.is_builder() {
            FetchError::InvalidRequest(e.to_string())
        } else {
            FetchError::Other(e.to_string())
        }
    }
}

/// Something that can perform a [`FetchRequest`]
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError>;
}

/// Network fetch backed by a shared reqwest client
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetch {
    client: reqwest::Client,
}

impl ReqwestFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for ReqwestFetch {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let mut builder = self
            .client
            .request(request.method, request.url.as_str())
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();

        Ok(match response.bytes().await {
            Ok(body) => FetchResponse::new(status, headers, body),
            Err(e) => FetchResponse::with_unreadable_body(status, headers, e.to_string()),
        })
    }
}

/// In-process fetch that dispatches straight into an axum router.
///
/// This is the server-side equivalent of a same-origin fetch: no socket is
/// opened, the request runs through the router's handlers and layers.
#[derive(Clone)]
pub struct LocalFetch {
    router: Router,
}

impl LocalFetch {
    pub fn new(router: Router) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Fetch for LocalFetch {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let mut builder = Request::builder()
            .method(request.method)
            .uri(request.url.as_str());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(request.headers);
        }
        let body = request.body.map(Body::from).unwrap_or_else(Body::empty);
        let req = builder
            .body(body)
            .map_err(|e| FetchError::InvalidRequest(e.to_string()))?;

        let response = match self.router.clone().oneshot(req).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        let (parts, body) = response.into_parts();
        Ok(match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => FetchResponse::new(parts.status, parts.headers, bytes),
            Err(e) => FetchResponse::with_unreadable_body(parts.status, parts.headers, e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, routing::get};

    #[test]
    fn test_text_lossy_on_unreadable_body() {
        let response = FetchResponse::with_unreadable_body(
            StatusCode::BAD_GATEWAY,
            HeaderMap::new(),
            "connection reset",
        );
        assert_eq!(response.text_lossy(), "");
        assert_eq!(
            response.bytes().unwrap_err(),
            FetchError::Body("connection reset".to_string())
        );
    }

    #[tokio::test]
    async fn test_local_fetch_dispatches_into_router() {
        let router = Router::new().route(
            "/api/echo/:word",
            get(|Path(word): Path<String>| async move { format!("echo {}", word) }),
        );
        let fetch = LocalFetch::new(router);

        let response = fetch.fetch(FetchRequest::get("/api/echo/hello")).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.text_lossy(), "echo hello");

        let missing = fetch.fetch(FetchRequest::get("/api/nope")).await.unwrap();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
    }
}
