//! JSON HTTP Client
//!
//! [`fetch_json`] sends one request and decodes a JSON response, turning
//! any non-2xx status into [`ClientError::Status`]. No retries.

use axum::{
    body::Bytes,
    http::{
        header::{HeaderName, CONTENT_TYPE},
        HeaderMap, HeaderValue, Method, StatusCode,
    },
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use thiserror::Error;

use super::fetch::{Fetch, FetchError, FetchRequest, ReqwestFetch};

/// Errors from [`fetch_json`]
#[derive(Error, Debug)]
pub enum ClientError {
    /// Non-2xx response
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        /// Raw response body, empty if it could not be read
        body_text: String,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of a [`ClientError::Status`]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

/// Options for [`fetch_json`]
#[derive(Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    /// Transport to use; a fresh [`ReqwestFetch`] when `None`
    pub fetch: Option<Arc<dyn Fetch>>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
            fetch: None,
        }
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    /// Request with `payload` serialized as the JSON body
    pub fn json<T: Serialize>(method: Method, payload: &T) -> Result<Self, ClientError> {
        Ok(Self {
            method,
            body: Some(Bytes::from(serde_json::to_vec(payload)?)),
            ..Default::default()
        })
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_fetch(mut self, fetch: Arc<dyn Fetch>) -> Self {
        self.fetch = Some(fetch);
        self
    }
}

/// Send a request and decode the JSON response as `T`.
///
/// A non-empty body without an explicit `Content-Type` is sent as
/// `application/json`.
pub async fn fetch_json<T: DeserializeOwned>(
    target: &str,
    options: RequestOptions,
) -> Result<T, ClientError> {
    let RequestOptions {
        method,
        mut headers,
        body,
        fetch,
    } = options;

    let fetch = fetch.unwrap_or_else(|| Arc::new(ReqwestFetch::new()));

    let has_body = body.as_ref().is_some_and(|b| !b.is_empty());
    if has_body && !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    tracing::debug!(method = %method, target = %target, "Sending request");

    let response = fetch
        .fetch(FetchRequest {
            method,
            url: target.to_string(),
            headers,
            body,
        })
        .await?;

    if !response.is_success() {
        let status = response.status.as_u16();
        return Err(ClientError::Status {
            status,
            message: format!("Request failed ({})", status),
            body_text: response.text_lossy(),
        });
    }

    Ok(serde_json::from_slice(response.bytes()?)?)
}

/// Join a base URL and a path with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Percent-encode a value for use as a single path segment.
///
/// `.` and `..` are encoded too so a token can never climb the path.
pub fn path_segment(value: &str) -> String {
    match value {
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        other => urlencoding::encode(other).into_owned(),
    }
}

/// Client bound to a base URL, used by the CLI to talk to the gateway
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    fetch: Arc<dyn Fetch>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_fetch(base_url, Arc::new(ReqwestFetch::new()))
    }

    pub fn with_fetch(base_url: impl Into<String>, fetch: Arc<dyn Fetch>) -> Self {
        Self {
            base_url: base_url.into(),
            fetch,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let options = RequestOptions::new(Method::GET).with_fetch(Arc::clone(&self.fetch));
        fetch_json(&self.url(path), options).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, ClientError> {
        let options =
            RequestOptions::json(Method::POST, payload)?.with_fetch(Arc::clone(&self.fetch));
        fetch_json(&self.url(path), options).await
    }

    pub async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, ClientError> {
        let options =
            RequestOptions::json(Method::PATCH, payload)?.with_fetch(Arc::clone(&self.fetch));
        fetch_json(&self.url(path), options).await
    }

    /// POST without a body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let options = RequestOptions::new(Method::POST).with_fetch(Arc::clone(&self.fetch));
        fetch_json(&self.url(path), options).await
    }
}
