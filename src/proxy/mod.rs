//! Backend Proxy
//!
//! Relays same-origin `/api/...` calls to the backend service. The payload
//! is never touched: method, body and content type go upstream as they
//! came in, and status, body and content type come back verbatim.

use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use thiserror::Error;

use crate::client::{join_url, Fetch, FetchError, FetchRequest};

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Where and how to forward a request
#[derive(Debug, Clone)]
pub struct ProxyOptions {
    pub method: Method,
    /// Backend-relative path, e.g. `/event/42`
    pub path: String,
    /// Forward the inbound body. Defaults to true except for GET/HEAD.
    pub forward_body: Option<bool>,
}

impl ProxyOptions {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            forward_body: None,
        }
    }

    pub fn forward_body(mut self, forward: bool) -> Self {
        self.forward_body = Some(forward);
        self
    }

    fn should_forward_body(&self) -> bool {
        self.forward_body
            .unwrap_or(self.method != Method::GET && self.method != Method::HEAD)
    }
}

/// The parts of an inbound request the proxy needs
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl InboundRequest {
    pub fn new(headers: HeaderMap, body: Bytes) -> Self {
        Self { headers, body }
    }
}

/// Upstream response, relayed as-is
#[derive(Debug, Clone)]
pub struct ProxiedResponse {
    pub status: StatusCode,
    pub content_type: HeaderValue,
    pub body: Bytes,
}

impl IntoResponse for ProxiedResponse {
    fn into_response(self) -> Response {
        (self.status, [(CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ProxyError {
    /// The backend could not be reached or its body could not be read
    #[error("Upstream request to {url} failed: {source}")]
    Upstream {
        url: String,
        #[source]
        source: FetchError,
    },
}

/// Forwards requests to the configured backend
pub struct BackendProxy {
    base_url: String,
    fetch: Arc<dyn Fetch>,
}

impl BackendProxy {
    pub fn new(base_url: impl Into<String>, fetch: Arc<dyn Fetch>) -> Self {
        Self {
            base_url: base_url.into(),
            fetch,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forward `inbound` to `<base_url>/<path>` and relay the answer
    pub async fn forward(
        &self,
        inbound: &InboundRequest,
        opts: ProxyOptions,
    ) -> Result<ProxiedResponse, ProxyError> {
        let url = join_url(&self.base_url, &opts.path);
        let forward_body = opts.should_forward_body();

        let mut request = FetchRequest::new(opts.method.clone(), url.clone());
        if forward_body {
            let content_type = inbound
                .headers
                .get(CONTENT_TYPE)
                .cloned()
                .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
            request.headers.insert(CONTENT_TYPE, content_type);
            request.body = Some(inbound.body.clone());
        }

        tracing::debug!(method = %opts.method, url = %url, forward_body, "Proxying to backend");

        let upstream = self.fetch.fetch(request).await.map_err(|source| {
            tracing::warn!(url = %url, error = %source, "Backend request failed");
            ProxyError::Upstream {
                url: url.clone(),
                source,
            }
        })?;

        let body = upstream
            .bytes()
            .map_err(|source| ProxyError::Upstream {
                url: url.clone(),
                source,
            })?
            .clone();

        let content_type = upstream
            .headers
            .get(CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

        tracing::debug!(url = %url, status = %upstream.status, "Backend responded");

        Ok(ProxiedResponse {
            status: upstream.status,
            content_type,
            body,
        })
    }

    /// Whether the backend answers HTTP at all, whatever the status
    pub async fn ping(&self) -> bool {
        self.fetch
            .fetch(FetchRequest::get(join_url(&self.base_url, "/")))
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FetchResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingFetch {
        status: StatusCode,
        headers: HeaderMap,
        body: &'static [u8],
        fail: bool,
        seen: Mutex<Vec<FetchRequest>>,
    }

    impl RecordingFetch {
        fn answering(status: StatusCode, content_type: Option<&'static str>, body: &'static [u8]) -> Arc<Self> {
            let mut headers = HeaderMap::new();
            if let Some(ct) = content_type {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
            }
            Arc::new(Self {
                status,
                headers,
                body,
                fail: false,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn unreachable() -> Arc<Self> {
            Arc::new(Self {
                status: StatusCode::OK,
                headers: HeaderMap::new(),
                body: b"",
                fail: true,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn last(&self) -> FetchRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Fetch for RecordingFetch {
        async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
            self.seen.lock().unwrap().push(request);
            if self.fail {
                return Err(FetchError::Connect("connection refused".to_string()));
            }
            Ok(FetchResponse::new(self.status, self.headers.clone(), self.body))
        }
    }

    fn inbound(content_type: Option<&'static str>, body: &'static str) -> InboundRequest {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
        }
        InboundRequest::new(headers, Bytes::from_static(body.as_bytes()))
    }

    #[tokio::test]
    async fn test_get_does_not_forward_body() {
        let fetch = RecordingFetch::answering(StatusCode::OK, Some("application/json"), b"{}");
        let proxy = BackendProxy::new("http://backend:8010", fetch.clone());

        proxy
            .forward(&inbound(None, "ignored"), ProxyOptions::new(Method::GET, "/event/1"))
            .await
            .unwrap();

        let sent = fetch.last();
        assert_eq!(sent.url, "http://backend:8010/event/1");
        assert_eq!(sent.method, Method::GET);
        assert!(sent.body.is_none());
        assert!(sent.headers.get(CONTENT_TYPE).is_none());
    }

    #[tokio::test]
    async fn test_post_forwards_body_and_content_type() {
        let fetch = RecordingFetch::answering(StatusCode::CREATED, Some("application/json"), b"{}");
        let proxy = BackendProxy::new("http://backend:8010/", fetch.clone());

        proxy
            .forward(
                &inbound(Some("application/json; charset=utf-8"), r#"{"name":"Ann"}"#),
                ProxyOptions::new(Method::POST, "/event/register/tok"),
            )
            .await
            .unwrap();

        let sent = fetch.last();
        assert_eq!(sent.url, "http://backend:8010/event/register/tok");
        assert_eq!(sent.body.unwrap(), Bytes::from_static(br#"{"name":"Ann"}"#));
        assert_eq!(sent.headers[CONTENT_TYPE], "application/json; charset=utf-8");
    }

    #[tokio::test]
    async fn test_missing_inbound_content_type_defaults_to_json() {
        let fetch = RecordingFetch::answering(StatusCode::OK, None, b"{}");
        let proxy = BackendProxy::new("http://backend", fetch.clone());

        proxy
            .forward(&inbound(None, "{}"), ProxyOptions::new(Method::PATCH, "/participant/3"))
            .await
            .unwrap();

        assert_eq!(fetch.last().headers[CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn test_forward_body_can_be_suppressed() {
        let fetch = RecordingFetch::answering(StatusCode::OK, None, b"{}");
        let proxy = BackendProxy::new("http://backend", fetch.clone());

        proxy
            .forward(
                &inbound(Some("text/plain"), "payload"),
                ProxyOptions::new(Method::POST, "/event/1/send-emails").forward_body(false),
            )
            .await
            .unwrap();

        let sent = fetch.last();
        assert!(sent.body.is_none());
        assert!(sent.headers.get(CONTENT_TYPE).is_none());
    }

    #[tokio::test]
    async fn test_relays_status_body_and_content_type_verbatim() {
        let body: &'static [u8] = b"{\"detail\":\"Event not found\"}  \xe2\x9c\x93";
        let fetch = RecordingFetch::answering(StatusCode::NOT_FOUND, Some("application/problem+json"), body);
        let proxy = BackendProxy::new("http://backend", fetch);

        let relayed = proxy
            .forward(&InboundRequest::default(), ProxyOptions::new(Method::GET, "/event/999"))
            .await
            .unwrap();

        assert_eq!(relayed.status, StatusCode::NOT_FOUND);
        assert_eq!(relayed.content_type, "application/problem+json");
        assert_eq!(relayed.body.as_ref(), body);
    }

    #[tokio::test]
    async fn test_missing_upstream_content_type_defaults_to_json() {
        let fetch = RecordingFetch::answering(StatusCode::OK, None, b"[]");
        let proxy = BackendProxy::new("http://backend", fetch);

        let relayed = proxy
            .forward(&InboundRequest::default(), ProxyOptions::new(Method::GET, "/draw/reveal/x"))
            .await
            .unwrap();
        assert_eq!(relayed.content_type, "application/json");
    }

    #[tokio::test]
    async fn test_transport_failure_is_upstream_error() {
        let proxy = BackendProxy::new("http://backend", RecordingFetch::unreachable());

        let err = proxy
            .forward(&InboundRequest::default(), ProxyOptions::new(Method::GET, "/event/1"))
            .await
            .unwrap_err();

        let ProxyError::Upstream { url, source } = err;
        assert_eq!(url, "http://backend/event/1");
        assert!(matches!(source, FetchError::Connect(_)));
        assert!(!BackendProxy::new("http://backend", RecordingFetch::unreachable()).ping().await);
    }
}
