//! Passthrough Routes
//!
//! Same-origin mirrors of the backend API. Every handler forwards to the
//! backend path of the same shape and relays the answer untouched.
//!
//! - POST /api/event
//! - GET /api/event/:id
//! - POST /api/event/:id/send-emails
//! - GET, POST /api/event/register/:token
//! - PATCH /api/participant/:id
//! - GET /api/participant/me/:token
//! - GET /api/draw/reveal/:token

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, Method},
};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::client::path_segment;
use crate::proxy::{InboundRequest, ProxiedResponse, ProxyOptions};

async fn relay(
    state: &AppState,
    inbound: InboundRequest,
    method: Method,
    path: String,
) -> ApiResult<ProxiedResponse> {
    Ok(state
        .proxy
        .forward(&inbound, ProxyOptions::new(method, path))
        .await?)
}

/// POST /api/event
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<ProxiedResponse> {
    relay(&state, InboundRequest::new(headers, body), Method::POST, "/event".to_string()).await
}

/// GET /api/event/:id
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<ProxiedResponse> {
    let path = format!("/event/{}", path_segment(&id));
    relay(&state, InboundRequest::default(), Method::GET, path).await
}

/// POST /api/event/:id/send-emails
pub async fn send_emails(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<ProxiedResponse> {
    let path = format!("/event/{}/send-emails", path_segment(&id));
    relay(&state, InboundRequest::new(headers, body), Method::POST, path).await
}

/// GET /api/event/register/:token
pub async fn get_registration(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> ApiResult<ProxiedResponse> {
    let path = format!("/event/register/{}", path_segment(&token));
    relay(&state, InboundRequest::default(), Method::GET, path).await
}

/// POST /api/event/register/:token
pub async fn submit_registration(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<ProxiedResponse> {
    let path = format!("/event/register/{}", path_segment(&token));
    relay(&state, InboundRequest::new(headers, body), Method::POST, path).await
}

/// PATCH /api/participant/:id
pub async fn update_participant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<ProxiedResponse> {
    let path = format!("/participant/{}", path_segment(&id));
    relay(&state, InboundRequest::new(headers, body), Method::PATCH, path).await
}

/// GET /api/participant/me/:token
pub async fn get_my_status(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> ApiResult<ProxiedResponse> {
    let path = format!("/participant/me/{}", path_segment(&token));
    relay(&state, InboundRequest::default(), Method::GET, path).await
}

/// GET /api/draw/reveal/:token
pub async fn reveal_assignment(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> ApiResult<ProxiedResponse> {
    let path = format!("/draw/reveal/{}", path_segment(&token));
    relay(&state, InboundRequest::default(), Method::GET, path).await
}
