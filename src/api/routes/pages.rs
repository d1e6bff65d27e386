//! Page Routes
//!
//! Serve each routed page's view model as JSON. A renderer turns these
//! into markup; failures carry the page status and message.
//!
//! - GET / - event creation form
//! - GET /event/:id - organizer dashboard
//! - GET /register/:token - registration form
//! - GET /join/:token - assignment reveal
//! - GET /my/:token - personal status

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::pages::{
    EventPage, HomePage, JoinPage, MyStatusPage, PageError, PageLoader, RegisterPage,
};

pub async fn home(State(loader): State<Arc<PageLoader>>) -> Json<HomePage> {
    Json(loader.load_home())
}

pub async fn event(
    State(loader): State<Arc<PageLoader>>,
    Path(id): Path<String>,
) -> Result<Json<EventPage>, PageError> {
    loader.load_event(&id).await.map(Json)
}

pub async fn register(
    State(loader): State<Arc<PageLoader>>,
    Path(token): Path<String>,
) -> Result<Json<RegisterPage>, PageError> {
    loader.load_registration(&token).await.map(Json)
}

pub async fn join(
    State(loader): State<Arc<PageLoader>>,
    Path(token): Path<String>,
) -> Result<Json<JoinPage>, PageError> {
    loader.load_assignment(&token).await.map(Json)
}

pub async fn my_status(
    State(loader): State<Arc<PageLoader>>,
    Path(token): Path<String>,
) -> Result<Json<MyStatusPage>, PageError> {
    loader.load_my_status(&token).await.map(Json)
}
