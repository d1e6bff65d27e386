//! Page Loaders
//!
//! One loader per routed page. Each issues a single same-origin GET to the
//! matching `/api/...` proxy route, maps the status to a [`PageError`] and
//! runs the relevant transformer. Nothing is retried or cached.

use axum::http::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use super::error::PageError;
use crate::client::{path_segment, Fetch, FetchRequest};
use crate::models::{
    transform_assignment, transform_event, transform_my_status, transform_registration_event,
    AssignmentData, BackendAssignment, BackendEvent, BackendMyStatus, EventData, MyStatusData,
    RegistrationEventData, CURRENCIES, DEFAULT_CURRENCY, LANGUAGES,
};

/// Error messages a page shows for its two failure statuses
struct Messages {
    not_found: &'static str,
    failed: &'static str,
}

const EVENT_MESSAGES: Messages = Messages {
    not_found: "Event not found",
    failed: "Failed to load event",
};

const ASSIGNMENT_MESSAGES: Messages = Messages {
    not_found: "Assignment not found. The link may be invalid or the draw hasn't happened yet.",
    failed: "Failed to load assignment",
};

const MY_STATUS_MESSAGES: Messages = Messages {
    not_found: "Your link is invalid or has expired.",
    failed: "Failed to load your status",
};

// ============================================
// PAGE VIEW MODELS
// ============================================

/// `/` - event creation form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub christmas_theme: bool,
    pub currencies: Vec<&'static str>,
    pub default_currency: &'static str,
    pub languages: Vec<&'static str>,
}

/// `/event/{id}` - organizer dashboard
#[derive(Debug, Clone, Serialize)]
pub struct EventPage {
    pub event: EventData,
}

/// `/register/{token}` - public registration form
#[derive(Debug, Clone, Serialize)]
pub struct RegisterPage {
    pub event: RegistrationEventData,
    pub token: String,
}

/// `/join/{token}` - assignment reveal
#[derive(Debug, Clone, Serialize)]
pub struct JoinPage {
    pub assignment: AssignmentData,
    pub token: String,
}

/// `/my/{token}` - personal status
#[derive(Debug, Clone, Serialize)]
pub struct MyStatusPage {
    #[serde(flatten)]
    pub status: MyStatusData,
    pub token: String,
}

// ============================================
// LOADER
// ============================================

/// Loads page view models through a same-origin [`Fetch`]
pub struct PageLoader {
    fetch: Arc<dyn Fetch>,
    christmas_theme: bool,
}

impl PageLoader {
    pub fn new(fetch: Arc<dyn Fetch>, christmas_theme: bool) -> Self {
        Self {
            fetch,
            christmas_theme,
        }
    }

    pub fn load_home(&self) -> HomePage {
        HomePage {
            christmas_theme: self.christmas_theme,
            currencies: CURRENCIES.to_vec(),
            default_currency: DEFAULT_CURRENCY,
            languages: LANGUAGES.to_vec(),
        }
    }

    pub async fn load_event(&self, id: &str) -> Result<EventPage, PageError> {
        let path = format!("/api/event/{}", path_segment(id));
        let backend: BackendEvent = self.get(&path, &EVENT_MESSAGES).await?;

        Ok(EventPage {
            event: transform_event(&backend),
        })
    }

    pub async fn load_registration(&self, token: &str) -> Result<RegisterPage, PageError> {
        let path = format!("/api/event/register/{}", path_segment(token));
        let backend: BackendEvent = self.get(&path, &EVENT_MESSAGES).await?;

        Ok(RegisterPage {
            event: transform_registration_event(&backend),
            token: token.to_string(),
        })
    }

    pub async fn load_assignment(&self, token: &str) -> Result<JoinPage, PageError> {
        let path = format!("/api/draw/reveal/{}", path_segment(token));
        let backend: BackendAssignment = self.get(&path, &ASSIGNMENT_MESSAGES).await?;

        Ok(JoinPage {
            assignment: transform_assignment(&backend),
            token: token.to_string(),
        })
    }

    pub async fn load_my_status(&self, token: &str) -> Result<MyStatusPage, PageError> {
        let path = format!("/api/participant/me/{}", path_segment(token));
        let backend: BackendMyStatus = self.get(&path, &MY_STATUS_MESSAGES).await?;

        Ok(MyStatusPage {
            status: transform_my_status(&backend),
            token: token.to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        messages: &Messages,
    ) -> Result<T, PageError> {
        let response = self.fetch.fetch(FetchRequest::get(path)).await?;

        if response.status == StatusCode::NOT_FOUND {
            return Err(PageError::NotFound {
                message: messages.not_found.to_string(),
            });
        }
        if !response.is_success() {
            return Err(PageError::LoadFailed {
                status: response.status.as_u16(),
                message: messages.failed.to_string(),
            });
        }

        Ok(serde_json::from_slice(response.bytes()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{FetchError, FetchResponse};
    use async_trait::async_trait;
    use axum::http::HeaderMap;
    use serde_json::json;
    use std::sync::Mutex;

    struct StubFetch {
        status: StatusCode,
        body: String,
        paths: Mutex<Vec<String>>,
    }

    impl StubFetch {
        fn new(status: StatusCode, body: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.to_string(),
                paths: Mutex::new(Vec::new()),
            })
        }

        fn paths(&self) -> Vec<String> {
            self.paths.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetch for StubFetch {
        async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
            self.paths.lock().unwrap().push(request.url);
            Ok(FetchResponse::new(self.status, HeaderMap::new(), self.body.clone()))
        }
    }

    struct DownFetch;

    #[async_trait]
    impl Fetch for DownFetch {
        async fn fetch(&self, _request: FetchRequest) -> Result<FetchResponse, FetchError> {
            Err(FetchError::Connect("refused".to_string()))
        }
    }

    fn backend_event() -> serde_json::Value {
        json!({
            "id": 12,
            "name": "Office",
            "max_amount": 50,
            "date": "2025-12-19",
            "currency": "EUR",
            "registration_deadline": "2025-12-10T18:00:00Z",
            "registration_token": "reg-tok",
            "is_draw_complete": true,
            "participants": [
                {"id": 1, "name": "Ann", "email": "ann@example.com", "language": "en", "wishlist": null, "reveal_token": "r1"},
                {"id": 2, "name": "Bob", "email": null, "language": "pl", "wishlist": "tea", "reveal_token": "r2"}
            ]
        })
    }

    #[tokio::test]
    async fn test_load_event_success() {
        let fetch = StubFetch::new(StatusCode::OK, backend_event());
        let loader = PageLoader::new(fetch.clone(), false);

        let page = loader.load_event("12").await.unwrap();
        assert_eq!(page.event.id, 12);
        assert_eq!(page.event.participants.len(), 2);
        assert_eq!(page.event.participants[1].share_token.as_deref(), Some("r2"));
        assert_eq!(fetch.paths(), vec!["/api/event/12"]);
    }

    #[tokio::test]
    async fn test_load_event_not_found() {
        let fetch = StubFetch::new(StatusCode::NOT_FOUND, json!({"detail": "Event not found"}));
        let loader = PageLoader::new(fetch, false);

        let err = loader.load_event("999").await.unwrap_err();
        assert_eq!(err.status(), 404);
        assert!(matches!(err, PageError::NotFound { ref message } if message == "Event not found"));
    }

    #[tokio::test]
    async fn test_load_event_other_status_is_load_failure() {
        let fetch = StubFetch::new(StatusCode::SERVICE_UNAVAILABLE, json!({}));
        let loader = PageLoader::new(fetch, false);

        match loader.load_event("1").await.unwrap_err() {
            PageError::LoadFailed { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Failed to load event");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_registration_uses_summary_projection() {
        let fetch = StubFetch::new(StatusCode::OK, backend_event());
        let loader = PageLoader::new(fetch.clone(), false);

        let page = loader.load_registration("reg-tok").await.unwrap();
        assert_eq!(page.token, "reg-tok");
        assert_eq!(fetch.paths(), vec!["/api/event/register/reg-tok"]);

        let value = serde_json::to_value(&page).unwrap();
        assert!(value["event"]["participants"][0].get("email").is_none());
        assert_eq!(value["event"]["registrationToken"], "reg-tok");
    }

    #[tokio::test]
    async fn test_load_assignment_messages() {
        let loader = PageLoader::new(StubFetch::new(StatusCode::NOT_FOUND, json!({})), false);
        let err = loader.load_assignment("nope").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Assignment not found. The link may be invalid or the draw hasn't happened yet."
        );

        let loader = PageLoader::new(StubFetch::new(StatusCode::INTERNAL_SERVER_ERROR, json!({})), false);
        let err = loader.load_assignment("x").await.unwrap_err();
        assert_eq!(err.status(), 500);
        assert_eq!(err.to_string(), "Failed to load assignment");
    }

    #[tokio::test]
    async fn test_load_assignment_success_keeps_token() {
        let fetch = StubFetch::new(
            StatusCode::OK,
            json!({
                "giver_name": "Ann",
                "receiver_name": "Bob",
                "receiver_wishlist": null,
                "event": {"name": "Office", "date": null, "max_amount": null, "currency": null}
            }),
        );
        let loader = PageLoader::new(fetch.clone(), false);

        let page = loader.load_assignment("r1").await.unwrap();
        assert_eq!(page.token, "r1");
        assert_eq!(page.assignment.receiver_name, "Bob");
        assert_eq!(fetch.paths(), vec!["/api/draw/reveal/r1"]);
    }

    #[tokio::test]
    async fn test_load_my_status_flattens_status() {
        let fetch = StubFetch::new(
            StatusCode::OK,
            json!({
                "participant_name": "Ann",
                "event": {
                    "id": 12, "name": "Office", "date": null, "max_amount": null,
                    "currency": null, "registration_deadline": "2025-12-10T18:00:00Z",
                    "is_draw_complete": false
                },
                "assignment": null
            }),
        );
        let loader = PageLoader::new(fetch, false);

        let page = loader.load_my_status("acc-1").await.unwrap();
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["participantName"], "Ann");
        assert_eq!(value["token"], "acc-1");
        assert_eq!(value["event"]["isDrawComplete"], false);
        assert_eq!(value["assignment"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_load_my_status_not_found_message() {
        let loader = PageLoader::new(StubFetch::new(StatusCode::NOT_FOUND, json!({})), false);
        let err = loader.load_my_status("gone").await.unwrap_err();
        assert_eq!(err.to_string(), "Your link is invalid or has expired.");
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let loader = PageLoader::new(Arc::new(DownFetch), false);
        let err = loader.load_event("1").await.unwrap_err();
        assert!(matches!(err, PageError::Fetch(FetchError::Connect(_))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let loader = PageLoader::new(StubFetch::new(StatusCode::OK, json!({"id": "x"})), false);
        let err = loader.load_event("1").await.unwrap_err();
        assert!(matches!(err, PageError::Decode(_)));
    }

    #[tokio::test]
    async fn test_token_is_encoded_in_path() {
        let fetch = StubFetch::new(StatusCode::NOT_FOUND, json!({}));
        let loader = PageLoader::new(fetch.clone(), false);

        let _ = loader.load_my_status("a/b c").await;
        assert_eq!(fetch.paths(), vec!["/api/participant/me/a%2Fb%20c"]);
    }

    #[test]
    fn test_load_home() {
        let loader = PageLoader::new(Arc::new(DownFetch), true);
        let value = serde_json::to_value(loader.load_home()).unwrap();
        assert_eq!(value["christmasTheme"], true);
        assert_eq!(value["defaultCurrency"], "PLN");
        assert_eq!(value["currencies"], json!(["PLN", "USD", "EUR"]));
    }
}
