//! Assignment and Status Models
//!
//! Shapes behind the reveal page (`/join/{token}`) and the personal
//! status page (`/my/{token}`).

use serde::{Deserialize, Serialize};

use super::event::EventInfo;

// ============================================
// BACKEND TYPES (snake_case)
// ============================================

/// Event snapshot embedded in a reveal response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendAssignmentEvent {
    pub name: String,
    pub date: Option<String>,
    pub max_amount: Option<i64>,
    pub currency: Option<String>,
}

/// Response of `GET /draw/reveal/{token}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendAssignment {
    pub giver_name: String,
    pub receiver_name: String,
    pub receiver_wishlist: Option<String>,
    pub event: BackendAssignmentEvent,
}

/// Event snapshot embedded in a status response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendEventSnapshot {
    pub id: i64,
    pub name: String,
    pub date: Option<String>,
    pub max_amount: Option<i64>,
    pub currency: Option<String>,
    pub registration_deadline: String,
    pub is_draw_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendAssignmentInfo {
    pub receiver_name: String,
    pub receiver_wishlist: Option<String>,
}

/// Response of `GET /participant/me/{token}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendMyStatus {
    pub participant_name: String,
    pub event: BackendEventSnapshot,
    /// `None` until the draw has happened
    pub assignment: Option<BackendAssignmentInfo>,
}

// ============================================
// VIEW MODELS (camelCase)
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentEvent {
    pub name: String,
    pub date: Option<String>,
    pub max_amount: Option<i64>,
    pub currency: Option<String>,
}

/// Who the viewer buys a gift for, with the event it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentData {
    pub giver_name: String,
    pub receiver_name: String,
    pub receiver_wishlist: Option<String>,
    pub event: AssignmentEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentInfo {
    pub receiver_name: String,
    pub receiver_wishlist: Option<String>,
}

/// Everything the personal status page shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyStatusData {
    pub participant_name: String,
    pub event: EventInfo,
    pub assignment: Option<AssignmentInfo>,
}

// ============================================
// TRANSFORMERS
// ============================================

pub fn transform_assignment(backend: &BackendAssignment) -> AssignmentData {
    AssignmentData {
        giver_name: backend.giver_name.clone(),
        receiver_name: backend.receiver_name.clone(),
        receiver_wishlist: backend.receiver_wishlist.clone(),
        event: AssignmentEvent {
            name: backend.event.name.clone(),
            date: backend.event.date.clone(),
            max_amount: backend.event.max_amount,
            currency: backend.event.currency.clone(),
        },
    }
}

pub fn transform_my_status(backend: &BackendMyStatus) -> MyStatusData {
    let event = &backend.event;
    MyStatusData {
        participant_name: backend.participant_name.clone(),
        event: EventInfo {
            id: event.id,
            name: event.name.clone(),
            date: event.date.clone(),
            max_amount: event.max_amount,
            currency: event.currency.clone(),
            registration_deadline: event.registration_deadline.clone(),
            is_draw_complete: event.is_draw_complete,
        },
        assignment: backend.assignment.as_ref().map(|a| AssignmentInfo {
            receiver_name: a.receiver_name.clone(),
            receiver_wishlist: a.receiver_wishlist.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transform_assignment() {
        let backend: BackendAssignment = serde_json::from_value(json!({
            "giver_name": "Ann",
            "receiver_name": "Bob",
            "receiver_wishlist": "socks",
            "event": {"name": "Office", "date": null, "max_amount": 50, "currency": "EUR"}
        }))
        .unwrap();

        let front = serde_json::to_value(transform_assignment(&backend)).unwrap();
        assert_eq!(
            front,
            json!({
                "giverName": "Ann",
                "receiverName": "Bob",
                "receiverWishlist": "socks",
                "event": {"name": "Office", "date": null, "maxAmount": 50, "currency": "EUR"}
            })
        );
    }

    #[test]
    fn test_transform_my_status_before_draw() {
        let backend: BackendMyStatus = serde_json::from_value(json!({
            "participant_name": "Ann",
            "event": {
                "id": 3,
                "name": "Family",
                "date": "2025-12-24",
                "max_amount": null,
                "currency": null,
                "registration_deadline": "2025-12-10T12:00:00+00:00",
                "is_draw_complete": false
            },
            "assignment": null
        }))
        .unwrap();

        let status = transform_my_status(&backend);
        assert_eq!(status.participant_name, "Ann");
        assert_eq!(status.event.id, 3);
        assert!(!status.event.is_draw_complete);
        assert!(status.assignment.is_none());

        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["event"]["registrationDeadline"], "2025-12-10T12:00:00+00:00");
        assert_eq!(value["assignment"], serde_json::Value::Null);
    }

    #[test]
    fn test_transform_my_status_after_draw() {
        let backend = BackendMyStatus {
            participant_name: "Ann".to_string(),
            event: BackendEventSnapshot {
                id: 3,
                name: "Family".to_string(),
                date: None,
                max_amount: Some(200),
                currency: Some("PLN".to_string()),
                registration_deadline: "2025-12-10T12:00:00Z".to_string(),
                is_draw_complete: true,
            },
            assignment: Some(BackendAssignmentInfo {
                receiver_name: "Cid".to_string(),
                receiver_wishlist: None,
            }),
        };

        let status = transform_my_status(&backend);
        let assignment = status.assignment.unwrap();
        assert_eq!(assignment.receiver_name, "Cid");
        assert_eq!(assignment.receiver_wishlist, None);
        assert_eq!(status.event.max_amount, Some(200));
    }
}
