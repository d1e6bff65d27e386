//! Event and Participant Models
//!
//! Backend wire shapes (snake_case) and the camelCase view models built
//! from them. Used by the event dashboard, registration and status pages.

use serde::{Deserialize, Serialize};

// ============================================
// BACKEND TYPES (snake_case)
// ============================================

/// Participant as returned by `GET /event/{id}` and `GET /event/register/{token}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendParticipant {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub language: String,
    pub wishlist: Option<String>,
    /// Present only once the draw for the event is complete
    #[serde(default)]
    pub reveal_token: Option<String>,
}

/// Event as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendEvent {
    pub id: i64,
    pub name: String,
    pub max_amount: Option<i64>,
    pub date: Option<String>,
    pub currency: Option<String>,
    pub registration_deadline: String,
    pub registration_token: String,
    pub is_draw_complete: bool,
    #[serde(default)]
    pub participants: Vec<BackendParticipant>,
}

// ============================================
// VIEW MODELS (camelCase)
// ============================================

/// Minimal participant info for public views like registration.
/// Never carries contact details or draw secrets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSummary {
    pub id: i64,
    pub name: String,
    pub wishlist: Option<String>,
}

/// Full participant data for the event dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantData {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub language: String,
    pub wishlist: Option<String>,
    pub share_token: Option<String>,
}

/// Full event with participant detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    pub id: i64,
    pub name: String,
    pub max_amount: Option<i64>,
    pub date: Option<String>,
    pub currency: Option<String>,
    pub registration_deadline: String,
    pub registration_token: String,
    pub is_draw_complete: bool,
    pub participants: Vec<ParticipantData>,
}

impl EventData {
    /// Token used when building share links.
    ///
    /// Falls back to the participant id for participants without a
    /// reveal token yet.
    pub fn share_token_for(participant: &ParticipantData) -> String {
        participant
            .share_token
            .clone()
            .unwrap_or_else(|| participant.id.to_string())
    }
}

/// Event with summary participants, for the public registration page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationEventData {
    pub id: i64,
    pub name: String,
    pub max_amount: Option<i64>,
    pub date: Option<String>,
    pub currency: Option<String>,
    pub registration_deadline: String,
    pub registration_token: String,
    pub is_draw_complete: bool,
    pub participants: Vec<ParticipantSummary>,
}

/// Minimal event info used in status pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInfo {
    pub id: i64,
    pub name: String,
    pub date: Option<String>,
    pub max_amount: Option<i64>,
    pub currency: Option<String>,
    pub registration_deadline: String,
    pub is_draw_complete: bool,
}

// ============================================
// TRANSFORMERS
// ============================================

/// Backend event to the full front-end event
pub fn transform_event(backend: &BackendEvent) -> EventData {
    EventData {
        id: backend.id,
        name: backend.name.clone(),
        max_amount: backend.max_amount,
        date: backend.date.clone(),
        currency: backend.currency.clone(),
        registration_deadline: backend.registration_deadline.clone(),
        registration_token: backend.registration_token.clone(),
        is_draw_complete: backend.is_draw_complete,
        participants: backend.participants.iter().map(transform_participant).collect(),
    }
}

/// Backend participant to the full front-end participant
pub fn transform_participant(backend: &BackendParticipant) -> ParticipantData {
    ParticipantData {
        id: backend.id,
        name: backend.name.clone(),
        email: backend.email.clone(),
        language: backend.language.clone(),
        wishlist: backend.wishlist.clone(),
        share_token: backend.reveal_token.clone(),
    }
}

/// Backend participant to the public summary (drops email, language and token)
pub fn transform_participant_summary(backend: &BackendParticipant) -> ParticipantSummary {
    ParticipantSummary {
        id: backend.id,
        name: backend.name.clone(),
        wishlist: backend.wishlist.clone(),
    }
}

/// Backend event to the registration-page projection
pub fn transform_registration_event(backend: &BackendEvent) -> RegistrationEventData {
    RegistrationEventData {
        id: backend.id,
        name: backend.name.clone(),
        max_amount: backend.max_amount,
        date: backend.date.clone(),
        currency: backend.currency.clone(),
        registration_deadline: backend.registration_deadline.clone(),
        registration_token: backend.registration_token.clone(),
        is_draw_complete: backend.is_draw_complete,
        participants: backend
            .participants
            .iter()
            .map(transform_participant_summary)
            .collect(),
    }
}

/// Backend event to the minimal [`EventInfo`]
pub fn transform_event_info(backend: &BackendEvent) -> EventInfo {
    EventInfo {
        id: backend.id,
        name: backend.name.clone(),
        date: backend.date.clone(),
        max_amount: backend.max_amount,
        currency: backend.currency.clone(),
        registration_deadline: backend.registration_deadline.clone(),
        is_draw_complete: backend.is_draw_complete,
    }
}

impl From<&BackendEvent> for EventData {
    fn from(backend: &BackendEvent) -> Self {
        transform_event(backend)
    }
}

impl From<&BackendParticipant> for ParticipantData {
    fn from(backend: &BackendParticipant) -> Self {
        transform_participant(backend)
    }
}
