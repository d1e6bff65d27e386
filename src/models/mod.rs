//! Domain Models
//!
//! Backend wire types, front-end view models and the pure transformers
//! between them.
//!
//! ## Field renaming
//!
//! Every backend field maps to exactly one view-model field; snake_case
//! names become camelCase and `reveal_token` becomes `shareToken`. Nullable
//! fields stay nullable and nothing is defaulted. The registration
//! projection is the only one that narrows: its participants carry just
//! `id`, `name` and `wishlist`.

mod assignment;
mod event;
mod requests;

pub use assignment::{
    transform_assignment, transform_my_status, AssignmentData, AssignmentEvent, AssignmentInfo,
    BackendAssignment, BackendAssignmentEvent, BackendAssignmentInfo, BackendEventSnapshot,
    BackendMyStatus, MyStatusData,
};
pub use event::{
    transform_event, transform_event_info, transform_participant, transform_participant_summary,
    transform_registration_event, BackendEvent, BackendParticipant, EventData, EventInfo,
    ParticipantData, ParticipantSummary, RegistrationEventData,
};
pub use requests::{
    CreateEventRequest, ParticipantRegistered, ParticipantUpdated, RegisterParticipantRequest,
    SendEmailsResponse, UpdateParticipantRequest, ValidationError,
};

/// Currency used when an event does not specify one
pub const DEFAULT_CURRENCY: &str = "PLN";

/// Currencies the backend accepts
pub const CURRENCIES: [&str; 3] = ["PLN", "USD", "EUR"];

/// Participant languages the backend accepts
pub const LANGUAGES: [&str; 2] = ["en", "pl"];
