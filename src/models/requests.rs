//! Request/Response DTOs
//!
//! Payloads sent through the passthrough routes. The gateway itself never
//! inspects them; the CLI builds and validates them before sending.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CURRENCIES, LANGUAGES};

const MAX_NAME_LEN: usize = 255;
const MAX_WISHLIST_LEN: usize = 1000;

/// Client-side validation failure
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be between 1 and {max} characters")]
    Length { field: &'static str, max: usize },

    #[error("max_amount must be greater than 0")]
    NonPositiveAmount,

    #[error("Unsupported currency: {0}")]
    Currency(String),

    #[error("Unsupported language: {0}")]
    Language(String),
}

/// Body of `POST /event`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub currency: Option<String>,
    pub registration_deadline: String,
}

impl CreateEventRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_length("name", &self.name, 1, MAX_NAME_LEN)?;
        if matches!(self.max_amount, Some(amount) if amount <= 0) {
            return Err(ValidationError::NonPositiveAmount);
        }
        if let Some(currency) = &self.currency {
            if !CURRENCIES.contains(&currency.as_str()) {
                return Err(ValidationError::Currency(currency.clone()));
            }
        }
        Ok(())
    }
}

/// Body of `POST /event/register/{token}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterParticipantRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wishlist: Option<String>,
}

impl RegisterParticipantRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_length("name", self.name.trim(), 1, MAX_NAME_LEN)?;
        if !LANGUAGES.contains(&self.language.as_str()) {
            return Err(ValidationError::Language(self.language.clone()));
        }
        if let Some(wishlist) = &self.wishlist {
            check_length("wishlist", wishlist, 0, MAX_WISHLIST_LEN)?;
        }
        Ok(())
    }
}

/// Response of a successful registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantRegistered {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub language: String,
    pub wishlist: Option<String>,
    pub event_id: i64,
    /// Personal token for the `/my/{token}` page
    pub access_token: String,
}

/// Body of `PATCH /participant/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateParticipantRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantUpdated {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
}

/// Response of `POST /event/{id}/send-emails`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailsResponse {
    pub sent_count: usize,
    pub skipped_count: usize,
    pub sent_to: Vec<String>,
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::Length { field, max });
    }
    Ok(())
}
