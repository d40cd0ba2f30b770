//! Data models for the submission service
//!
//! This module defines the stored record, the request and response payloads
//! of both endpoints, and the normalization rules applied to incoming
//! submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Column width of `name` and `email`
pub const MAX_FIELD_CHARS: usize = 200;

/// A single stored form submission
///
/// Records are created once by the submit handler and never updated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Submission {
    /// Server-generated unique identifier
    pub id: Uuid,

    /// Submitter name, never empty
    pub name: String,

    /// Optional email address; `None` when the form field was left blank
    pub email: Option<String>,

    /// Optional free-form message; `None` when the form field was left blank
    pub message: Option<String>,

    /// Assigned by the store at insert time
    pub created_at: DateTime<Utc>,
}

/// Request payload for `POST /api/submit`
///
/// Every field is optional on the wire; a missing field is treated like an
/// empty one.
///
/// # Example
/// ```json
/// {
///   "name": "Ada Lovelace",
///   "email": "ada@example.com",
///   "message": "Hello"
/// }
/// ```
#[derive(Deserialize, Debug, Default, Clone)]
pub struct SubmitRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A submission that passed validation and is ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub name: String,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl SubmitRequest {
    /// Trims every field, turns blank optional fields into `None` and checks
    /// the required name
    pub fn validate(self) -> Result<NewSubmission, AppError> {
        let name = trimmed(self.name).unwrap_or_default();
        let email = trimmed(self.email);
        let message = trimmed(self.message);

        if name.is_empty() {
            return Err(AppError::Validation("Name is required.".into()));
        }
        if name.chars().count() > MAX_FIELD_CHARS {
            return Err(AppError::Validation(format!(
                "Name must be at most {MAX_FIELD_CHARS} characters."
            )));
        }
        if email
            .as_ref()
            .is_some_and(|e| e.chars().count() > MAX_FIELD_CHARS)
        {
            return Err(AppError::Validation(format!(
                "Email must be at most {MAX_FIELD_CHARS} characters."
            )));
        }

        Ok(NewSubmission {
            name,
            email,
            message,
        })
    }
}

fn trimmed(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Response returned after a submission is stored
///
/// # Example
/// ```json
/// {
///   "id": "3f2c0a9e-7a51-4c1b-9a0e-2d8f4f7c9b10",
///   "created_at": "2026-10-16T13:40:00Z"
/// }
/// ```
#[derive(Serialize, Debug)]
pub struct SubmitResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Raw query parameters for `GET /api/submissions`
///
/// Kept as strings so that malformed values can be clamped instead of
/// rejected by the extractor.
///
/// # Example
/// Query string: `?top=20&skip=40`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub top: Option<String>,
    pub skip: Option<String>,
}

impl ListParams {
    /// Collects `top` and `skip` from decoded query pairs
    ///
    /// The first occurrence of a key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "top" => &mut params.top,
                "skip" => &mut params.skip,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// One page of submissions, newest first
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubmissionPage {
    pub items: Vec<Submission>,

    /// Total number of stored submissions at query time
    pub count: u64,

    /// Effective page size after clamping
    pub top: usize,

    /// Effective offset after clamping
    pub skip: usize,
}
