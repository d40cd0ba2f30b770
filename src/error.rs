//! Error types for the store and the HTTP boundary
//!
//! Store failures carry full detail for server-side logs. At the HTTP
//! boundary they collapse into a generic `500` so nothing about the store
//! ever reaches the response body.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure inside the submission store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("failed to begin transaction: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("failed to open table: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage failure: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("failed to commit transaction: {0}")]
    Commit(#[from] redb::CommitError),

    /// A stored value could not be encoded or decoded
    #[error("corrupt submission record: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The blocking task running the store call panicked or was cancelled
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Error returned by the HTTP handlers
///
/// Each variant maps to a status code:
///
/// - `Validation` → **400**, the message is echoed to the caller
/// - `InvalidBody` → the extractor's 4xx (400, 415 or 422) with its message
/// - `Unauthorized` → **401**
/// - `Store` → **500**, logged server side, generic body only
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    /// The request body could not be read as a submission
    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    #[error("Invalid or missing link token")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::InvalidBody(_) => "invalid_body",
            AppError::Unauthorized => "unauthorized",
            AppError::Store(_) => "server_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(rejection) => rejection.status(),
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Store(err) => {
                tracing::error!(error = %err, "store failure");
                "Server error".to_string()
            }
            other => other.to_string(),
        };

        (
            self.status(),
            Json(json!({
                "error": message,
                "code": self.code(),
            })),
        )
            .into_response()
    }
}
