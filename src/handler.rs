//! HTTP request handlers for the submission service
//!
//! - Serving the client page
//! - Storing a new form submission
//! - Listing stored submissions with pagination
//!
//! Store calls are synchronous redb transactions and run on the blocking
//! thread pool.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use tokio::task::spawn_blocking;

use crate::error::{AppError, StoreError};
use crate::model::{ListParams, SubmissionPage, SubmitRequest, SubmitResponse};
use crate::pagination::PageRequest;
use crate::state::AppState;

/// Client page with the submission form and the submissions table
const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Serves the client page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Stores a new form submission
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Ada Lovelace",
///   "email": "ada@example.com",   // Optional
///   "message": "Hello"            // Optional
/// }
/// ```
///
/// # Response
///
/// - **201 Created** - `{ "id": "...", "created_at": "..." }`
/// - **400 Bad Request** - name missing, a field too long, or a body that is
///   not JSON
/// - **415 / 422** - wrong content type or wrong field types
/// - **500 Internal Server Error** - store failure (details only in the logs)
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let new = payload.validate()?;

    let store = state.store.clone();
    let record = spawn_blocking(move || store.insert(new))
        .await
        .map_err(StoreError::from)??;

    tracing::info!(id = %record.id, "stored submission");

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            id: record.id,
            created_at: record.created_at,
        }),
    ))
}

/// Lists stored submissions, newest first
///
/// # Query Parameters
///
/// - `top` (optional) - Page size, clamped to 1..=200 (default: 50)
/// - `skip` (optional) - Offset, clamped to 0..=1000000 (default: 0)
///
/// Malformed values never fail the request; they are clamped or replaced by
/// the default. A repeated key uses its first value.
///
/// # Example Request
///
/// `GET /api/submissions?top=20&skip=40`
///
/// # Response
///
/// ```json
/// {
///   "items": [...],
///   "count": 123,
///   "top": 20,
///   "skip": 40
/// }
/// ```
pub async fn list_submissions(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<SubmissionPage>, AppError> {
    let params = match query {
        Ok(Query(pairs)) => ListParams::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable query string, using default page");
            ListParams::default()
        }
    };
    let page = PageRequest::from_params(&params);

    let store = state.store.clone();
    let result = spawn_blocking(move || store.page(page))
        .await
        .map_err(StoreError::from)??;

    tracing::debug!(
        top = result.top,
        skip = result.skip,
        returned = result.items.len(),
        count = result.count,
        "listed submissions"
    );

    Ok(Json(result))
}
