//! Route definitions for the submission service

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::handler::{index, list_submissions, submit};
use crate::middleware::require_link_token;
use crate::state::AppState;

/// Creates the Axum application router with all routes
///
/// # Route Definitions
///
/// - `GET /` - Client page (public)
/// - `POST /api/submit` - Stores a submission (public form)
/// - `GET /api/submissions` - Lists submissions (requires `X-Link-Token`)
///
/// # Example Usage
///
/// ```no_run
/// # use formbox::database::Store;
/// # use formbox::route::create_app;
/// # use formbox::state::AppState;
/// let store = Store::open("submissions.db").unwrap();
/// let app = create_app(AppState::new(store, Some("secret")));
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    // Read path, gated by the shared link token
    let read_routes = Router::new()
        .route("/submissions", get(list_submissions))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_link_token,
        ));

    let api_routes = Router::new()
        .route("/submit", post(submit))
        .merge(read_routes);

    Router::new()
        .route("/", get(index))
        .nest("/api", api_routes)
        .with_state(state)
}
