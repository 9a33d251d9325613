//! Axum router construction for the session API.
//!
//! Assembles the page, JSON API and browser form routes into a single
//! [`Router`] with CORS and request tracing enabled.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- rendered page for the current view
/// - `GET /health` -- liveness probe
/// - `GET /api/eras` -- era catalog
/// - `GET /api/session` -- session snapshot
/// - `POST /api/session/{home,start,example,timeline,submit}` -- actions
/// - `PUT /api/session/form` -- form edits
/// - `POST /ui/{home,start,example,timeline,submit}` -- browser form posts
///
/// CORS allows any origin so a separately served front end can call the
/// API during development.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        // JSON API
        .route("/api/eras", get(handlers::get_eras))
        .route("/api/session", get(handlers::get_session))
        .route("/api/session/home", post(handlers::home))
        .route("/api/session/start", post(handlers::start))
        .route("/api/session/example", post(handlers::example))
        .route("/api/session/timeline", post(handlers::timeline))
        .route("/api/session/form", put(handlers::update_form))
        .route("/api/session/submit", post(handlers::submit))
        // Browser form posts
        .route("/ui/home", post(handlers::ui_home))
        .route("/ui/start", post(handlers::ui_start))
        .route("/ui/example", post(handlers::ui_example))
        .route("/ui/timeline", post(handlers::ui_timeline))
        .route("/ui/submit", post(handlers::ui_submit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
