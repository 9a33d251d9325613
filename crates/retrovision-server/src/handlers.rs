//! HTTP endpoint handlers for the session API.
//!
//! Every mutating endpoint maps to exactly one session action (the form
//! endpoints map to a short sequence) and returns the resulting
//! [`SessionSnapshot`]. Generation runs in the background; clients poll
//! `GET /api/session` until `loading` is false.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Rendered page for the current view |
//! | `GET` | `/health` | Liveness probe |
//! | `GET` | `/api/eras` | Era catalog, default era, suggestions |
//! | `GET` | `/api/session` | Current session snapshot |
//! | `POST` | `/api/session/home` | Go to the landing view |
//! | `POST` | `/api/session/start` | Open a fresh input form |
//! | `POST` | `/api/session/example` | Show the canned example |
//! | `POST` | `/api/session/timeline` | Show the era timeline |
//! | `PUT` | `/api/session/form` | Edit invention and/or era |
//! | `POST` | `/api/session/submit` | Submit the form |
//! | `POST` | `/ui/*` | Browser form posts, redirect back to `/` |

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect};
use axum::{Form, Json};
use retrovision_core::catalog;
use retrovision_core::session::Action;
use retrovision_types::SessionSnapshot;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{AppState, FormUpdate};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// Serve the page for the current view.
///
/// # Errors
///
/// [`ApiError::Render`] if the page template fails.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let snapshot = state.snapshot().await;
    Ok(Html(state.pages.render(&snapshot)?))
}

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Era catalog with the default era and invention suggestions.
pub async fn get_eras() -> impl IntoResponse {
    Json(serde_json::json!({
        "eras": catalog::eras(),
        "defaultEra": catalog::DEFAULT_ERA,
        "popularInventions": catalog::POPULAR_INVENTIONS,
    }))
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Current session snapshot.
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.snapshot().await)
}

/// Navigate to the landing view.
pub async fn home(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.apply(Action::Home).await.snapshot)
}

/// Open a fresh input form.
pub async fn start(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.apply(Action::StartExploring).await.snapshot)
}

/// Show the canned example result.
pub async fn example(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.apply(Action::ViewExample).await.snapshot)
}

/// Show the era timeline.
pub async fn timeline(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.apply(Action::ViewTimeline).await.snapshot)
}

/// Edit the input form.
///
/// # Errors
///
/// - [`ApiError::WrongView`] when the session is not on the input form.
/// - [`ApiError::UnknownEra`] when `era` is not in the catalog. Nothing is
///   changed in that case.
pub async fn update_form(
    State(state): State<Arc<AppState>>,
    Json(update): Json<FormUpdate>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    state.edit_form(update).await.map(Json)
}

/// Submit the input form.
///
/// With a non-empty invention the session moves to the loading results
/// view and generation starts in the background. With an empty one the
/// session stays on the form with a validation message.
pub async fn submit(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    let applied = state.apply(Action::Submit).await;
    if applied.generation.is_some() {
        debug!("generation task started");
    }
    Json(applied.snapshot)
}

// ---------------------------------------------------------------------------
// Browser form posts
// ---------------------------------------------------------------------------

/// `POST /ui/home`
pub async fn ui_home(State(state): State<Arc<AppState>>) -> Redirect {
    state.apply(Action::Home).await;
    Redirect::to("/")
}

/// `POST /ui/start`
pub async fn ui_start(State(state): State<Arc<AppState>>) -> Redirect {
    state.apply(Action::StartExploring).await;
    Redirect::to("/")
}

/// `POST /ui/example`
pub async fn ui_example(State(state): State<Arc<AppState>>) -> Redirect {
    state.apply(Action::ViewExample).await;
    Redirect::to("/")
}

/// `POST /ui/timeline`
pub async fn ui_timeline(State(state): State<Arc<AppState>>) -> Redirect {
    state.apply(Action::ViewTimeline).await;
    Redirect::to("/")
}

/// `POST /ui/submit`: apply the posted form fields, then submit.
///
/// An unknown era is reported on the form by the session itself and the
/// submit is skipped.
pub async fn ui_submit(
    State(state): State<Arc<AppState>>,
    Form(update): Form<FormUpdate>,
) -> Redirect {
    state.submit_form(update).await;
    Redirect::to("/")
}
