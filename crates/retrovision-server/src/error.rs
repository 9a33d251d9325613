//! Error types for the session API.
//!
//! [`ApiError`] can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors returned by API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested era is not in the catalog.
    #[error("unknown era: {0}")]
    UnknownEra(String),

    /// The action is not available on the current screen.
    #[error("not allowed on the current screen: {0}")]
    WrongView(String),

    /// The page template failed to render.
    #[error("render error: {0}")]
    Render(#[from] minijinja::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UnknownEra(_) => StatusCode::BAD_REQUEST,
            Self::WrongView(_) => StatusCode::CONFLICT,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
