use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::services::session::SessionError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Session(SessionError::Validation { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Session(_) => StatusCode::CONFLICT,
        };

        let body = match &self {
            AppError::Session(SessionError::Validation { missing }) => {
                serde_json::json!({ "error": self.to_string(), "missing_fields": missing })
            }
            _ => serde_json::json!({ "error": self.to_string() }),
        };

        (status, axum::Json(body)).into_response()
    }
}
