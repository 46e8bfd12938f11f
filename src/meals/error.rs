use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use super::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum MealError {
    /// Absent or owned by someone else; the two are not told apart.
    #[error("Not found entity with id={0}")]
    NotFound(i32),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("{0}")]
    IllegalRequest(String),
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub details: Vec<String>,
}

impl IntoResponse for MealError {
    fn into_response(self) -> Response {
        let (status, info) = match &self {
            MealError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                ErrorInfo {
                    kind: "DATA_NOT_FOUND",
                    details: vec![self.to_string()],
                },
            ),
            MealError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorInfo {
                    kind: "VALIDATION_ERROR",
                    details: errors.violations().iter().map(ToString::to_string).collect(),
                },
            ),
            MealError::IllegalRequest(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorInfo {
                    kind: "VALIDATION_ERROR",
                    details: vec![msg.clone()],
                },
            ),
            MealError::Repository(e) => {
                error!(error = ?e, "repository failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorInfo {
                        kind: "APP_ERROR",
                        details: vec!["internal error".into()],
                    },
                )
            }
        };
        (status, Json(info)).into_response()
    }
}
