// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::fmt;

use crate::services::model::ModelError;
use crate::utils::extract::ExtractError;

/// Error type of the vocabulary generator service.
/// Every variant maps to a JSON body of the form `{ "error": ..., "details": ... }`.
#[derive(Debug)]
pub enum AppError {
    // 400 Bad Request
    BadRequest(String),

    // 500, with the failing step described in `details`
    Generation { message: String, details: Value },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            AppError::Generation { message, .. } => write!(f, "generation failed: {}", message),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, Value::Null),
            AppError::Generation { message, details } => {
                tracing::error!(details = %details, "Generation failed: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message, details)
            }
        };
        let body = Json(json!({
            "error": error,
            "details": details,
        }));

        (status, body).into_response()
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::Generation {
            message: err.to_string(),
            details: json!({ "stage": "model", "kind": err.kind() }),
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::Generation {
            message: err.to_string(),
            details: json!({ "stage": "extract", "kind": err.kind() }),
        }
    }
}
