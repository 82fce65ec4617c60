// src/handlers/generate.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError, models::vocabulary::GenerateRequest, services::generator::generate_vocabulary,
    state::AppState,
};

/// Generates a vocabulary list for a category.
///
/// * Validates the category (non-blank, at most 100 characters).
/// * Sends the fixed prompt to the configured text model.
/// * Returns the first JSON object found in the model's reply, byte for byte.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let category = req.category.trim();
    tracing::info!(category, "Generating vocabulary");

    let vocabulary = generate_vocabulary(state.model.as_ref(), category).await?;

    Ok(Json(vocabulary))
}
