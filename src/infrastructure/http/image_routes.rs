//! Scene image API route

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::value_objects::{SceneMood, TimeOfDay};
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequestDto {
    pub prompt: Option<String>,
    pub scene_mood: Option<SceneMood>,
    pub time_of_day: Option<TimeOfDay>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponseDto {
    pub image_url: String,
}

/// Generate a scene image for an arbitrary prompt
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImageRequestDto>,
) -> Result<Json<ImageResponseDto>, (StatusCode, String)> {
    let prompt = match req.prompt.as_deref().map(str::trim) {
        Some(prompt) if !prompt.is_empty() => prompt.to_string(),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                "Prompt é obrigatório".to_string(),
            ));
        }
    };

    let image_url = state
        .narrative_service
        .scene_image(
            &prompt,
            req.scene_mood.unwrap_or(SceneMood::Calm),
            req.time_of_day.unwrap_or(TimeOfDay::Day),
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "image generation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    Ok(Json(ImageResponseDto { image_url }))
}
