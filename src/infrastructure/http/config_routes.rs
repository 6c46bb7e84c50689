//! Configuration API routes
//!
//! Reports which providers have usable credentials. Only booleans leave the
//! process; key material never does.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::value_objects::ProviderId;
use crate::infrastructure::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigCheckDto {
    pub groq: bool,
    pub huggingface: bool,
    pub gemini: bool,
    pub openai: bool,
    /// True when at least one text provider can be called
    pub any_text_provider: bool,
}

/// Report credential presence per provider
pub async fn check_config(State(state): State<Arc<AppState>>) -> Json<ConfigCheckDto> {
    let credentials = state.narrative_service.credentials();

    let dto = ConfigCheckDto {
        groq: credentials.is_configured(ProviderId::Groq),
        huggingface: credentials.is_configured(ProviderId::HuggingFaceText),
        gemini: credentials.is_configured(ProviderId::Gemini),
        openai: credentials.is_configured(ProviderId::OpenAi),
        any_text_provider: ProviderId::TEXT_PRIORITY
            .iter()
            .any(|provider| credentials.is_configured(*provider)),
    };

    Json(dto)
}
