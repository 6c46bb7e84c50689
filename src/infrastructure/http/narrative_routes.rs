//! Narrative API route - one player action in, one narrated turn out

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::services::NarrativeError;
use crate::domain::value_objects::{
    Character, GenerationRequest, GenerationSettings, NarrativeResult, RawGenerationSettings,
    SceneMood, TimeOfDay,
};
use crate::infrastructure::state::AppState;

/// Wire-side request; every field optional so validation can answer with a
/// 400 instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeRequestDto {
    pub action: Option<String>,
    pub character: Option<Character>,
    pub current_story: Option<String>,
    #[serde(default)]
    pub settings: RawGenerationSettings,
}

/// Error body with safe display defaults so the frontend can render it as an
/// inline turn instead of crashing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseDto {
    pub error: String,
    pub narrative: String,
    pub scene_mood: SceneMood,
    pub time_of_day: TimeOfDay,
}

impl ErrorResponseDto {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            narrative: String::new(),
            scene_mood: SceneMood::Calm,
            time_of_day: TimeOfDay::Day,
        }
    }
}

/// Generate one narrative turn for a player action
pub async fn generate_narrative(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NarrativeRequestDto>,
) -> Result<Json<NarrativeResult>, (StatusCode, Json<ErrorResponseDto>)> {
    let action = match req.action.as_deref().map(str::trim) {
        Some(action) if !action.is_empty() => action.to_string(),
        _ => {
            return Err(bad_request("Ação e personagem são obrigatórios"));
        }
    };
    let character = match req.character {
        Some(character) => character,
        None => {
            return Err(bad_request("Ação e personagem são obrigatórios"));
        }
    };

    let request = GenerationRequest {
        character,
        action,
        previous_context: req.current_story.filter(|story| !story.trim().is_empty()),
        settings: GenerationSettings::normalized(&req.settings),
    };

    let result = state
        .narrative_service
        .generate(request)
        .await
        .map_err(internal_error)?;

    Ok(Json(result))
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponseDto>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponseDto::new(message)),
    )
}

fn internal_error(err: NarrativeError) -> (StatusCode, Json<ErrorResponseDto>) {
    tracing::error!(error = %err, "narrative generation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponseDto::new(err.to_string())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{
        ProviderError, ProviderRegistry, TextGenerationPort,
    };
    use crate::application::services::{CredentialSnapshot, NarrativeService};
    use crate::infrastructure::config::AppConfig;
    use crate::infrastructure::http::create_routes;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::domain::value_objects::ProviderId;

    struct ChatProvider {
        id: ProviderId,
        content: &'static str,
    }

    #[async_trait]
    impl TextGenerationPort for ChatProvider {
        fn id(&self) -> ProviderId {
            self.id
        }

        async fn generate(
            &self,
            _system: &str,
            _prompt: &str,
            _settings: &GenerationSettings,
        ) -> Result<serde_json::Value, ProviderError> {
            Ok(json!({"choices": [{"message": {"content": self.content}}]}))
        }
    }

    fn test_config() -> AppConfig {
        AppConfig {
            groq_api_key: None,
            huggingface_api_token: None,
            gemini_api_key: None,
            openai_api_key: None,
            images_dir: "public/images/scenes".into(),
            images_public_prefix: "/images/scenes".to_string(),
            server_port: 0,
        }
    }

    fn app_with(credentials: CredentialSnapshot, registry: ProviderRegistry) -> Router {
        let state = Arc::new(AppState {
            config: test_config(),
            narrative_service: NarrativeService::new(credentials, registry, None),
        });
        create_routes().with_state(state)
    }

    fn narrative_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/narrative")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "action": "Investigar a taverna",
            "character": {
                "nome": "Aric",
                "classe": "guerreiro",
                "level": 2,
            }
        })
    }

    #[tokio::test]
    async fn test_single_provider_turn_round_trips() {
        let mut registry = ProviderRegistry::new();
        registry.register_text(Arc::new(ChatProvider {
            id: ProviderId::Groq,
            content: "Você investiga a taverna e ouve a conversa dos aldeões.",
        }));
        let credentials = CredentialSnapshot::new(Some("gk".to_string()), None, None, None);

        let response = app_with(credentials, registry)
            .oneshot(narrative_request(valid_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body["narrative"],
            "Você investiga a taverna e ouve a conversa dos aldeões."
        );
        assert_eq!(body["event"], "social");
        let xp = body["xp"].as_u64().unwrap();
        assert!((10..=50).contains(&xp));
        assert!(body["suggestions"].as_array().unwrap().len() <= 4);
    }

    #[tokio::test]
    async fn test_no_configured_provider_yields_safe_error_body() {
        let response = app_with(CredentialSnapshot::empty(), ProviderRegistry::new())
            .oneshot(narrative_request(valid_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert!(!body["error"].as_str().unwrap().is_empty());
        assert_eq!(body["narrative"], "");
        assert_eq!(body["sceneMood"], "calm");
        assert_eq!(body["timeOfDay"], "day");
    }

    #[tokio::test]
    async fn test_missing_action_is_a_bad_request() {
        let body = json!({
            "character": {"nome": "Aric", "classe": "guerreiro"}
        });

        let response = app_with(CredentialSnapshot::empty(), ProviderRegistry::new())
            .oneshot(narrative_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_action_is_a_bad_request() {
        let body = json!({
            "action": "   ",
            "character": {"nome": "Aric", "classe": "guerreiro"}
        });

        let response = app_with(CredentialSnapshot::empty(), ProviderRegistry::new())
            .oneshot(narrative_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_character_is_a_bad_request() {
        let body = json!({"action": "Explorar"});

        let response = app_with(CredentialSnapshot::empty(), ProviderRegistry::new())
            .oneshot(narrative_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
