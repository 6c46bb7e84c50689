//! Client for the Gemini generateContent API
//!
//! Gemini has no separate system role on this endpoint; the world context is
//! prepended to the single text part. The key travels as a query parameter,
//! not a bearer header.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::application::ports::outbound::{ProviderError, TextGenerationPort};
use crate::domain::value_objects::{GenerationSettings, ProviderId};
use crate::infrastructure::providers::REQUEST_TIMEOUT;

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl TextGenerationPort for GeminiClient {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    async fn generate(
        &self,
        system_context: &str,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<serde_json::Value, ProviderError> {
        let text = if system_context.is_empty() {
            prompt.to_string()
        } else {
            format!("{system_context}\n\n{prompt}")
        };

        let body = json!({
            "contents": [{"parts": [{"text": text}]}],
            "generationConfig": {
                "temperature": settings.temperature,
                "topK": 40,
                "topP": 0.95,
                "maxOutputTokens": settings.max_tokens,
            }
        });

        let response = self
            .client
            .post(GEMINI_API_URL)
            .query(&[("key", self.api_key.as_str())])
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))
    }
}
