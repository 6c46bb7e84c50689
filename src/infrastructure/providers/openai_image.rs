//! Client for the OpenAI image generations API
//!
//! DALL-E 3 responds with a hosted URL rather than bytes, so the payload is
//! passed through untouched and never hits the local image store.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::application::ports::outbound::{ImageGenerationPort, ImagePayload, ProviderError};
use crate::domain::value_objects::ProviderId;
use crate::infrastructure::providers::REQUEST_TIMEOUT;

const OPENAI_IMAGE_API_URL: &str = "https://api.openai.com/v1/images/generations";
const OPENAI_IMAGE_MODEL: &str = "dall-e-3";

pub struct OpenAiImageClient {
    client: Client,
    api_key: String,
}

impl OpenAiImageClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ImageGenerationPort for OpenAiImageClient {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAiImage
    }

    async fn generate(&self, prompt: &str) -> Result<ImagePayload, ProviderError> {
        let body = json!({
            "model": OPENAI_IMAGE_MODEL,
            "prompt": prompt,
            "n": 1,
            "size": "1024x1024",
            "quality": "standard",
        });

        let response = self
            .client
            .post(OPENAI_IMAGE_API_URL)
            .bearer_auth(&self.api_key)
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

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let url = payload
            .pointer("/data/0/url")
            .and_then(|value| value.as_str())
            .ok_or_else(|| ProviderError::Api {
                status: status.as_u16(),
                message: "image response carried no url".to_string(),
            })?;

        Ok(ImagePayload::Url(url.to_string()))
    }
}
