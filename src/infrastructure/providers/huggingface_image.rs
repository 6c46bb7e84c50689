//! Client for Hugging Face image inference
//!
//! Success is raw image bytes; errors (including "model is loading") arrive
//! as a JSON body under a 2xx-or-5xx status. Anything without an `image/*`
//! content type is therefore treated as an API error, not a payload.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::application::ports::outbound::{ImageGenerationPort, ImagePayload, ProviderError};
use crate::domain::value_objects::ProviderId;
use crate::infrastructure::providers::REQUEST_TIMEOUT;

const HUGGINGFACE_IMAGE_API_URL: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0";

pub struct HuggingFaceImageClient {
    client: Client,
    api_key: String,
}

impl HuggingFaceImageClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ImageGenerationPort for HuggingFaceImageClient {
    fn id(&self) -> ProviderId {
        ProviderId::HuggingFaceImage
    }

    async fn generate(&self, prompt: &str) -> Result<ImagePayload, ProviderError> {
        let body = json!({
            "inputs": prompt,
            "parameters": {
                "num_inference_steps": 20,
                "guidance_scale": 7.5,
            }
        });

        let response = self
            .client
            .post(HUGGINGFACE_IMAGE_API_URL)
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

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.starts_with("image/") {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: format!("expected image payload, got: {message}"),
            });
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        Ok(ImagePayload::Bytes {
            data: data.to_vec(),
            content_type,
        })
    }
}
