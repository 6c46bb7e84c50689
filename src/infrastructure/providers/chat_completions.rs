//! Client for chat-completions style vendors
//!
//! Groq, the Hugging Face inference router and OpenAI all speak the same
//! `{messages, model, temperature, max_tokens}` dialect, so one client covers
//! the three; the provider identity decides endpoint, model and how the
//! normalizer later reads the body.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::outbound::{ProviderError, TextGenerationPort};
use crate::domain::value_objects::{GenerationSettings, ProviderId};
use crate::infrastructure::providers::REQUEST_TIMEOUT;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const GROQ_MODEL: &str = "llama-3.3-70b-versatile";

const HUGGINGFACE_API_URL: &str = "https://router.huggingface.co/v1/chat/completions";
const HUGGINGFACE_MODEL: &str = "openai/gpt-oss-20b:groq";

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODEL: &str = "gpt-4o-mini";

pub struct ChatCompletionsClient {
    client: Client,
    id: ProviderId,
    url: String,
    model: String,
    api_key: String,
}

impl ChatCompletionsClient {
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(ProviderId::Groq, GROQ_API_URL, GROQ_MODEL, api_key)
    }

    pub fn huggingface(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(
            ProviderId::HuggingFaceText,
            HUGGINGFACE_API_URL,
            HUGGINGFACE_MODEL,
            api_key,
        )
    }

    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(ProviderId::OpenAi, OPENAI_API_URL, OPENAI_MODEL, api_key)
    }

    fn with_endpoint(
        id: ProviderId,
        url: &str,
        model: &str,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            id,
            url: url.to_string(),
            model: model.to_string(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatRequestMessage<'a>>,
    model: &'a str,
    stream: bool,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[async_trait]
impl TextGenerationPort for ChatCompletionsClient {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn generate(
        &self,
        system_context: &str,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<serde_json::Value, ProviderError> {
        let mut messages = Vec::with_capacity(2);
        if !system_context.is_empty() {
            messages.push(ChatRequestMessage {
                role: "system",
                content: system_context,
            });
        }
        messages.push(ChatRequestMessage {
            role: "user",
            content: prompt,
        });

        let body = ChatRequest {
            messages,
            model: &self.model,
            stream: false,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        };

        let response = self
            .client
            .post(&self.url)
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

        response
            .json()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))
    }
}
