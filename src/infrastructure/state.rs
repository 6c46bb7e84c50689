//! Shared application state

use std::sync::Arc;

use crate::application::ports::outbound::ProviderRegistry;
use crate::application::services::NarrativeService;
use crate::domain::value_objects::ProviderId;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::image_store::LocalImageStore;
use crate::infrastructure::providers::{
    ChatCompletionsClient, GeminiClient, HuggingFaceImageClient, OpenAiImageClient,
};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub narrative_service: NarrativeService,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let credentials = config.credentials();

        // One client per usable credential; the registry only ever holds
        // providers that can actually be called.
        let mut registry = ProviderRegistry::new();
        if let Some(key) = credentials.key_for(ProviderId::Groq) {
            registry.register_text(Arc::new(ChatCompletionsClient::groq(key)));
        }
        if let Some(token) = credentials.key_for(ProviderId::HuggingFaceText) {
            registry.register_text(Arc::new(ChatCompletionsClient::huggingface(token)));
            registry.register_image(Arc::new(HuggingFaceImageClient::new(token)));
        }
        if let Some(key) = credentials.key_for(ProviderId::Gemini) {
            registry.register_text(Arc::new(GeminiClient::new(key)));
        }
        if let Some(key) = credentials.key_for(ProviderId::OpenAi) {
            registry.register_text(Arc::new(ChatCompletionsClient::openai(key)));
            registry.register_image(Arc::new(OpenAiImageClient::new(key)));
        }

        let image_store = Arc::new(LocalImageStore::new(
            config.images_dir.clone(),
            config.images_public_prefix.clone(),
        ));

        let narrative_service =
            NarrativeService::new(credentials, registry, Some(image_store));

        Self {
            config,
            narrative_service,
        }
    }
}
