//! Generation ports
//!
//! Each provider client wraps exactly one vendor HTTP call: it builds the
//! vendor request, enforces the transport timeout, and hands back the raw
//! deserialized body. Interpreting the body (shape parsing, emptiness,
//! truncation signals) is the normalizer's job, so a 2xx with a nonsense
//! payload is still an `Ok` here.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::value_objects::{GenerationSettings, ProviderId};

/// Transport-level failure from a provider client
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Network failure, timeout, or a body that was not valid JSON
    #[error("HTTP request failed: {0}")]
    Http(String),
    /// Non-2xx status from the vendor
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// A text-generation vendor client
#[async_trait]
pub trait TextGenerationPort: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Issue one generation call and return the raw JSON body.
    async fn generate(
        &self,
        system_context: &str,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<serde_json::Value, ProviderError>;
}

/// What an image vendor hands back on success
#[derive(Debug, Clone)]
pub enum ImagePayload {
    /// Vendor hosts the image and returns a stable URL
    Url(String),
    /// Vendor returns raw bytes that we must persist ourselves
    Bytes {
        data: Vec<u8>,
        content_type: String,
    },
}

/// An image-generation vendor client
#[async_trait]
pub trait ImageGenerationPort: Send + Sync {
    fn id(&self) -> ProviderId;

    async fn generate(&self, prompt: &str) -> Result<ImagePayload, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("failed to persist image: {0}")]
    Io(String),
}

/// Content store for generated image bytes.
///
/// Contract: accepts raw bytes plus a name hint, returns a stable public
/// relative URL.
#[async_trait]
pub trait ImageStorePort: Send + Sync {
    async fn save(
        &self,
        data: &[u8],
        content_type: &str,
        name_hint: &str,
    ) -> Result<String, ImageStoreError>;
}

/// The set of constructed provider clients for one configuration snapshot.
///
/// The selector decides the order; this only answers "who implements that
/// identity". Unconfigured providers are simply absent.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    text: HashMap<ProviderId, Arc<dyn TextGenerationPort>>,
    image: HashMap<ProviderId, Arc<dyn ImageGenerationPort>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_text(&mut self, client: Arc<dyn TextGenerationPort>) {
        self.text.insert(client.id(), client);
    }

    pub fn register_image(&mut self, client: Arc<dyn ImageGenerationPort>) {
        self.image.insert(client.id(), client);
    }

    pub fn text(&self, id: ProviderId) -> Option<Arc<dyn TextGenerationPort>> {
        self.text.get(&id).cloned()
    }

    pub fn image(&self, id: ProviderId) -> Option<Arc<dyn ImageGenerationPort>> {
        self.image.get(&id).cloned()
    }

    /// Resolve an ordered identity chain into clients, skipping identities
    /// with no registered client.
    pub fn resolve_text(&self, chain: &[ProviderId]) -> Vec<Arc<dyn TextGenerationPort>> {
        chain.iter().filter_map(|id| self.text(*id)).collect()
    }

    pub fn resolve_image(&self, chain: &[ProviderId]) -> Vec<Arc<dyn ImageGenerationPort>> {
        chain.iter().filter_map(|id| self.image(*id)).collect()
    }
}
