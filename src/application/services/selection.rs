//! Provider selection
//!
//! All credential knowledge lives here, behind a snapshot taken once per
//! process start. The chains are a pure function of that snapshot: same
//! configuration, same chain, always. Template keys that setup scripts leave
//! behind (`your_..._here`) count as not configured.

use crate::domain::value_objects::ProviderId;

/// Credential values as read from the environment, one slot per vendor key.
///
/// Construction filters out empty and placeholder values, so `Some` always
/// means a usable credential.
#[derive(Debug, Clone, Default)]
pub struct CredentialSnapshot {
    groq: Option<String>,
    huggingface: Option<String>,
    gemini: Option<String>,
    openai: Option<String>,
}

impl CredentialSnapshot {
    pub fn new(
        groq: Option<String>,
        huggingface: Option<String>,
        gemini: Option<String>,
        openai: Option<String>,
    ) -> Self {
        Self {
            groq: usable(groq),
            huggingface: usable(huggingface),
            gemini: usable(gemini),
            openai: usable(openai),
        }
    }

    /// Snapshot with nothing configured; mostly for tests.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_configured(&self, provider: ProviderId) -> bool {
        self.key_for(provider).is_some()
    }

    /// The credential backing a provider, if configured.
    pub fn key_for(&self, provider: ProviderId) -> Option<&str> {
        let slot = match provider {
            ProviderId::Groq => &self.groq,
            ProviderId::HuggingFaceText | ProviderId::HuggingFaceImage => &self.huggingface,
            ProviderId::Gemini => &self.gemini,
            ProviderId::OpenAi | ProviderId::OpenAiImage => &self.openai,
        };
        slot.as_deref()
    }
}

fn usable(value: Option<String>) -> Option<String> {
    value.filter(|key| {
        let key = key.trim();
        !key.is_empty() && !is_placeholder(key)
    })
}

fn is_placeholder(key: &str) -> bool {
    // Matches the template values shipped in .env.example, e.g.
    // "your_gemini_api_key_here".
    key.starts_with("your_") && key.ends_with("_here")
}

/// Ordered text-provider preference chain for this configuration.
///
/// May be empty; the orchestrator turns that into a well-defined
/// "no provider configured" failure.
pub fn select_text_chain(credentials: &CredentialSnapshot) -> Vec<ProviderId> {
    ProviderId::TEXT_PRIORITY
        .iter()
        .copied()
        .filter(|provider| credentials.is_configured(*provider))
        .collect()
}

/// Ordered image-provider preference chain for this configuration.
pub fn select_image_chain(credentials: &CredentialSnapshot) -> Vec<ProviderId> {
    ProviderId::IMAGE_PRIORITY
        .iter()
        .copied()
        .filter(|provider| credentials.is_configured(*provider))
        .collect()
}
