//! Provider identities
//!
//! The set of external generation services is closed: adding a vendor means
//! adding a variant here plus a client for it, never runtime duck-typing on
//! response bodies.

use serde::{Deserialize, Serialize};

/// One external generation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderId {
    /// Groq chat completions (fast free-tier inference)
    Groq,
    /// Hugging Face inference router, chat completions (free tier)
    HuggingFaceText,
    /// Google Gemini generateContent
    Gemini,
    /// OpenAI chat completions
    OpenAi,
    /// Hugging Face Stable Diffusion XL (binary image payload)
    HuggingFaceImage,
    /// OpenAI DALL-E 3 (returns a hosted image URL)
    OpenAiImage,
}

/// Whether a provider produces text or images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Text,
    Image,
}

/// Pricing classification, used only for chain ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostTier {
    Free,
    Paid,
}

/// Wire shape of a provider's successful response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{choices: [{message: {content}, finish_reason}]}`
    ChatCompletion,
    /// `{candidates: [{content: {parts: [{text}]}, finishReason}]}`
    Candidate,
    /// Raw image bytes or a JSON error body
    Binary,
}

impl ProviderId {
    /// Text providers in fixed preference order: fast free-tier inference
    /// first, then the hosted LLM vendors (free before paid).
    pub const TEXT_PRIORITY: [ProviderId; 4] = [
        ProviderId::Groq,
        ProviderId::HuggingFaceText,
        ProviderId::Gemini,
        ProviderId::OpenAi,
    ];

    /// Image providers in fixed preference order (free before paid).
    pub const IMAGE_PRIORITY: [ProviderId; 2] =
        [ProviderId::HuggingFaceImage, ProviderId::OpenAiImage];

    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Groq | Self::HuggingFaceText | Self::Gemini | Self::OpenAi => ProviderKind::Text,
            Self::HuggingFaceImage | Self::OpenAiImage => ProviderKind::Image,
        }
    }

    pub fn tier(&self) -> CostTier {
        match self {
            Self::Groq | Self::HuggingFaceText | Self::Gemini | Self::HuggingFaceImage => {
                CostTier::Free
            }
            Self::OpenAi | Self::OpenAiImage => CostTier::Paid,
        }
    }

    pub fn shape(&self) -> ResponseShape {
        match self {
            Self::Groq | Self::HuggingFaceText | Self::OpenAi => ResponseShape::ChatCompletion,
            Self::Gemini => ResponseShape::Candidate,
            Self::HuggingFaceImage | Self::OpenAiImage => ResponseShape::Binary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::HuggingFaceText => "huggingface-text",
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::HuggingFaceImage => "huggingface-image",
            Self::OpenAiImage => "openai-image",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
