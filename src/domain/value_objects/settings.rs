//! Generation settings value object
//!
//! User-supplied creativity/length knobs are clamped into safe ranges before
//! they reach any provider. Out-of-range values are never rejected: a request
//! with `maxTokens: 99999` gets 1000, not a 400.

use serde::{Deserialize, Serialize};

/// Raw settings as they arrive on the wire; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGenerationSettings {
    pub max_tokens: Option<i64>,
    pub temperature: Option<f32>,
}

/// Validated generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationSettings {
    pub const MIN_TOKENS: u32 = 50;
    pub const MAX_TOKENS: u32 = 1000;
    pub const DEFAULT_TOKENS: u32 = 200;

    pub const MIN_TEMPERATURE: f32 = 0.1;
    pub const MAX_TEMPERATURE: f32 = 2.0;
    pub const DEFAULT_TEMPERATURE: f32 = 0.8;

    /// Clamp raw settings into valid ranges. Never fails.
    pub fn normalized(raw: &RawGenerationSettings) -> Self {
        let max_tokens = raw
            .max_tokens
            .map(|tokens| tokens.clamp(i64::from(Self::MIN_TOKENS), i64::from(Self::MAX_TOKENS)) as u32)
            .unwrap_or(Self::DEFAULT_TOKENS);

        let temperature = raw
            .temperature
            .filter(|t| t.is_finite())
            .map(|t| t.clamp(Self::MIN_TEMPERATURE, Self::MAX_TEMPERATURE))
            .unwrap_or(Self::DEFAULT_TEMPERATURE);

        Self {
            max_tokens,
            temperature,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: Self::DEFAULT_TOKENS,
            temperature: Self::DEFAULT_TEMPERATURE,
        }
    }
}
