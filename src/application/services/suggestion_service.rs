//! Follow-up action suggestions
//!
//! A best-effort secondary call against the head of the text chain. Nothing
//! here may fail the parent request: any error, timeout, or unusable reply
//! collapses to an empty list and the UI shows no suggestion chips.

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::outbound::TextGenerationPort;
use crate::application::services::{extract_generated_text, suggestion_prompt};
use crate::domain::value_objects::{Character, GenerationSettings};

const MAX_SUGGESTIONS: usize = 4;
const MAX_SUGGESTION_CHARS: usize = 100;

pub struct SuggestionService {
    call_timeout: Duration,
}

impl SuggestionService {
    pub fn new() -> Self {
        Self {
            call_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_call_timeout(call_timeout: Duration) -> Self {
        Self { call_timeout }
    }

    /// Derive up to 4 short follow-up actions from the narrative.
    pub async fn suggest(
        &self,
        provider: &Arc<dyn TextGenerationPort>,
        narrative: &str,
        character: &Character,
    ) -> Vec<String> {
        let prompt = suggestion_prompt(narrative, character);
        let settings = GenerationSettings {
            max_tokens: 150,
            temperature: 0.7,
        };

        let raw = match tokio::time::timeout(
            self.call_timeout,
            provider.generate("", &prompt, &settings),
        )
        .await
        {
            Ok(Ok(raw)) => raw,
            Ok(Err(err)) => {
                tracing::warn!(provider = %provider.id(), error = %err, "suggestion call failed");
                return Vec::new();
            }
            Err(_) => {
                tracing::warn!(provider = %provider.id(), "suggestion call timed out");
                return Vec::new();
            }
        };

        let text = match extract_generated_text(provider.id(), &raw) {
            Ok((text, _)) => text,
            Err(err) => {
                tracing::warn!(provider = %provider.id(), error = %err, "unusable suggestion reply");
                return Vec::new();
            }
        };

        parse_suggestions(&text)
    }
}

impl Default for SuggestionService {
    fn default() -> Self {
        Self::new()
    }
}

/// One suggestion per line: trim, strip list markers, drop blank and
/// over-length lines, keep the first four.
fn parse_suggestions(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty() && line.chars().count() < MAX_SUGGESTION_CHARS)
        .map(String::from)
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Remove a numbering marker (`1.`, `2)`) or bullet (`-`) the model added
/// despite the prompt. A bare leading number is content, not a marker.
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix('-') {
        return rest.trim_start();
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = line[digits..]
            .strip_prefix('.')
            .or_else(|| line[digits..].strip_prefix(')'))
        {
            return rest.trim_start();
        }
    }
    line
}
