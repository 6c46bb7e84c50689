//! Response normalization
//!
//! Each vendor returns its own JSON shape; the parser is keyed by the
//! provider identity rather than sniffing fields at runtime. The normalizer
//! is where "2xx but useless" responses are sorted into their cases: a
//! missing payload path is a malformed shape, a well-formed empty text is
//! empty content, and an empty text the vendor attributes to truncation
//! degrades to a minimal synthesized narrative instead of failing the chain.

use serde_json::Value;

use crate::application::services::{degenerate_narrative, repair_mojibake};
use crate::domain::services::XpPolicy;
use crate::domain::value_objects::{
    Character, NarrativeEvent, ProviderId, ResponseShape, SceneMood, TimeOfDay,
};

/// Per-provider normalization failure; always recoverable by the orchestrator
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("unexpected response shape from {provider}: {detail}")]
    MalformedShape {
        provider: ProviderId,
        detail: String,
    },
    #[error("empty content from {provider}")]
    EmptyContent { provider: ProviderId },
}

/// A normalized narrative before suggestions and image are attached
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedNarrative {
    pub narrative: String,
    pub scene_mood: SceneMood,
    pub time_of_day: TimeOfDay,
    pub event: Option<NarrativeEvent>,
    pub xp: u32,
}

/// Locate the generated text and finish reason in a raw vendor body.
///
/// Also used by the suggestion generator, which shares the vendor shapes but
/// does its own line post-processing.
pub fn extract_generated_text(
    provider: ProviderId,
    raw: &Value,
) -> Result<(String, Option<String>), NormalizeError> {
    let malformed = |detail: &str| NormalizeError::MalformedShape {
        provider,
        detail: detail.to_string(),
    };

    match provider.shape() {
        ResponseShape::ChatCompletion => {
            let choice = raw
                .get("choices")
                .and_then(Value::as_array)
                .and_then(|choices| choices.first())
                .ok_or_else(|| malformed("missing choices[0]"))?;
            let content = choice
                .pointer("/message/content")
                .and_then(Value::as_str)
                .ok_or_else(|| malformed("missing choices[0].message.content"))?;
            let finish = choice
                .get("finish_reason")
                .and_then(Value::as_str)
                .map(String::from);
            Ok((content.to_string(), finish))
        }
        ResponseShape::Candidate => {
            let candidate = raw
                .get("candidates")
                .and_then(Value::as_array)
                .and_then(|candidates| candidates.first())
                .ok_or_else(|| malformed("missing candidates[0]"))?;
            let text = candidate
                .pointer("/content/parts/0/text")
                .and_then(Value::as_str)
                .ok_or_else(|| malformed("missing candidates[0].content.parts[0].text"))?;
            let finish = candidate
                .get("finishReason")
                .and_then(Value::as_str)
                .map(String::from);
            Ok((text.to_string(), finish))
        }
        ResponseShape::Binary => Err(malformed("binary provider has no text payload")),
    }
}

/// Normalize a raw text-vendor response into a narrative.
pub fn normalize(
    provider: ProviderId,
    raw: &Value,
    user_prompt: &str,
    character: &Character,
    action: &str,
    xp_policy: &XpPolicy,
) -> Result<NormalizedNarrative, NormalizeError> {
    let (text, finish_reason) = extract_generated_text(provider, raw)?;

    // Some models mirror the prompt back ahead of the continuation; strip
    // one leading echo only, interior occurrences belong to the narrative.
    let mut narrative = match text.trim_start().strip_prefix(user_prompt) {
        Some(rest) => rest.to_string(),
        None => text,
    };

    if let Some(repaired) = repair_mojibake(&narrative) {
        narrative = repaired;
    }

    let narrative = narrative.trim().to_string();

    if narrative.is_empty() {
        if is_truncation(finish_reason.as_deref()) {
            // The vendor ran out of tokens before emitting anything usable.
            // Degrade to a minimal narrative rather than burning the chain.
            tracing::warn!(
                provider = %provider,
                "truncated empty response, synthesizing minimal narrative"
            );
            return Ok(classify(degenerate_narrative(character, action), xp_policy));
        }
        return Err(NormalizeError::EmptyContent { provider });
    }

    // Vendors instructed to answer in JSON supply the scene fields
    // themselves; free-text vendors fall through to keyword derivation.
    if let Some(structured) = parse_structured(&narrative, xp_policy) {
        return Ok(structured);
    }

    Ok(classify(narrative, xp_policy))
}

fn is_truncation(finish_reason: Option<&str>) -> bool {
    matches!(
        finish_reason.map(str::to_ascii_lowercase).as_deref(),
        Some("length") | Some("max_tokens")
    )
}

/// Derive mood/time/event by keyword inspection and award XP.
fn classify(narrative: String, xp_policy: &XpPolicy) -> NormalizedNarrative {
    let scene_mood = SceneMood::detect(&narrative);
    let time_of_day = TimeOfDay::detect(&narrative);
    let event = NarrativeEvent::detect(&narrative);

    NormalizedNarrative {
        xp: xp_policy.award(Some(event)),
        narrative,
        scene_mood,
        time_of_day,
        event: Some(event),
    }
}

/// Accept a narrative the vendor already structured as JSON.
fn parse_structured(narrative: &str, xp_policy: &XpPolicy) -> Option<NormalizedNarrative> {
    if !narrative.starts_with('{') {
        return None;
    }
    let value: Value = serde_json::from_str(narrative).ok()?;
    let text = value.get("narrative")?.as_str()?.trim().to_string();
    if text.is_empty() {
        return None;
    }

    let scene_mood = field(&value, "sceneMood").unwrap_or_else(|| SceneMood::detect(&text));
    let time_of_day = field(&value, "timeOfDay").unwrap_or_else(|| TimeOfDay::detect(&text));
    let event: Option<NarrativeEvent> =
        field(&value, "event").or_else(|| Some(NarrativeEvent::detect(&text)));
    let xp = value
        .get("xp")
        .and_then(Value::as_u64)
        .map(|xp| xp as u32)
        .unwrap_or_else(|| xp_policy.award(event));

    Some(NormalizedNarrative {
        narrative: text,
        scene_mood,
        time_of_day,
        event,
        xp,
    })
}

fn field<T: serde::de::DeserializeOwned>(value: &Value, name: &str) -> Option<T> {
    value
        .get(name)
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
}
