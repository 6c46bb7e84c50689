//! Fallback-chain execution
//!
//! Providers are tried strictly in chain order, one attempt each, stopping at
//! the first success. The decision to try provider i+1 is failure-driven, so
//! attempts are never concurrent. Each attempt is bounded by a timeout so one
//! stalled vendor cannot freeze the chain; a timeout advances the chain like
//! any other transport failure. Caller cancellation drops the whole future
//! and therefore never advances the chain.

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::outbound::{
    ImageGenerationPort, ImagePayload, ProviderError, TextGenerationPort,
};
use crate::application::services::{normalize, NarrativePrompt, NormalizeError, NormalizedNarrative};
use crate::domain::services::XpPolicy;
use crate::domain::value_objects::{Character, GenerationSettings, ProviderId};

/// Why one provider in the chain was skipped over
#[derive(Debug, thiserror::Error)]
pub enum ProviderFailure {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    MalformedShape(String),
    #[error("empty content")]
    EmptyContent,
}

impl From<ProviderError> for ProviderFailure {
    fn from(err: ProviderError) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<NormalizeError> for ProviderFailure {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::MalformedShape { detail, .. } => Self::MalformedShape(detail),
            NormalizeError::EmptyContent { .. } => Self::EmptyContent,
        }
    }
}

/// One failed attempt, kept for diagnostics
#[derive(Debug)]
pub struct ProviderAttempt {
    pub provider: ProviderId,
    pub failure: ProviderFailure,
}

/// Terminal failure of a generation turn
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    /// The chain was empty before any attempt was made
    #[error("no AI provider is configured")]
    NoProviderConfigured,
    /// Every provider in the chain was tried and failed
    #[error("all {} providers failed", .0.len())]
    AllProvidersFailed(Vec<ProviderAttempt>),
}

pub struct FallbackOrchestrator {
    attempt_timeout: Duration,
}

impl FallbackOrchestrator {
    pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> Self {
        Self {
            attempt_timeout: Self::DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    pub fn with_attempt_timeout(attempt_timeout: Duration) -> Self {
        Self { attempt_timeout }
    }

    /// Run the text chain until one provider yields a normalized narrative.
    pub async fn execute(
        &self,
        providers: &[Arc<dyn TextGenerationPort>],
        prompt: &NarrativePrompt,
        settings: &GenerationSettings,
        character: &Character,
        action: &str,
        xp_policy: &XpPolicy,
    ) -> Result<NormalizedNarrative, NarrativeError> {
        if providers.is_empty() {
            return Err(NarrativeError::NoProviderConfigured);
        }

        let mut attempts = Vec::new();

        for provider in providers {
            let id = provider.id();
            tracing::debug!(provider = %id, "attempting narrative generation");

            let outcome = self
                .bounded(id, provider.generate(&prompt.system, &prompt.user, settings))
                .await
                .map_err(ProviderFailure::from)
                .and_then(|raw| {
                    normalize(id, &raw, &prompt.user, character, action, xp_policy)
                        .map_err(ProviderFailure::from)
                });

            match outcome {
                Ok(narrative) => {
                    tracing::info!(provider = %id, "narrative generated");
                    return Ok(narrative);
                }
                Err(failure) => {
                    tracing::warn!(provider = %id, %failure, "provider failed, advancing chain");
                    attempts.push(ProviderAttempt {
                        provider: id,
                        failure,
                    });
                }
            }
        }

        Err(NarrativeError::AllProvidersFailed(attempts))
    }

    /// Run the image chain until one provider yields a payload.
    pub async fn execute_image(
        &self,
        providers: &[Arc<dyn ImageGenerationPort>],
        prompt: &str,
    ) -> Result<ImagePayload, NarrativeError> {
        if providers.is_empty() {
            return Err(NarrativeError::NoProviderConfigured);
        }

        let mut attempts = Vec::new();

        for provider in providers {
            let id = provider.id();
            tracing::debug!(provider = %id, "attempting image generation");

            match self.bounded(id, provider.generate(prompt)).await {
                Ok(payload) => {
                    tracing::info!(provider = %id, "image generated");
                    return Ok(payload);
                }
                Err(err) => {
                    let failure = ProviderFailure::from(err);
                    tracing::warn!(provider = %id, %failure, "image provider failed, advancing chain");
                    attempts.push(ProviderAttempt {
                        provider: id,
                        failure,
                    });
                }
            }
        }

        Err(NarrativeError::AllProvidersFailed(attempts))
    }

    /// Apply the per-attempt timeout, folding expiry into a transport error.
    async fn bounded<T>(
        &self,
        id: ProviderId,
        call: impl std::future::Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, ProviderError> {
        match tokio::time::timeout(self.attempt_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Http(format!(
                "{} timed out after {:?}",
                id, self.attempt_timeout
            ))),
        }
    }
}

impl Default for FallbackOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::narrative_prompt;
    use crate::domain::value_objects::Attributes;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::Instant;

    enum Script {
        Succeed(&'static str),
        FailTransport,
        ReturnGarbage,
        Hang,
    }

    struct ScriptedProvider {
        id: ProviderId,
        script: Script,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(id: ProviderId, script: Script) -> Arc<Self> {
            Arc::new(Self {
                id,
                script,
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerationPort for ScriptedProvider {
        fn id(&self) -> ProviderId {
            self.id
        }

        async fn generate(
            &self,
            _system: &str,
            _prompt: &str,
            _settings: &GenerationSettings,
        ) -> Result<serde_json::Value, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.script {
                Script::Succeed(text) => Ok(match self.id.shape() {
                    crate::domain::value_objects::ResponseShape::Candidate => {
                        json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})
                    }
                    _ => json!({"choices": [{"message": {"content": text}}]}),
                }),
                Script::FailTransport => Err(ProviderError::Api {
                    status: 503,
                    message: "overloaded".to_string(),
                }),
                Script::ReturnGarbage => Ok(json!({"surprise": true})),
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(json!({}))
                }
            }
        }
    }

    fn hero() -> Character {
        Character {
            nome: "Aric".to_string(),
            classe: "guerreiro".to_string(),
            level: 1,
            atributos: Attributes::default(),
        }
    }

    fn fixtures() -> (NarrativePrompt, GenerationSettings, Character, XpPolicy) {
        let character = hero();
        let prompt = narrative_prompt(&character, "investigar", None);
        (prompt, GenerationSettings::default(), character, XpPolicy::seeded(3))
    }

    #[tokio::test]
    async fn test_short_circuits_after_first_success() {
        let first = ScriptedProvider::new(ProviderId::Groq, Script::FailTransport);
        let second = ScriptedProvider::new(ProviderId::Gemini, Script::Succeed("Você avança."));
        let third = ScriptedProvider::new(ProviderId::OpenAi, Script::Succeed("não usado"));
        let chain: Vec<Arc<dyn TextGenerationPort>> =
            vec![first.clone(), second.clone(), third.clone()];

        let (prompt, settings, character, xp) = fixtures();
        let result = FallbackOrchestrator::new()
            .execute(&chain, &prompt, &settings, &character, "investigar", &xp)
            .await
            .unwrap();

        assert_eq!(result.narrative, "Você avança.");
        assert_eq!(first.call_count(), 1);
        assert_eq!(second.call_count(), 1);
        assert_eq!(third.call_count(), 0);
    }

    #[tokio::test]
    async fn test_exhaustion_records_every_attempt_in_order() {
        let first = ScriptedProvider::new(ProviderId::Groq, Script::FailTransport);
        let second = ScriptedProvider::new(ProviderId::Gemini, Script::ReturnGarbage);
        let chain: Vec<Arc<dyn TextGenerationPort>> = vec![first, second];

        let (prompt, settings, character, xp) = fixtures();
        let err = FallbackOrchestrator::new()
            .execute(&chain, &prompt, &settings, &character, "investigar", &xp)
            .await
            .unwrap_err();

        match err {
            NarrativeError::AllProvidersFailed(attempts) => {
                assert_eq!(attempts.len(), 2);
                assert_eq!(attempts[0].provider, ProviderId::Groq);
                assert!(matches!(attempts[0].failure, ProviderFailure::Transport(_)));
                assert_eq!(attempts[1].provider, ProviderId::Gemini);
                assert!(matches!(
                    attempts[1].failure,
                    ProviderFailure::MalformedShape(_)
                ));
            }
            other => panic!("expected AllProvidersFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_chain_is_no_provider_configured() {
        let (prompt, settings, character, xp) = fixtures();
        let err = FallbackOrchestrator::new()
            .execute(&[], &prompt, &settings, &character, "investigar", &xp)
            .await
            .unwrap_err();

        assert!(matches!(err, NarrativeError::NoProviderConfigured));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_provider_times_out_and_chain_advances() {
        let stalled = ScriptedProvider::new(ProviderId::Groq, Script::Hang);
        let healthy = ScriptedProvider::new(ProviderId::Gemini, Script::Succeed("Salvo."));
        let chain: Vec<Arc<dyn TextGenerationPort>> = vec![stalled.clone(), healthy.clone()];

        let (prompt, settings, character, xp) = fixtures();
        let started = Instant::now();
        let result = FallbackOrchestrator::new()
            .execute(&chain, &prompt, &settings, &character, "investigar", &xp)
            .await
            .unwrap();
        let elapsed = started.elapsed();

        assert_eq!(result.narrative, "Salvo.");
        assert_eq!(stalled.call_count(), 1);
        assert_eq!(healthy.call_count(), 1);
        // Virtual clock: the stalled attempt costs exactly its timeout, not
        // the provider's full delay.
        assert!(elapsed >= FallbackOrchestrator::DEFAULT_ATTEMPT_TIMEOUT);
        assert!(elapsed < FallbackOrchestrator::DEFAULT_ATTEMPT_TIMEOUT + Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_empty_content_advances_chain() {
        struct EmptyProvider;

        #[async_trait]
        impl TextGenerationPort for EmptyProvider {
            fn id(&self) -> ProviderId {
                ProviderId::HuggingFaceText
            }
            async fn generate(
                &self,
                _system: &str,
                _prompt: &str,
                _settings: &GenerationSettings,
            ) -> Result<serde_json::Value, ProviderError> {
                Ok(json!({"choices": [{"message": {"content": "  "}, "finish_reason": "stop"}]}))
            }
        }

        let healthy = ScriptedProvider::new(ProviderId::Gemini, Script::Succeed("Conseguiu."));
        let chain: Vec<Arc<dyn TextGenerationPort>> =
            vec![Arc::new(EmptyProvider), healthy.clone()];

        let (prompt, settings, character, xp) = fixtures();
        let result = FallbackOrchestrator::new()
            .execute(&chain, &prompt, &settings, &character, "investigar", &xp)
            .await
            .unwrap();

        assert_eq!(result.narrative, "Conseguiu.");
        assert_eq!(healthy.call_count(), 1);
    }
}
