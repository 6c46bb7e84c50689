//! Narrative generation use case
//!
//! Composes one request/response cycle: settings are already normalized by
//! the facade, then chain selection, fallback orchestration, best-effort
//! suggestions and a best-effort scene image. Only the orchestration step can
//! fail the request; suggestions and image degrade silently.

use std::sync::Arc;

use crate::application::ports::outbound::{ImagePayload, ImageStoreError, ImageStorePort, ProviderRegistry};
use crate::application::services::{
    image_prompt, narrative_prompt, select_image_chain, select_text_chain, FallbackOrchestrator,
    NarrativeError, SuggestionService,
};
use crate::domain::services::XpPolicy;
use crate::domain::value_objects::{
    GenerationRequest, NarrativeResult, SceneMood, TimeOfDay,
};

/// Failure of a standalone image generation request
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error(transparent)]
    Generation(#[from] NarrativeError),
    #[error(transparent)]
    Store(#[from] ImageStoreError),
    #[error("no image store configured for binary payloads")]
    NoStore,
}

pub struct NarrativeService {
    credentials: crate::application::services::CredentialSnapshot,
    registry: ProviderRegistry,
    orchestrator: FallbackOrchestrator,
    suggestions: SuggestionService,
    xp_policy: XpPolicy,
    image_store: Option<Arc<dyn ImageStorePort>>,
}

impl NarrativeService {
    pub fn new(
        credentials: crate::application::services::CredentialSnapshot,
        registry: ProviderRegistry,
        image_store: Option<Arc<dyn ImageStorePort>>,
    ) -> Self {
        Self {
            credentials,
            registry,
            orchestrator: FallbackOrchestrator::new(),
            suggestions: SuggestionService::new(),
            xp_policy: XpPolicy::new(),
            image_store,
        }
    }

    /// Swap the XP policy, e.g. for a seeded one in tests.
    pub fn with_xp_policy(mut self, xp_policy: XpPolicy) -> Self {
        self.xp_policy = xp_policy;
        self
    }

    pub fn credentials(&self) -> &crate::application::services::CredentialSnapshot {
        &self.credentials
    }

    /// Produce one narrative turn for a player action.
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<NarrativeResult, NarrativeError> {
        let chain = select_text_chain(&self.credentials);
        tracing::debug!(?chain, "text provider chain selected");
        let providers = self.registry.resolve_text(&chain);

        let prompt = narrative_prompt(
            &request.character,
            &request.action,
            request.previous_context.as_deref(),
        );

        let normalized = self
            .orchestrator
            .execute(
                &providers,
                &prompt,
                &request.settings,
                &request.character,
                &request.action,
                &self.xp_policy,
            )
            .await?;

        // Suggestions come from the chain head; losing them never fails the
        // turn.
        let suggestions = match providers.first() {
            Some(head) => {
                self.suggestions
                    .suggest(head, &normalized.narrative, &request.character)
                    .await
            }
            None => Vec::new(),
        };

        let image_url = match self
            .scene_image(&normalized.narrative, normalized.scene_mood, normalized.time_of_day)
            .await
        {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::warn!(error = %err, "scene image unavailable, continuing without one");
                None
            }
        };

        Ok(NarrativeResult {
            narrative: normalized.narrative,
            scene_mood: normalized.scene_mood,
            time_of_day: normalized.time_of_day,
            event: normalized.event,
            xp: normalized.xp,
            image_url,
            suggestions,
        })
    }

    /// Generate and publish a scene image for an existing narrative.
    pub async fn scene_image(
        &self,
        narrative: &str,
        mood: SceneMood,
        time_of_day: TimeOfDay,
    ) -> Result<String, ImageError> {
        let chain = select_image_chain(&self.credentials);
        let providers = self.registry.resolve_image(&chain);

        let prompt = image_prompt(narrative, mood, time_of_day);
        let payload = self.orchestrator.execute_image(&providers, &prompt).await?;

        match payload {
            ImagePayload::Url(url) => Ok(url),
            ImagePayload::Bytes { data, content_type } => {
                let store = self.image_store.as_ref().ok_or(ImageError::NoStore)?;
                let url = store.save(&data, &content_type, "scene").await?;
                Ok(url)
            }
        }
    }
}
