//! Application services - the generation pipeline

mod encoding;
mod narrative_service;
mod normalizer;
mod orchestrator;
mod prompt_builder;
mod selection;
mod suggestion_service;

pub use encoding::repair_mojibake;
pub use narrative_service::{ImageError, NarrativeService};
pub use normalizer::{extract_generated_text, normalize, NormalizeError, NormalizedNarrative};
pub use orchestrator::{
    FallbackOrchestrator, NarrativeError, ProviderAttempt, ProviderFailure,
};
pub use prompt_builder::{
    degenerate_narrative, image_prompt, narrative_prompt, suggestion_prompt, world_context,
    NarrativePrompt,
};
pub use selection::{select_image_chain, select_text_chain, CredentialSnapshot};
pub use suggestion_service::SuggestionService;
