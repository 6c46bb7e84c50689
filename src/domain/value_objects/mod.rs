//! Value objects shared across the engine

mod character;
mod narrative;
mod provider;
mod settings;

pub use character::{Attributes, Character};
pub use narrative::{GenerationRequest, NarrativeEvent, NarrativeResult, SceneMood, TimeOfDay};
pub use provider::{CostTier, ProviderId, ProviderKind, ResponseShape};
pub use settings::{GenerationSettings, RawGenerationSettings};
