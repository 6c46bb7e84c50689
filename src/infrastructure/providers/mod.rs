//! Provider clients - one reqwest wrapper per external generation service

mod chat_completions;
mod gemini;
mod huggingface_image;
mod openai_image;

pub use chat_completions::ChatCompletionsClient;
pub use gemini::GeminiClient;
pub use huggingface_image::HuggingFaceImageClient;
pub use openai_image::OpenAiImageClient;

use std::time::Duration;

/// Bound on every provider HTTP call so one unresponsive vendor cannot stall
/// the fallback chain.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
