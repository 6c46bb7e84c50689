//! Application configuration
//!
//! All environment reads happen here, once, at startup. The rest of the
//! engine works from the resulting snapshot, which keeps provider selection
//! deterministic and testable without mutating the process environment.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::services::CredentialSnapshot;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Groq API key (fast free-tier text inference)
    pub groq_api_key: Option<String>,
    /// Hugging Face token (text router + Stable Diffusion images)
    pub huggingface_api_token: Option<String>,
    /// Google Gemini API key
    pub gemini_api_key: Option<String>,
    /// OpenAI API key (text + DALL-E images)
    pub openai_api_key: Option<String>,

    /// Directory where generated scene images are written
    pub images_dir: PathBuf,
    /// Public URL prefix the stored images are served under
    pub images_public_prefix: String,

    /// HTTP server port
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            groq_api_key: env::var("GROQ_API_KEY").ok(),
            huggingface_api_token: env::var("HUGGINGFACE_API_TOKEN").ok(),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),

            images_dir: env::var("IMAGES_DIR")
                .unwrap_or_else(|_| "public/images/scenes".to_string())
                .into(),
            images_public_prefix: env::var("IMAGES_PUBLIC_PREFIX")
                .unwrap_or_else(|_| "/images/scenes".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
        })
    }

    /// Credential snapshot for provider selection. Placeholder template keys
    /// are filtered out here.
    pub fn credentials(&self) -> CredentialSnapshot {
        CredentialSnapshot::new(
            self.groq_api_key.clone(),
            self.huggingface_api_token.clone(),
            self.gemini_api_key.clone(),
            self.openai_api_key.clone(),
        )
    }
}
