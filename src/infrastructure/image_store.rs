//! Local filesystem store for generated scene images
//!
//! Bytes land under the configured images directory; the returned URL is the
//! public prefix plus the generated filename, which the frontend can use
//! directly.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::outbound::{ImageStoreError, ImageStorePort};

pub struct LocalImageStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

fn sanitize_hint(hint: &str) -> String {
    let cleaned: String = hint
        .chars()
        .take(32)
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    if cleaned.trim_matches('_').is_empty() {
        "scene".to_string()
    } else {
        cleaned
    }
}

#[async_trait]
impl ImageStorePort for LocalImageStore {
    async fn save(
        &self,
        data: &[u8],
        content_type: &str,
        name_hint: &str,
    ) -> Result<String, ImageStoreError> {
        let filename = format!(
            "{}_{}_{}.{}",
            sanitize_hint(name_hint),
            Utc::now().format("%Y%m%d%H%M%S"),
            Uuid::new_v4().simple(),
            extension_for(content_type),
        );

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| ImageStoreError::Io(e.to_string()))?;
        tokio::fs::write(self.root.join(&filename), data)
            .await
            .map_err(|e| ImageStoreError::Io(e.to_string()))?;

        Ok(format!(
            "{}/{}",
            self.public_prefix.trim_end_matches('/'),
            filename
        ))
    }
}
