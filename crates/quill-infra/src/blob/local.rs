//! Local-directory blob storage. The directory is expected to be served by a
//! front proxy or CDN under `public_base_url`.

use std::path::PathBuf;

use async_trait::async_trait;

use quill_core::domain::ImageUpload;
use quill_core::ports::{BlobError, BlobStorage};

use super::object_name;

#[derive(Debug, Clone)]
pub struct LocalBlobConfig {
    pub dir: PathBuf,
    pub public_base_url: String,
    /// Largest accepted upload, enforced by the HTTP layer.
    pub max_bytes: usize,
}

impl Default for LocalBlobConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./uploads"),
            public_base_url: "/uploads".to_string(),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl LocalBlobConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.dir),
            public_base_url: std::env::var("UPLOAD_PUBLIC_URL")
                .unwrap_or(defaults.public_base_url),
            max_bytes: std::env::var("UPLOAD_MAX_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_bytes),
        }
    }
}

pub struct LocalBlobStorage {
    config: LocalBlobConfig,
}

impl LocalBlobStorage {
    pub fn new(config: LocalBlobConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn upload(&self, image: &ImageUpload) -> Result<String, BlobError> {
        tokio::fs::create_dir_all(&self.config.dir)
            .await
            .map_err(|e| BlobError::Unavailable(e.to_string()))?;

        let name = object_name(&image.bytes, &image.content_type);
        let path = self.config.dir.join(&name);

        // Identical content already stored under the same name.
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tokio::fs::write(&path, &image.bytes)
                .await
                .map_err(|e| BlobError::Write(e.to_string()))?;
        }

        tracing::debug!(object = %name, size = image.bytes.len(), "Image stored");
        Ok(format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            name
        ))
    }
}
