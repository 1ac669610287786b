//! Blob storage port - where uploaded images end up.

use async_trait::async_trait;

use crate::domain::ImageUpload;

#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store the image and return a URL it can be fetched from.
    async fn upload(&self, image: &ImageUpload) -> Result<String, BlobError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("Blob write failed: {0}")]
    Write(String),

    #[error("Blob storage unavailable: {0}")]
    Unavailable(String),
}
