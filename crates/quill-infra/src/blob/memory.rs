//! In-memory blob storage - used in tests and when no upload directory is wanted.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::ImageUpload;
use quill_core::ports::{BlobError, BlobStorage};

use super::object_name;

/// Keeps uploaded bytes in a map. Data is lost on process restart.
pub struct InMemoryBlobStorage {
    base_url: String,
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Bytes stored under the object name at the end of `url`.
    pub async fn get(&self, url: &str) -> Option<Vec<u8>> {
        let name = url.rsplit('/').next()?;
        self.objects.read().await.get(name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryBlobStorage {
    fn default() -> Self {
        Self::new("memory://blobs")
    }
}

#[async_trait]
impl BlobStorage for InMemoryBlobStorage {
    async fn upload(&self, image: &ImageUpload) -> Result<String, BlobError> {
        let name = object_name(&image.bytes, &image.content_type);
        self.objects
            .write()
            .await
            .insert(name.clone(), image.bytes.clone());
        Ok(format!("{}/{}", self.base_url, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_and_get() {
        let storage = InMemoryBlobStorage::default();
        let image = ImageUpload {
            file_name: None,
            content_type: "image/gif".into(),
            bytes: b"GIF89a".to_vec(),
        };

        let url = storage.upload(&image).await.unwrap();
        assert!(url.starts_with("memory://blobs/"));
        assert_eq!(storage.get(&url).await, Some(b"GIF89a".to_vec()));
        assert_eq!(storage.len().await, 1);
    }
}
