//! Blob storage implementations for uploaded images.

mod local;
mod memory;

pub use local::{LocalBlobConfig, LocalBlobStorage};
pub use memory::InMemoryBlobStorage;

/// File extension for an image content type.
pub(crate) fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/avif" => "avif",
        _ => "bin",
    }
}

/// Content-addressed object name: hex SHA-256 of the bytes plus extension.
pub(crate) fn object_name(bytes: &[u8], content_type: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}.{}", hasher.finalize(), extension_for(content_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_name_is_content_addressed() {
        let a = object_name(b"same bytes", "image/png");
        let b = object_name(b"same bytes", "image/png");
        let c = object_name(b"other bytes", "image/png");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.ends_with(".png"));
        assert_eq!(a.len(), 64 + ".png".len());
    }

    #[test]
    fn test_extension_for_unknown_type() {
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/x-unknown"), "bin");
    }
}
