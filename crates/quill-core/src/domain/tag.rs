use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag entity. Names are stored in normalized form and are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    /// Create a tag from an already-normalized name.
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        }
    }
}

/// Trim and lowercase a tag name. Returns `None` for blank input.
pub fn normalize_tag_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Outcome of an idempotent find-or-create.
#[derive(Debug, Clone)]
pub struct EnsuredTag {
    pub tag: Tag,
    /// True only for the call that actually inserted the tag.
    pub created: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag_name() {
        assert_eq!(normalize_tag_name("Tech"), Some("tech".to_string()));
        assert_eq!(normalize_tag_name("tech "), Some("tech".to_string()));
        assert_eq!(normalize_tag_name("  Rust Lang "), Some("rust lang".to_string()));
        assert_eq!(normalize_tag_name("   "), None);
        assert_eq!(normalize_tag_name(""), None);
    }
}
