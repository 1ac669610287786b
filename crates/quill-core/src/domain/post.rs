use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Post entity - a blog post as persisted.
///
/// Author and tags are stored as references only; names are resolved at read
/// time into a [`PostView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub intro: String,
    pub description: String,
    pub conclusion: String,
    pub image_url: String,
    pub tag_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Build a new post from a validated draft.
    pub fn from_draft(draft: PostDraft, author_id: Uuid, image_url: String, tag_ids: Vec<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: draft.title.trim().to_string(),
            intro: draft.intro,
            description: draft.description,
            conclusion: draft.conclusion,
            image_url,
            tag_ids: dedup_ids(tag_ids),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Replace the tag set, dropping duplicate references.
    pub fn set_tags(&mut self, tag_ids: Vec<Uuid>) {
        self.tag_ids = dedup_ids(tag_ids);
    }

    /// Apply the supplied text fields. Image and tags are resolved by the caller.
    pub fn apply_text_changes(&mut self, changes: &PostChanges) {
        if let Some(title) = &changes.title {
            self.title = title.trim().to_string();
        }
        if let Some(intro) = &changes.intro {
            self.intro = intro.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(conclusion) = &changes.conclusion {
            self.conclusion = conclusion.clone();
        }
        self.updated_at = Utc::now();
    }
}

/// Remove duplicate ids while keeping first-seen order.
pub fn dedup_ids(ids: impl IntoIterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// An uploaded image, prior to being handed to blob storage.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.bytes.is_empty() {
            return Err(DomainError::missing("image"));
        }
        if !self.content_type.starts_with("image/") {
            return Err(DomainError::invalid("image", "Please upload a valid image file"));
        }
        Ok(())
    }
}

/// Input for creating a post. Empty strings count as missing.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub intro: String,
    pub description: String,
    pub conclusion: String,
    pub tags: Vec<String>,
    pub image: Option<ImageUpload>,
}

impl PostDraft {
    /// Check required fields in declaration order; the first missing one is reported.
    pub fn validate(&self) -> Result<(), DomainError> {
        require("title", &self.title)?;
        require("intro", &self.intro)?;
        require("description", &self.description)?;
        require("conclusion", &self.conclusion)?;
        match &self.image {
            Some(image) => image.validate(),
            None => Err(DomainError::missing("image")),
        }
    }
}

/// Partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub intro: Option<String>,
    pub description: Option<String>,
    pub conclusion: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image: Option<ImageUpload>,
}

impl PostChanges {
    /// Supplied text fields must still be non-empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("title", &self.title),
            ("intro", &self.intro),
            ("description", &self.description),
            ("conclusion", &self.conclusion),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                require(field, value)?;
            }
        }
        if let Some(image) = &self.image {
            image.validate()?;
        }
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        Err(DomainError::missing(field))
    } else {
        Ok(())
    }
}

pub const DEFAULT_PAGE_LIMIT: u64 = 10;
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Limit/offset window over the newest-first post listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Page {
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSummary {
    pub id: Uuid,
    pub name: String,
}

/// Read model: a post with author and tag names populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub intro: String,
    pub description: String,
    pub conclusion: String,
    pub image_url: String,
    pub author: AuthorSummary,
    pub tags: Vec<TagSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostView {
    pub fn new(post: Post, author: AuthorSummary, tags: Vec<TagSummary>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            intro: post.intro,
            description: post.description,
            conclusion: post.conclusion,
            image_url: post.image_url,
            author,
            tags,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageUpload {
        ImageUpload {
            file_name: Some("cover.png".into()),
            content_type: "image/png".into(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    fn draft() -> PostDraft {
        PostDraft {
            title: "Hello".into(),
            intro: "Intro".into(),
            description: "Body".into(),
            conclusion: "Bye".into(),
            tags: vec![],
            image: Some(image()),
        }
    }

    fn missing_field(result: Result<(), DomainError>) -> &'static str {
        match result {
            Err(DomainError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_complete_draft_is_valid() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_draft_reports_each_missing_field() {
        let mut d = draft();
        d.title = "  ".into();
        assert_eq!(missing_field(d.validate()), "title");

        let mut d = draft();
        d.intro.clear();
        assert_eq!(missing_field(d.validate()), "intro");

        let mut d = draft();
        d.description.clear();
        assert_eq!(missing_field(d.validate()), "description");

        let mut d = draft();
        d.conclusion.clear();
        assert_eq!(missing_field(d.validate()), "conclusion");

        let mut d = draft();
        d.image = None;
        assert_eq!(missing_field(d.validate()), "image");
    }

    #[test]
    fn test_non_image_upload_rejected() {
        let mut d = draft();
        d.image = Some(ImageUpload {
            file_name: Some("notes.txt".into()),
            content_type: "text/plain".into(),
            bytes: b"hello".to_vec(),
        });
        assert_eq!(missing_field(d.validate()), "image");
    }

    #[test]
    fn test_changes_reject_blank_supplied_field() {
        let changes = PostChanges {
            conclusion: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(missing_field(changes.validate()), "conclusion");
        assert!(PostChanges::default().validate().is_ok());
    }

    #[test]
    fn test_post_tags_are_deduplicated() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut post = Post::from_draft(draft(), Uuid::new_v4(), "u".into(), vec![a, b, a]);
        assert_eq!(post.tag_ids, vec![a, b]);

        post.set_tags(vec![b, b, b]);
        assert_eq!(post.tag_ids, vec![b]);
    }

    #[test]
    fn test_apply_text_changes_only_touches_supplied_fields() {
        let mut post = Post::from_draft(draft(), Uuid::new_v4(), "u".into(), vec![]);
        let before = post.updated_at;
        post.apply_text_changes(&PostChanges {
            title: Some("  New title ".into()),
            ..Default::default()
        });
        assert_eq!(post.title, "New title");
        assert_eq!(post.intro, "Intro");
        assert!(post.updated_at >= before);
    }

    #[test]
    fn test_page_clamps_limit() {
        assert_eq!(Page::new(None, None), Page { limit: 10, offset: 0 });
        assert_eq!(Page::new(Some(0), Some(5)).limit, 1);
        assert_eq!(Page::new(Some(1000), None).limit, MAX_PAGE_LIMIT);
    }
}
