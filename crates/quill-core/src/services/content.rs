//! Posts and tags: validation, ownership and read-time population.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    AuthorSummary, EnsuredTag, ImageUpload, Page, Post, PostChanges, PostDraft, PostView, Tag,
    TagSummary, dedup_ids, normalize_tag_name,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{BlobStorage, PostRepository, TagRepository, UserRepository};

const UNKNOWN_AUTHOR: &str = "Unknown author";

pub struct ContentService {
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
    users: Arc<dyn UserRepository>,
    blobs: Arc<dyn BlobStorage>,
}

impl ContentService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        tags: Arc<dyn TagRepository>,
        users: Arc<dyn UserRepository>,
        blobs: Arc<dyn BlobStorage>,
    ) -> Self {
        Self {
            posts,
            tags,
            users,
            blobs,
        }
    }

    /// Create a post owned by `author_id`.
    ///
    /// Everything is validated before the image upload and the insert.
    pub async fn create_post(&self, draft: PostDraft, author_id: Uuid) -> Result<PostView, DomainError> {
        draft.validate()?;

        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(DomainError::Unauthenticated)?;

        let image = draft.image.as_ref().ok_or_else(|| DomainError::missing("image"))?;
        let image_url = self.upload(image).await?;
        let tag_ids = self.resolve_tags(&draft.tags).await?;

        let post = self
            .posts
            .insert(Post::from_draft(draft, author.id, image_url, tag_ids))
            .await?;
        tracing::info!(post_id = %post.id, author_id = %author.id, "Post created");

        self.populate_one(post).await
    }

    /// Newest-first page of all posts.
    pub async fn list_posts(&self, page: Page) -> Result<Vec<PostView>, DomainError> {
        let posts = self.posts.list(page).await?;
        self.populate(posts).await
    }

    pub async fn get_post(&self, id: Uuid) -> Result<PostView, DomainError> {
        let post = self.find_post(id).await?;
        self.populate_one(post).await
    }

    /// Apply a partial update. Ownership is checked before the changes are
    /// even looked at.
    pub async fn update_post(
        &self,
        id: Uuid,
        changes: PostChanges,
        author_id: Uuid,
    ) -> Result<PostView, DomainError> {
        let mut post = self.find_post(id).await?;
        ensure_owner(&post, author_id)?;
        changes.validate()?;

        if let Some(image) = &changes.image {
            post.image_url = self.upload(image).await?;
        }
        if let Some(tags) = &changes.tags {
            let tag_ids = self.resolve_tags(tags).await?;
            post.set_tags(tag_ids);
        }
        post.apply_text_changes(&changes);

        let post = self.posts.update(post).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("post", id),
            other => other.into(),
        })?;
        tracing::info!(post_id = %id, "Post updated");

        self.populate_one(post).await
    }

    /// Delete a post and return it as it was.
    pub async fn delete_post(&self, id: Uuid, author_id: Uuid) -> Result<PostView, DomainError> {
        let post = self.find_post(id).await?;
        ensure_owner(&post, author_id)?;

        let view = self.populate_one(post).await?;
        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("post", id),
            other => other.into(),
        })?;
        tracing::info!(post_id = %id, "Post deleted");

        Ok(view)
    }

    /// Newest-first posts of one author.
    pub async fn posts_by_author(&self, author_id: Uuid) -> Result<Vec<PostView>, DomainError> {
        let posts = self.posts.find_by_author(author_id).await?;
        self.populate(posts).await
    }

    /// Idempotent find-or-create on the normalized name.
    ///
    /// A unique violation on insert means a concurrent caller won; re-fetch theirs.
    pub async fn ensure_tag(&self, name: &str) -> Result<EnsuredTag, DomainError> {
        let name = normalize_tag_name(name).ok_or_else(|| DomainError::missing("name"))?;

        if let Some(tag) = self.tags.find_by_name(&name).await? {
            return Ok(EnsuredTag { tag, created: false });
        }

        match self.tags.insert(Tag::new(name.clone())).await {
            Ok(tag) => {
                tracing::debug!(tag = %tag.name, tag_id = %tag.id, "Tag created");
                Ok(EnsuredTag { tag, created: true })
            }
            Err(RepoError::Constraint(_)) => {
                tracing::debug!(tag = %name, "Tag created concurrently, re-fetching");
                let tag = self.tags.find_by_name(&name).await?.ok_or_else(|| {
                    DomainError::Internal(format!("tag '{name}' missing after unique violation"))
                })?;
                Ok(EnsuredTag { tag, created: false })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, DomainError> {
        Ok(self.tags.list().await?)
    }

    async fn find_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))
    }

    async fn upload(&self, image: &ImageUpload) -> Result<String, DomainError> {
        self.blobs.upload(image).await.map_err(|e| {
            tracing::error!(error = %e, "Image upload failed");
            DomainError::Upstream(e.to_string())
        })
    }

    async fn resolve_tags(&self, names: &[String]) -> Result<Vec<Uuid>, DomainError> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names.iter().filter(|n| !n.trim().is_empty()) {
            ids.push(self.ensure_tag(name).await?.tag.id);
        }
        Ok(dedup_ids(ids))
    }

    async fn populate(&self, posts: Vec<Post>) -> Result<Vec<PostView>, DomainError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids = dedup_ids(posts.iter().map(|p| p.author_id));
        let tag_ids = dedup_ids(posts.iter().flat_map(|p| p.tag_ids.iter().copied()));

        let authors: HashMap<Uuid, String> = self
            .users
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        let tags: HashMap<Uuid, String> = if tag_ids.is_empty() {
            HashMap::new()
        } else {
            self.tags
                .find_by_ids(&tag_ids)
                .await?
                .into_iter()
                .map(|t| (t.id, t.name))
                .collect()
        };

        Ok(posts
            .into_iter()
            .map(|post| {
                let author = AuthorSummary {
                    id: post.author_id,
                    name: authors
                        .get(&post.author_id)
                        .cloned()
                        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
                };
                let tag_summaries = post
                    .tag_ids
                    .iter()
                    .filter_map(|id| {
                        tags.get(id).map(|name| TagSummary {
                            id: *id,
                            name: name.clone(),
                        })
                    })
                    .collect();
                PostView::new(post, author, tag_summaries)
            })
            .collect())
    }

    async fn populate_one(&self, post: Post) -> Result<PostView, DomainError> {
        self.populate(vec![post])
            .await?
            .pop()
            .ok_or_else(|| DomainError::Internal("post lost during population".to_string()))
    }
}

fn ensure_owner(post: &Post, user_id: Uuid) -> Result<(), DomainError> {
    if post.is_authored_by(user_id) {
        Ok(())
    } else {
        tracing::warn!(post_id = %post.id, user_id = %user_id, "Rejected change to another author's post");
        Err(DomainError::Forbidden("post"))
    }
}
