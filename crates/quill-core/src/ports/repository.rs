use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Page, Post, Tag, User};
use crate::error::RepoError;

/// Generic repository trait for id lookup and insertion.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique violations surface as [`RepoError::Constraint`].
    async fn insert(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by normalized email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Batch lookup used to populate post authors.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
}

/// Tag repository. Names are unique; the store is the source of truth for that.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    /// Find a tag by normalized name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tag>, RepoError>;

    /// All tags ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, RepoError>;
}

/// Post repository. Tag references are persisted together with the post.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Newest first.
    async fn list(&self, page: Page) -> Result<Vec<Post>, RepoError>;

    /// Newest first.
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Overwrite a post and its tag set. Fails with [`RepoError::NotFound`] if absent.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Fails with [`RepoError::NotFound`] if absent.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
