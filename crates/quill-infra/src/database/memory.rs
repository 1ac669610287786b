//! In-memory repositories, used when no database is configured and in tests.
//!
//! Uniqueness is checked and the row written under one write lock, so
//! concurrent inserts of the same email or tag name cannot both succeed.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Page, Post, Tag, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, TagRepository, UserRepository};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) || users.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}

#[derive(Default)]
pub struct InMemoryTagRepository {
    tags: RwLock<HashMap<Uuid, Tag>>,
}

impl InMemoryTagRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Tag, Uuid> for InMemoryTagRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError> {
        Ok(self.tags.read().await.get(&id).cloned())
    }

    async fn insert(&self, tag: Tag) -> Result<Tag, RepoError> {
        let mut tags = self.tags.write().await;
        if tags.contains_key(&tag.id) || tags.values().any(|t| t.name == tag.name) {
            return Err(RepoError::Constraint("tags_name_key".to_string()));
        }
        tags.insert(tag.id, tag.clone());
        Ok(tag)
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        Ok(self
            .tags
            .read()
            .await
            .values()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tag>, RepoError> {
        let tags = self.tags.read().await;
        Ok(ids.iter().filter_map(|id| tags.get(id).cloned()).collect())
    }

    async fn list(&self) -> Result<Vec<Tag>, RepoError> {
        let mut tags: Vec<Tag> = self.tags.read().await.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.contains_key(&post.id) {
            return Err(RepoError::Constraint("posts_pkey".to_string()));
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        newest_first(&mut posts);
        Ok(posts
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .posts
            .read()
            .await
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(&post.id) {
            Some(existing) => {
                *existing = post.clone();
                Ok(post)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use quill_core::domain::PostDraft;

    fn post_at(author_id: Uuid, minutes_ago: i64) -> Post {
        let draft = PostDraft {
            title: format!("post {minutes_ago}"),
            intro: "i".into(),
            description: "d".into(),
            conclusion: "c".into(),
            ..Default::default()
        };
        let mut post = Post::from_draft(draft, author_id, "u".into(), vec![]);
        post.created_at = Utc::now() - Duration::minutes(minutes_ago);
        post
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.insert(User::new("A".into(), "a@x.io".into(), "h".into()))
            .await
            .unwrap();

        let err = repo
            .insert(User::new("B".into(), "a@x.io".into(), "h".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_tag_name_unique_and_sorted() {
        let repo = InMemoryTagRepository::new();
        repo.insert(Tag::new("web".into())).await.unwrap();
        repo.insert(Tag::new("rust".into())).await.unwrap();
        assert!(matches!(
            repo.insert(Tag::new("rust".into())).await,
            Err(RepoError::Constraint(_))
        ));

        let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["rust", "web"]);
    }

    #[tokio::test]
    async fn test_posts_newest_first_with_paging() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        for minutes in [30, 10, 20] {
            repo.insert(post_at(author, minutes)).await.unwrap();
        }
        repo.insert(post_at(Uuid::new_v4(), 5)).await.unwrap();

        let titles: Vec<_> = repo
            .list(Page::new(Some(2), Some(1)))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["post 10", "post 20"]);

        let mine = repo.find_by_author(author).await.unwrap();
        assert_eq!(mine.len(), 3);
        assert_eq!(mine[0].title, "post 10");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_post() {
        let repo = InMemoryPostRepository::new();
        let post = post_at(Uuid::new_v4(), 0);
        assert!(matches!(repo.update(post.clone()).await, Err(RepoError::NotFound)));
        assert!(matches!(repo.delete(post.id).await, Err(RepoError::NotFound)));
    }
}
