//! Service-level scenarios over the in-memory adapters.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::{ImageUpload, Page, PostChanges, PostDraft, Section};
use quill_core::ports::{CompletionError, TextCompletion, TokenService};
use quill_core::services::{AssistantService, ContentService, CredentialService, DashboardService};
use quill_infra::{
    Argon2PasswordService, InMemoryBlobStorage, InMemoryPostRepository, InMemoryTagRepository,
    InMemoryUserRepository, JwtConfig, JwtTokenService, SyntheticEngagement, UnavailableCompletion,
};

struct Harness {
    credentials: CredentialService,
    content: Arc<ContentService>,
    dashboard: DashboardService,
}

fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let content = Arc::new(ContentService::new(
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(InMemoryTagRepository::new()),
        users.clone(),
        Arc::new(InMemoryBlobStorage::default()),
    ));
    Harness {
        credentials: CredentialService::new(users, Arc::new(Argon2PasswordService::new())),
        dashboard: DashboardService::new(content.clone(), Arc::new(SyntheticEngagement)),
        content,
    }
}

fn image() -> ImageUpload {
    ImageUpload {
        file_name: Some("cover.png".into()),
        content_type: "image/png".into(),
        bytes: vec![0x89, b'P', b'N', b'G', 1, 2, 3],
    }
}

fn draft(title: &str, tags: &[&str]) -> PostDraft {
    PostDraft {
        title: title.into(),
        intro: "Intro".into(),
        description: "Body".into(),
        conclusion: "Bye".into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        image: Some(image()),
    }
}

#[tokio::test]
async fn test_distinct_registrations_get_distinct_ids() {
    let h = harness();
    let a = h.credentials.register("A", "a@x.io", "pw1").await.unwrap();
    let b = h.credentials.register("B", "b@x.io", "pw2").await.unwrap();
    assert_ne!(a.id, b.id);
    assert_ne!(a.password_hash, "pw1");
}

#[tokio::test]
async fn test_duplicate_email_is_case_insensitive() {
    let h = harness();
    h.credentials.register("A", "alice@x.io", "pw1").await.unwrap();

    let err = h
        .credentials
        .register("Other", "  ALICE@X.io ", "pw2")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateEmail));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let h = harness();
    h.credentials.register("A", "a@x.io", "pw1").await.unwrap();

    let unknown = h.credentials.verify_credentials("nobody@x.io", "pw1").await.unwrap_err();
    let wrong = h.credentials.verify_credentials("a@x.io", "nope").await.unwrap_err();
    assert!(matches!(unknown, DomainError::InvalidCredentials));
    assert!(matches!(wrong, DomainError::InvalidCredentials));
    assert_eq!(unknown.to_string(), wrong.to_string());

    let user = h.credentials.verify_credentials("A@X.IO", "pw1").await.unwrap();
    assert_eq!(user.email, "a@x.io");
}

#[tokio::test]
async fn test_issued_token_resolves_to_user() {
    let h = harness();
    let tokens = JwtTokenService::new(JwtConfig::default());
    let user = h.credentials.register("A", "a@x.io", "pw1").await.unwrap();

    let token = tokens.issue(user.id).unwrap();
    let subject = tokens.verify(&token).unwrap();
    assert_eq!(h.credentials.get_user(subject).await.unwrap().id, user.id);
}

#[tokio::test]
async fn test_missing_field_is_reported() {
    let h = harness();
    let user = h.credentials.register("A", "a@x.io", "pw1").await.unwrap();

    let mut d = draft("Hello", &[]);
    d.conclusion.clear();
    let err = h.content.create_post(d, user.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { field: "conclusion", .. }));
    assert!(h.content.list_posts(Page::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_requires_existing_author() {
    let h = harness();
    let err = h
        .content
        .create_post(draft("Hello", &[]), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthenticated));
}

#[tokio::test]
async fn test_non_owner_is_forbidden_even_with_invalid_changes() {
    let h = harness();
    let alice = h.credentials.register("Alice", "alice@x.io", "pw1").await.unwrap();
    let bob = h.credentials.register("Bob", "bob@x.io", "pw2").await.unwrap();
    let post = h.content.create_post(draft("Mine", &[]), alice.id).await.unwrap();

    let blank = PostChanges {
        title: Some("".into()),
        ..Default::default()
    };
    let err = h.content.update_post(post.id, blank, bob.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    let err = h.content.delete_post(post.id, bob.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    assert_eq!(h.content.get_post(post.id).await.unwrap().title, "Mine");
}

#[tokio::test]
async fn test_missing_post_is_not_found_before_ownership() {
    let h = harness();
    let alice = h.credentials.register("Alice", "alice@x.io", "pw1").await.unwrap();

    let err = h
        .content
        .update_post(Uuid::new_v4(), PostChanges::default(), alice.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_ensure_tag_yields_one_tag() {
    let h = harness();

    let mut handles = Vec::new();
    for name in ["Tech", "tech ", "TECH", " tech"] {
        let content = h.content.clone();
        handles.push(tokio::spawn(async move { content.ensure_tag(name).await }));
    }

    let mut ids = Vec::new();
    let mut created = 0;
    for handle in handles {
        let ensured = handle.await.unwrap().unwrap();
        assert_eq!(ensured.tag.name, "tech");
        if ensured.created {
            created += 1;
        }
        ids.push(ensured.tag.id);
    }

    assert_eq!(created, 1);
    assert!(ids.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(h.content.list_tags().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_blank_tag_name_rejected() {
    let h = harness();
    let err = h.content.ensure_tag("   ").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { field: "name", .. }));
}

#[tokio::test]
async fn test_two_author_scenario() {
    let h = harness();
    let alice = h.credentials.register("Alice", "alice@x.io", "pw1").await.unwrap();
    let bob = h.credentials.register("Bob", "bob@x.io", "pw2").await.unwrap();

    let first = h
        .content
        .create_post(draft("Rust tips", &["Rust", "web"]), alice.id)
        .await
        .unwrap();
    let second = h
        .content
        .create_post(draft("More Rust", &["rust"]), alice.id)
        .await
        .unwrap();
    h.content
        .create_post(draft("Bob's post", &["cooking"]), bob.id)
        .await
        .unwrap();

    assert_eq!(first.author.name, "Alice");
    let first_tags: Vec<_> = first.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(first_tags, vec!["rust", "web"]);
    assert_eq!(second.tags[0].id, first.tags[0].id);

    let all = h.content.list_posts(Page::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let mine = h.content.posts_by_author(alice.id).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|p| p.author.id == alice.id));

    let updated = h
        .content
        .update_post(
            first.id,
            PostChanges {
                title: Some("Rust tips, revised".into()),
                tags: Some(vec!["web".into()]),
                ..Default::default()
            },
            alice.id,
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Rust tips, revised");
    assert_eq!(updated.intro, "Intro");
    assert_eq!(updated.image_url, first.image_url);
    assert_eq!(updated.tags.len(), 1);

    let deleted = h.content.delete_post(second.id, alice.id).await.unwrap();
    assert_eq!(deleted.id, second.id);
    assert!(matches!(
        h.content.get_post(second.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_dashboard_only_counts_own_posts() {
    let h = harness();
    let alice = h.credentials.register("Alice", "alice@x.io", "pw1").await.unwrap();
    let bob = h.credentials.register("Bob", "bob@x.io", "pw2").await.unwrap();

    h.content.create_post(draft("A1", &["rust"]), alice.id).await.unwrap();
    let latest = h.content.create_post(draft("A2", &["rust", "web"]), alice.id).await.unwrap();
    h.content.create_post(draft("B1", &["secret"]), bob.id).await.unwrap();

    let stats = h.dashboard.stats_at(alice.id, Utc::now()).await.unwrap();
    assert_eq!(stats.total_posts, 2);
    assert_eq!(stats.posts_by_month.iter().map(|m| m.count).sum::<u64>(), 2);
    assert_eq!(stats.top_tags[0].name, "rust");
    assert!(stats.top_tags.iter().all(|t| t.name != "secret"));
    assert_eq!(stats.latest_post.map(|p| p.id), Some(latest.id));

    let empty = h.dashboard.get_stats(Uuid::new_v4()).await.unwrap();
    assert_eq!(empty.total_posts, 0);
    assert!(empty.latest_post.is_none());
}

struct EchoCompletion;

#[async_trait]
impl TextCompletion for EchoCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        Ok(format!("echo: {prompt}"))
    }
}

#[tokio::test]
async fn test_assistant_uses_completion_backend() {
    let assistant = AssistantService::new(Arc::new(EchoCompletion));
    let text = assistant.draft_section("Async Rust", Section::Intro).await.unwrap();
    assert!(text.starts_with("echo: "));
    assert!(text.contains("Async Rust"));

    let answer = assistant.answer("How do tags work?").await.unwrap();
    assert!(answer.contains("How do tags work?"));
}

#[tokio::test]
async fn test_assistant_without_backend_is_upstream_error() {
    let assistant = AssistantService::new(Arc::new(UnavailableCompletion));
    let err = assistant.answer("hi").await.unwrap_err();
    assert!(matches!(err, DomainError::Upstream(_)));
}
