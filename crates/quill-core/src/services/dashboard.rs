//! Per-author dashboard rollups.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{DashboardStats, TOP_TAG_LIMIT, monthly_counts, top_tags};
use crate::error::DomainError;
use crate::ports::EngagementSource;

use super::ContentService;

pub struct DashboardService {
    content: Arc<ContentService>,
    engagement: Arc<dyn EngagementSource>,
}

impl DashboardService {
    pub fn new(content: Arc<ContentService>, engagement: Arc<dyn EngagementSource>) -> Self {
        Self { content, engagement }
    }

    /// Statistics over the caller's own posts only.
    pub async fn get_stats(&self, author_id: Uuid) -> Result<DashboardStats, DomainError> {
        self.stats_at(author_id, Utc::now()).await
    }

    pub async fn stats_at(&self, author_id: Uuid, now: DateTime<Utc>) -> Result<DashboardStats, DomainError> {
        let posts = self.content.posts_by_author(author_id).await?;
        let synthetic = self.engagement.metrics(author_id, &posts);

        Ok(DashboardStats {
            total_posts: posts.len() as u64,
            posts_by_month: monthly_counts(&posts, now),
            top_tags: top_tags(&posts, TOP_TAG_LIMIT),
            latest_post: posts.first().cloned(),
            synthetic,
        })
    }
}
