//! Dashboard statistics.
//!
//! Query-derived figures and synthetic engagement figures live in separate
//! types so the latter can be swapped for real analytics independently.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Months, Utc};
use serde::{Deserialize, Serialize};

use super::post::PostView;

pub const TRAILING_MONTHS: u32 = 6;
pub const TOP_TAG_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUsage {
    pub name: String,
    pub count: u64,
}

/// Placeholder engagement numbers. Not backed by any tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub total_views: u64,
    pub average_read_time_minutes: u32,
    pub engagement_percent: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_posts: u64,
    pub posts_by_month: Vec<MonthlyCount>,
    pub top_tags: Vec<TagUsage>,
    pub latest_post: Option<PostView>,
    pub synthetic: EngagementMetrics,
}

/// Count posts per calendar month over the trailing window ending at `now`,
/// oldest month first. Months without posts are omitted.
pub fn monthly_counts(posts: &[PostView], now: DateTime<Utc>) -> Vec<MonthlyCount> {
    let cutoff = now
        .checked_sub_months(Months::new(TRAILING_MONTHS))
        .unwrap_or(now);

    let mut buckets: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for post in posts.iter().filter(|p| p.created_at >= cutoff && p.created_at <= now) {
        *buckets
            .entry((post.created_at.year(), post.created_at.month()))
            .or_default() += 1;
    }

    buckets
        .into_iter()
        .map(|((year, month), count)| MonthlyCount { year, month, count })
        .collect()
}

/// Most frequently used tags, highest count first, ties broken by name.
pub fn top_tags(posts: &[PostView], limit: usize) -> Vec<TagUsage> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for tag in posts.iter().flat_map(|p| p.tags.iter()) {
        *counts.entry(tag.name.as_str()).or_default() += 1;
    }

    let mut usage: Vec<TagUsage> = counts
        .into_iter()
        .map(|(name, count)| TagUsage {
            name: name.to_string(),
            count,
        })
        .collect();
    usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    usage.truncate(limit);
    usage
}
