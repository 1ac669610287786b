//! Domain entities - the core business objects.

mod assistant;
mod post;
mod stats;
mod tag;
mod user;

pub use assistant::{Section, chat_prompt, section_prompt};
pub use post::{
    AuthorSummary, DEFAULT_PAGE_LIMIT, ImageUpload, MAX_PAGE_LIMIT, Page, Post, PostChanges,
    PostDraft, PostView, TagSummary, dedup_ids,
};
pub use stats::{
    DashboardStats, EngagementMetrics, MonthlyCount, TOP_TAG_LIMIT, TRAILING_MONTHS, TagUsage,
    monthly_counts, top_tags,
};
pub use tag::{EnsuredTag, Tag, normalize_tag_name};
pub use user::{User, mask_email, normalize_email};
