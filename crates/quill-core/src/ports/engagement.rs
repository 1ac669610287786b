//! Engagement metrics port.

use uuid::Uuid;

use crate::domain::{EngagementMetrics, PostView};

/// Source of per-author engagement figures for the dashboard.
///
/// There is no view tracking yet, so the shipped implementation is synthetic.
pub trait EngagementSource: Send + Sync {
    fn metrics(&self, author_id: Uuid, posts: &[PostView]) -> EngagementMetrics;
}
