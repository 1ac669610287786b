//! Engagement metric sources.

use rand::Rng;
use uuid::Uuid;

use quill_core::domain::{EngagementMetrics, PostView};
use quill_core::ports::EngagementSource;

/// Random placeholder figures. There is no view tracking behind these.
#[derive(Debug, Default)]
pub struct SyntheticEngagement;

impl EngagementSource for SyntheticEngagement {
    fn metrics(&self, _author_id: Uuid, _posts: &[PostView]) -> EngagementMetrics {
        let mut rng = rand::thread_rng();
        EngagementMetrics {
            total_views: rng.gen_range(1_000..11_000),
            average_read_time_minutes: rng.gen_range(3..11),
            engagement_percent: rng.gen_range(15..100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_ranges() {
        let source = SyntheticEngagement;
        for _ in 0..100 {
            let m = source.metrics(Uuid::new_v4(), &[]);
            assert!((1_000..11_000).contains(&m.total_views));
            assert!((3..11).contains(&m.average_read_time_minutes));
            assert!((15..100).contains(&m.engagement_percent));
        }
    }
}
