//! Placeholder sources for platforms without an accessible public API
//!
//! No network call is made; every cycle yields the same fixed snapshot
//! pointing the viewer at the platform itself.

use super::SourceClient;
use crate::error::Result;
use crate::types::{MetricSnapshot, Platform, StatusLine};
use async_trait::async_trait;

pub struct PlaceholderSource {
    platform: Platform,
    keys: &'static [&'static str],
    status: Option<StatusLine>,
}

impl PlaceholderSource {
    /// Kick has no public API; followers stay unavailable
    pub fn kick() -> Self {
        Self {
            platform: Platform::Kick,
            keys: &["followers"],
            status: Some(StatusLine::check_externally("Check Kick.com")),
        }
    }

    /// TikTok's official API needs special permissions; metrics stay unavailable
    pub fn tiktok() -> Self {
        Self {
            platform: Platform::Tiktok,
            keys: &["followers", "likes"],
            status: None,
        }
    }
}

#[async_trait]
impl SourceClient for PlaceholderSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn metric_keys(&self) -> &'static [&'static str] {
        self.keys
    }

    async fn fetch(&self) -> Result<MetricSnapshot> {
        let mut snapshot = MetricSnapshot::unavailable(self.platform, self.keys);
        snapshot.status = self.status.clone();
        Ok(snapshot)
    }

    fn unavailable_snapshot(&self) -> MetricSnapshot {
        let mut snapshot = MetricSnapshot::unavailable(self.platform, self.keys);
        snapshot.status = self.status.clone();
        snapshot
    }
}
