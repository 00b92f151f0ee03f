//! Core data types: platforms, snapshots, and aggregate totals

use crate::format::format_metric;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Platform identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Youtube,
    Twitch,
    Kick,
    Twitter,
    Tiktok,
    Instagram,
}

impl Platform {
    /// Stable id used as the slot-key prefix
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Twitch => "twitch",
            Platform::Kick => "kick",
            Platform::Twitter => "twitter",
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A single metric reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricValue {
    Count(u64),
    Unavailable,
}

impl MetricValue {
    pub fn count(&self) -> Option<u64> {
        match self {
            MetricValue::Count(n) => Some(*n),
            MetricValue::Unavailable => None,
        }
    }

    /// Display-ready rendering ("1.5K", "2.5M", "N/A")
    pub fn display(&self) -> String {
        format_metric(self.count())
    }
}

/// Style class attached to a status slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleClass {
    Live,
    Offline,
}

impl StyleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleClass::Live => "live",
            StyleClass::Offline => "offline",
        }
    }
}

/// Text plus style class written into a status slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub text: String,
    pub class: StyleClass,
}

impl StatusLine {
    pub fn live() -> Self {
        Self {
            text: "🔴 LIVE".to_string(),
            class: StyleClass::Live,
        }
    }

    pub fn offline() -> Self {
        Self {
            text: "Offline".to_string(),
            class: StyleClass::Offline,
        }
    }

    pub fn error() -> Self {
        Self {
            text: "Error".to_string(),
            class: StyleClass::Offline,
        }
    }

    /// Status pointing the viewer at the platform itself (no API available)
    pub fn check_externally(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: StyleClass::Offline,
        }
    }
}

/// Latest known metric values for one source.
///
/// Replaced wholesale each cycle: a failed fetch yields a snapshot where
/// every metric the source owns is `Unavailable`, never a partial merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub platform: Platform,
    pub metrics: BTreeMap<String, MetricValue>,
    pub status: Option<StatusLine>,
    /// Embed URL for the most recent content item, when the platform has one
    pub embed_url: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl MetricSnapshot {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            metrics: BTreeMap::new(),
            status: None,
            embed_url: None,
            fetched_at: Utc::now(),
        }
    }

    /// Snapshot with every given metric marked unavailable
    pub fn unavailable(platform: Platform, keys: &[&str]) -> Self {
        let mut snapshot = Self::new(platform);
        for key in keys {
            snapshot.set(key, MetricValue::Unavailable);
        }
        snapshot
    }

    pub fn set(&mut self, key: &str, value: MetricValue) {
        self.metrics.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<MetricValue> {
        self.metrics.get(key).copied()
    }

    /// True when no metric carries a numeric value
    pub fn is_unavailable(&self) -> bool {
        self.metrics.values().all(|v| v.count().is_none())
    }
}

/// Derived sums across all sources' snapshots, recomputed each cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub followers: u64,
    pub views: u64,
    pub videos: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_snapshot_covers_all_keys() {
        let snapshot = MetricSnapshot::unavailable(Platform::Twitter, &["followers", "posts"]);
        assert_eq!(snapshot.get("followers"), Some(MetricValue::Unavailable));
        assert_eq!(snapshot.get("posts"), Some(MetricValue::Unavailable));
        assert!(snapshot.is_unavailable());
    }

    #[test]
    fn test_snapshot_with_counts_is_available() {
        let mut snapshot = MetricSnapshot::new(Platform::Youtube);
        snapshot.set("subs", MetricValue::Count(10));
        snapshot.set("views", MetricValue::Unavailable);
        assert!(!snapshot.is_unavailable());
        assert_eq!(snapshot.get("subs").and_then(|v| v.count()), Some(10));
    }

    #[test]
    fn test_platform_ids() {
        assert_eq!(Platform::Youtube.id(), "youtube");
        assert_eq!(Platform::Kick.to_string(), "kick");
    }

    #[test]
    fn test_style_class_str() {
        assert_eq!(StyleClass::Live.as_str(), "live");
        assert_eq!(StyleClass::Offline.as_str(), "offline");
    }
}
