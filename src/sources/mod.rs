//! Platform source clients
//!
//! Each platform implements [`SourceClient`]; the registry builds the set
//! from whatever sections the config carries, so adding a platform never
//! touches the aggregator's fan-out.

mod instagram;
mod placeholder;
mod twitch;
mod twitter;
mod youtube;
#[cfg(test)]
mod tests;

pub use instagram::InstagramSource;
pub use placeholder::PlaceholderSource;
pub use twitch::{HelixApi, HelixHttp, TwitchSource};
pub use twitter::TwitterSource;
pub use youtube::YoutubeSource;

use crate::config::Config;
use crate::error::Result;
use crate::types::{MetricSnapshot, Platform};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

/// One external platform integration
#[async_trait]
pub trait SourceClient: Send + Sync {
    fn platform(&self) -> Platform;

    /// Metric keys this source owns; these are exactly the keys its
    /// unavailable snapshot carries.
    fn metric_keys(&self) -> &'static [&'static str];

    /// Fetch the current snapshot.
    ///
    /// Any error returned here is converted by the aggregator into the
    /// source's unavailable snapshot; it never aborts the cycle.
    async fn fetch(&self) -> Result<MetricSnapshot>;

    /// Snapshot with every owned metric unavailable
    fn unavailable_snapshot(&self) -> MetricSnapshot {
        MetricSnapshot::unavailable(self.platform(), self.metric_keys())
    }
}

/// Build the source set from the configured platform sections
pub fn build_sources(config: &Config, http: &Client) -> Vec<Arc<dyn SourceClient>> {
    let mut sources: Vec<Arc<dyn SourceClient>> = Vec::new();

    if let Some(youtube) = &config.youtube {
        sources.push(Arc::new(YoutubeSource::new(youtube.clone(), http.clone())));
    }
    if let Some(twitch) = &config.twitch {
        sources.push(Arc::new(TwitchSource::new(twitch.clone(), http.clone())));
    }
    if let Some(twitter) = &config.twitter {
        sources.push(Arc::new(TwitterSource::new(twitter.clone(), http.clone())));
    }
    if let Some(instagram) = &config.instagram {
        sources.push(Arc::new(InstagramSource::new(instagram.clone(), http.clone())));
    }
    if config.kick.is_some() {
        sources.push(Arc::new(PlaceholderSource::kick()));
    }
    if config.tiktok.is_some() {
        sources.push(Arc::new(PlaceholderSource::tiktok()));
    }

    sources
}
