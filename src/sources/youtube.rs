//! YouTube Data API v3 source
//!
//! Channel-statistics style: one request for subscriber/view/video counts,
//! then a secondary search for the most recent video id, used only to
//! build the embed URL.

use super::SourceClient;
use crate::config::YoutubeConfig;
use crate::error::{BoardError, Result};
use crate::types::{MetricSnapshot, MetricValue, Platform};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

pub struct YoutubeSource {
    http: Client,
    base_url: String,
    api_key: String,
    channel_id: String,
}

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    items: Option<Vec<ChannelItem>>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    statistics: ChannelStatistics,
}

// The Data API returns counts as JSON strings
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelStatistics {
    subscriber_count: String,
    view_count: String,
    video_count: String,
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchId {
    video_id: Option<String>,
}

impl YoutubeSource {
    pub fn new(config: YoutubeConfig, http: Client) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: config.api_key,
            channel_id: config.channel_id,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(config: YoutubeConfig, http: Client, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::new(config, http)
        }
    }

    async fn channel_statistics(&self) -> Result<ChannelStatistics> {
        let url = format!("{}/channels", self.base_url);
        let resp: ChannelListResponse = self
            .http
            .get(&url)
            .query(&[
                ("part", "statistics"),
                ("id", self.channel_id.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        resp.items
            .and_then(|items| items.into_iter().next())
            .map(|item| item.statistics)
            .ok_or(BoardError::MissingField("items"))
    }

    async fn latest_video_id(&self) -> Result<Option<String>> {
        let url = format!("{}/search", self.base_url);
        let resp: SearchListResponse = self
            .http
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("channelId", self.channel_id.as_str()),
                ("maxResults", "1"),
                ("order", "date"),
                ("type", "video"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp
            .items
            .and_then(|items| items.into_iter().next())
            .and_then(|item| item.id.video_id))
    }
}

fn parse_count(raw: &str, field: &'static str) -> Result<u64> {
    raw.parse()
        .map_err(|_| BoardError::Api(format!("unparseable {field}: {raw:?}")))
}

#[async_trait]
impl SourceClient for YoutubeSource {
    fn platform(&self) -> Platform {
        Platform::Youtube
    }

    fn metric_keys(&self) -> &'static [&'static str] {
        &["subs", "views", "videos"]
    }

    async fn fetch(&self) -> Result<MetricSnapshot> {
        let stats = self.channel_statistics().await?;

        let mut snapshot = MetricSnapshot::new(Platform::Youtube);
        snapshot.set(
            "subs",
            MetricValue::Count(parse_count(&stats.subscriber_count, "subscriberCount")?),
        );
        snapshot.set(
            "views",
            MetricValue::Count(parse_count(&stats.view_count, "viewCount")?),
        );
        snapshot.set(
            "videos",
            MetricValue::Count(parse_count(&stats.video_count, "videoCount")?),
        );

        // A failed video lookup only costs the embed, not the metrics
        match self.latest_video_id().await {
            Ok(Some(video_id)) => {
                snapshot.embed_url = Some(format!("https://www.youtube.com/embed/{}", video_id));
            }
            Ok(None) => {}
            Err(e) => warn!("[youtube] latest video lookup failed: {}", e),
        }

        Ok(snapshot)
    }
}
