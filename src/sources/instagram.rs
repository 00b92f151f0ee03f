//! Instagram Basic Display API source
//!
//! Single-endpoint style with the access token passed as a query
//! parameter. Counts the API omits render as unavailable individually.

use super::SourceClient;
use crate::config::InstagramConfig;
use crate::error::Result;
use crate::types::{MetricSnapshot, MetricValue, Platform};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://graph.instagram.com";

pub struct InstagramSource {
    http: Client,
    base_url: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    followers_count: Option<u64>,
    media_count: Option<u64>,
}

impl InstagramSource {
    pub fn new(config: InstagramConfig, http: Client) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: config.access_token,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(config: InstagramConfig, http: Client, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::new(config, http)
        }
    }
}

fn count_or_unavailable(value: Option<u64>) -> MetricValue {
    value.map(MetricValue::Count).unwrap_or(MetricValue::Unavailable)
}

#[async_trait]
impl SourceClient for InstagramSource {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn metric_keys(&self) -> &'static [&'static str] {
        &["followers", "posts"]
    }

    async fn fetch(&self) -> Result<MetricSnapshot> {
        let url = format!("{}/me", self.base_url);
        let resp: MeResponse = self
            .http
            .get(&url)
            .query(&[
                ("fields", "followers_count,media_count"),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut snapshot = MetricSnapshot::new(Platform::Instagram);
        snapshot.set("followers", count_or_unavailable(resp.followers_count));
        snapshot.set("posts", count_or_unavailable(resp.media_count));
        Ok(snapshot)
    }
}
