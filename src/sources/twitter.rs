//! Twitter API v2 source
//!
//! Single-endpoint style: one bearer-authenticated lookup of the user's
//! public metrics.

use super::SourceClient;
use crate::config::TwitterConfig;
use crate::error::{BoardError, Result};
use crate::types::{MetricSnapshot, MetricValue, Platform};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

pub struct TwitterSource {
    http: Client,
    base_url: String,
    bearer_token: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    data: Option<UserData>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    public_metrics: PublicMetrics,
}

#[derive(Debug, Deserialize)]
struct PublicMetrics {
    followers_count: u64,
    tweet_count: u64,
}

impl TwitterSource {
    pub fn new(config: TwitterConfig, http: Client) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            bearer_token: config.bearer_token,
            username: config.username,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(config: TwitterConfig, http: Client, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::new(config, http)
        }
    }
}

#[async_trait]
impl SourceClient for TwitterSource {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    fn metric_keys(&self) -> &'static [&'static str] {
        &["followers", "posts"]
    }

    async fn fetch(&self) -> Result<MetricSnapshot> {
        let url = format!(
            "{}/2/users/by/username/{}",
            self.base_url, self.username
        );
        let resp: UserResponse = self
            .http
            .get(&url)
            .query(&[("user.fields", "public_metrics")])
            .bearer_auth(&self.bearer_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let metrics = resp
            .data
            .ok_or(BoardError::MissingField("data"))?
            .public_metrics;

        let mut snapshot = MetricSnapshot::new(Platform::Twitter);
        snapshot.set("followers", MetricValue::Count(metrics.followers_count));
        snapshot.set("posts", MetricValue::Count(metrics.tweet_count));
        Ok(snapshot)
    }
}
