//! Twitch Helix source
//!
//! User+follow+live style: resolve the login to a user id, then fetch the
//! follower total and the current stream status for that id. A failure at
//! the resolve step short-circuits the dependent requests.

use super::SourceClient;
use crate::config::TwitchConfig;
use crate::error::{BoardError, Result};
use crate::types::{MetricSnapshot, MetricValue, Platform, StatusLine};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.twitch.tv/helix";

/// The three Helix calls the source chains, behind a seam so the chain
/// can be exercised without the network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HelixApi: Send + Sync {
    async fn user_id(&self, login: &str) -> Result<String>;
    async fn follower_total(&self, user_id: &str) -> Result<u64>;
    async fn stream_live(&self, user_id: &str) -> Result<bool>;
}

/// Helix over HTTP with Client-ID + Bearer headers
pub struct HelixHttp {
    http: Client,
    base_url: String,
    client_id: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    data: Vec<HelixUser>,
}

#[derive(Debug, Deserialize)]
struct HelixUser {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FollowsResponse {
    total: u64,
}

#[derive(Debug, Deserialize)]
struct StreamsResponse {
    data: Vec<serde_json::Value>,
}

impl HelixHttp {
    pub fn new(http: Client, client_id: String, access_token: String) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id,
            access_token,
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(format!("{}{}", self.base_url, path))
            .header("Client-ID", &self.client_id)
            .bearer_auth(&self.access_token)
    }
}

#[async_trait]
impl HelixApi for HelixHttp {
    async fn user_id(&self, login: &str) -> Result<String> {
        let resp: UsersResponse = self
            .get("/users")
            .query(&[("login", login)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        resp.data
            .into_iter()
            .next()
            .map(|user| user.id)
            .ok_or_else(|| BoardError::Api(format!("unknown login {login:?}")))
    }

    async fn follower_total(&self, user_id: &str) -> Result<u64> {
        let resp: FollowsResponse = self
            .get("/users/follows")
            .query(&[("to_id", user_id)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.total)
    }

    async fn stream_live(&self, user_id: &str) -> Result<bool> {
        let resp: StreamsResponse = self
            .get("/streams")
            .query(&[("user_id", user_id)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(!resp.data.is_empty())
    }
}

pub struct TwitchSource {
    api: Box<dyn HelixApi>,
    login: String,
}

impl TwitchSource {
    pub fn new(config: TwitchConfig, http: Client) -> Self {
        Self {
            api: Box::new(HelixHttp::new(http, config.client_id, config.access_token)),
            login: config.login,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_api(api: Box<dyn HelixApi>, login: impl Into<String>) -> Self {
        Self {
            api,
            login: login.into(),
        }
    }
}

#[async_trait]
impl SourceClient for TwitchSource {
    fn platform(&self) -> Platform {
        Platform::Twitch
    }

    fn metric_keys(&self) -> &'static [&'static str] {
        &["followers"]
    }

    async fn fetch(&self) -> Result<MetricSnapshot> {
        // A resolve failure must not reach the follow/stream requests
        let user_id = self.api.user_id(&self.login).await?;
        let followers = self.api.follower_total(&user_id).await?;
        let live = self.api.stream_live(&user_id).await?;

        let mut snapshot = MetricSnapshot::new(Platform::Twitch);
        snapshot.set("followers", MetricValue::Count(followers));
        snapshot.status = Some(if live {
            StatusLine::live()
        } else {
            StatusLine::offline()
        });
        Ok(snapshot)
    }

    fn unavailable_snapshot(&self) -> MetricSnapshot {
        let mut snapshot = MetricSnapshot::unavailable(Platform::Twitch, self.metric_keys());
        snapshot.status = Some(StatusLine::error());
        snapshot
    }
}
