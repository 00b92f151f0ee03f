//! Configuration management

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    pub youtube: Option<YoutubeConfig>,
    pub twitch: Option<TwitchConfig>,
    pub twitter: Option<TwitterConfig>,
    pub instagram: Option<InstagramConfig>,
    pub kick: Option<KickConfig>,
    pub tiktok: Option<TiktokConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregatorConfig {
    /// Refresh cycle interval in seconds
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    /// Timeout applied to every outbound request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YoutubeConfig {
    /// Data API v3 key
    pub api_key: String,
    /// Channel id (UC...)
    pub channel_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwitchConfig {
    pub client_id: String,
    /// App access token (sent as Bearer)
    pub access_token: String,
    /// Channel login name
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwitterConfig {
    pub bearer_token: String,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstagramConfig {
    /// Basic Display API access token
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KickConfig {
    pub channel: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TiktokConfig {
    pub username: String,
}

fn default_refresh_interval() -> u64 {
    300
}

fn default_request_timeout() -> u64 {
    15
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path.as_ref().to_str().unwrap()))
            .add_source(config::Environment::with_prefix("STATBOARD"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Load from default locations
    pub fn load_default() -> anyhow::Result<Self> {
        let paths = ["config.toml", "~/.config/statboard/config.toml"];

        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::load(expanded.as_ref());
            }
        }

        anyhow::bail!("No configuration file found")
    }

    /// True when at least one platform section is configured
    pub fn has_sources(&self) -> bool {
        self.youtube.is_some()
            || self.twitch.is_some()
            || self.twitter.is_some()
            || self.instagram.is_some()
            || self.kick.is_some()
            || self.tiktok.is_some()
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let raw = r#"
            [aggregator]
            refresh_interval_secs = 60
            request_timeout_secs = 10

            [youtube]
            api_key = "yt-key"
            channel_id = "UC123"

            [twitch]
            client_id = "cid"
            access_token = "tok"
            login = "somechannel"

            [kick]
            channel = "somechannel"
        "#;

        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.aggregator.refresh_interval_secs, 60);
        assert_eq!(config.aggregator.request_timeout_secs, 10);
        assert!(config.has_sources());
        assert_eq!(config.youtube.unwrap().channel_id, "UC123");
        assert_eq!(config.twitch.unwrap().login, "somechannel");
        assert!(config.twitter.is_none());
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.aggregator.refresh_interval_secs, 300);
        assert_eq!(config.aggregator.request_timeout_secs, 15);
        assert!(!config.has_sources());
    }
}
