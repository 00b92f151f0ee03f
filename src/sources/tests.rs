//! Tests for the platform source clients

use super::twitch::MockHelixApi;
use super::*;
use crate::config::{InstagramConfig, TwitterConfig, YoutubeConfig};
use crate::error::BoardError;
use crate::types::{MetricValue, Platform, StyleClass};
use reqwest::Client;

// Nothing listens here; requests fail fast with a transport error
const DEAD_BASE_URL: &str = "http://127.0.0.1:1";

fn yt_config() -> YoutubeConfig {
    YoutubeConfig {
        api_key: "key".to_string(),
        channel_id: "UC123".to_string(),
    }
}

#[tokio::test]
async fn test_youtube_transport_failure_degrades_to_unavailable() {
    let source = YoutubeSource::with_base_url(yt_config(), Client::new(), DEAD_BASE_URL);

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, BoardError::Network(_)));

    let snapshot = source.unavailable_snapshot();
    for key in source.metric_keys() {
        assert_eq!(snapshot.get(key), Some(MetricValue::Unavailable));
    }
    assert!(snapshot.is_unavailable());
}

#[tokio::test]
async fn test_twitter_transport_failure_degrades_to_unavailable() {
    let config = TwitterConfig {
        bearer_token: "token".to_string(),
        username: "someone".to_string(),
    };
    let source = TwitterSource::with_base_url(config, Client::new(), DEAD_BASE_URL);

    assert!(source.fetch().await.is_err());

    let snapshot = source.unavailable_snapshot();
    assert_eq!(snapshot.get("followers"), Some(MetricValue::Unavailable));
    assert_eq!(snapshot.get("posts"), Some(MetricValue::Unavailable));
}

#[tokio::test]
async fn test_instagram_transport_failure_degrades_to_unavailable() {
    let config = InstagramConfig {
        access_token: "token".to_string(),
    };
    let source = InstagramSource::with_base_url(config, Client::new(), DEAD_BASE_URL);

    assert!(source.fetch().await.is_err());
    assert!(source.unavailable_snapshot().is_unavailable());
}

#[tokio::test]
async fn test_twitch_resolve_failure_short_circuits_chain() {
    let mut api = MockHelixApi::new();
    api.expect_user_id()
        .returning(|_| Err(BoardError::Api("unknown login".to_string())));
    // The dependent requests must never be issued
    api.expect_follower_total().times(0);
    api.expect_stream_live().times(0);

    let source = TwitchSource::with_api(Box::new(api), "somechannel");
    assert!(source.fetch().await.is_err());

    let snapshot = source.unavailable_snapshot();
    assert_eq!(snapshot.get("followers"), Some(MetricValue::Unavailable));
    let status = snapshot.status.unwrap();
    assert_eq!(status.text, "Error");
    assert_eq!(status.class, StyleClass::Offline);
}

#[tokio::test]
async fn test_twitch_full_chain_success() {
    let mut api = MockHelixApi::new();
    api.expect_user_id()
        .withf(|login| login == "somechannel")
        .returning(|_| Ok("42".to_string()));
    api.expect_follower_total()
        .withf(|id| id == "42")
        .returning(|_| Ok(1_500));
    api.expect_stream_live()
        .withf(|id| id == "42")
        .returning(|_| Ok(true));

    let source = TwitchSource::with_api(Box::new(api), "somechannel");
    let snapshot = source.fetch().await.unwrap();

    assert_eq!(snapshot.get("followers"), Some(MetricValue::Count(1_500)));
    let status = snapshot.status.unwrap();
    assert_eq!(status.class, StyleClass::Live);
}

#[tokio::test]
async fn test_twitch_offline_status() {
    let mut api = MockHelixApi::new();
    api.expect_user_id().returning(|_| Ok("42".to_string()));
    api.expect_follower_total().returning(|_| Ok(10));
    api.expect_stream_live().returning(|_| Ok(false));

    let source = TwitchSource::with_api(Box::new(api), "somechannel");
    let snapshot = source.fetch().await.unwrap();

    let status = snapshot.status.unwrap();
    assert_eq!(status.text, "Offline");
    assert_eq!(status.class, StyleClass::Offline);
}

#[tokio::test]
async fn test_kick_placeholder_makes_no_progress_but_never_fails() {
    let source = PlaceholderSource::kick();
    let snapshot = source.fetch().await.unwrap();

    assert_eq!(snapshot.platform, Platform::Kick);
    assert_eq!(snapshot.get("followers"), Some(MetricValue::Unavailable));
    let status = snapshot.status.unwrap();
    assert_eq!(status.text, "Check Kick.com");
    assert_eq!(status.class, StyleClass::Offline);
}

#[tokio::test]
async fn test_tiktok_placeholder_owns_both_metrics() {
    let source = PlaceholderSource::tiktok();
    let snapshot = source.fetch().await.unwrap();

    assert_eq!(snapshot.platform, Platform::Tiktok);
    assert_eq!(snapshot.get("followers"), Some(MetricValue::Unavailable));
    assert_eq!(snapshot.get("likes"), Some(MetricValue::Unavailable));
    assert!(snapshot.status.is_none());
}

#[test]
fn test_registry_builds_only_configured_sources() {
    let raw = r#"
        [twitch]
        client_id = "cid"
        access_token = "tok"
        login = "somechannel"

        [kick]
        channel = "somechannel"
    "#;
    let config: crate::config::Config = toml::from_str(raw).unwrap();

    let sources = build_sources(&config, &Client::new());
    let platforms: Vec<Platform> = sources.iter().map(|s| s.platform()).collect();
    assert_eq!(platforms, vec![Platform::Twitch, Platform::Kick]);
}

#[test]
fn test_registry_empty_config() {
    let config: crate::config::Config = toml::from_str("").unwrap();
    assert!(build_sources(&config, &Client::new()).is_empty());
}
