//! Tests for the HTTP module

use super::*;
use crate::config::{Credentials, FetchConfig};
use crate::error::FetchError;
use crate::types::Tag;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TagClient {
    let config = FetchConfig::builder()
        .base_url(format!("{}/2.2", server.uri()))
        .timeout(Duration::from_secs(2))
        .build();
    TagClient::new(config).unwrap()
}

fn tag_json(name: &str, count: u64) -> serde_json::Value {
    json!({
        "has_synonyms": false,
        "is_moderator_only": false,
        "is_required": false,
        "count": count,
        "name": name
    })
}

#[test]
fn test_page_url_contains_fixed_query() {
    let config = FetchConfig::builder()
        .base_url("https://api.example.com/2.2")
        .build();
    let client = TagClient::new(config).unwrap();
    let url = client.page_url(3);

    assert_eq!(url.path(), "/2.2/tags");
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("page".into(), "3".into())));
    assert!(pairs.contains(&("pagesize".into(), "100".into())));
    assert!(pairs.contains(&("order".into(), "desc".into())));
    assert!(pairs.contains(&("sort".into(), "popular".into())));
    assert!(pairs.contains(&("site".into(), "stackoverflow".into())));
    assert!(pairs.contains(&("key".into(), String::new())));
    assert!(pairs.contains(&("access_token".into(), String::new())));
}

#[test]
fn test_redacted_url_masks_credentials() {
    let config = FetchConfig::builder()
        .base_url("https://api.example.com/2.2")
        .credentials(Credentials::new(
            Some("token-value".into()),
            Some("key-value".into()),
        ))
        .build();
    let client = TagClient::new(config).unwrap();

    assert!(client.page_url(1).as_str().contains("key-value"));
    let redacted = client.redacted_page_url(1).to_string();
    assert!(!redacted.contains("key-value"));
    assert!(!redacted.contains("token-value"));
    assert!(redacted.contains("page=1"));
}

#[test]
fn test_new_rejects_invalid_config() {
    let config = FetchConfig::builder().page_size(0).build();
    assert!(TagClient::new(config).is_err());
}

#[tokio::test]
async fn test_fetch_page_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2.2/tags"))
        .and(query_param("page", "1"))
        .and(query_param("pagesize", "100"))
        .and(query_param("order", "desc"))
        .and(query_param("sort", "popular"))
        .and(query_param("site", "stackoverflow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [tag_json("javascript", 2_300_000), tag_json("python", 2_100_000)],
            "has_more": true,
            "quota_max": 300,
            "quota_remaining": 299
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client.fetch_page(1).await.unwrap();

    assert_eq!(
        page.items,
        vec![
            Tag::new("javascript", 2_300_000),
            Tag::new("python", 2_100_000)
        ]
    );
    assert!(page.has_more);
    assert_eq!(page.quota_max, 300);
    assert_eq!(page.quota_remaining, 299);
}

#[tokio::test]
async fn test_fetch_page_sends_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2.2/tags"))
        .and(query_param("key", "app-key"))
        .and(query_param("access_token", "user-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"items": [], "has_more": false})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = FetchConfig::builder()
        .base_url(format!("{}/2.2", mock_server.uri()))
        .credentials(Credentials::new(
            Some("user-token".into()),
            Some("app-key".into()),
        ))
        .build();
    let client = TagClient::new(config).unwrap();

    let page = client.fetch_page(1).await.unwrap();
    assert!(page.items.is_empty());
    assert!(!page.has_more);
}

#[tokio::test]
async fn test_fetch_page_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2.2/tags"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.fetch_page(1).await.unwrap_err();

    assert_eq!(err, FetchError::status(502));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_fetch_page_non_200_success_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2.2/tags"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.fetch_page(1).await.unwrap_err();
    assert_eq!(err.code(), Some(204));
}

#[tokio::test]
async fn test_fetch_page_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2.2/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.fetch_page(1).await.unwrap_err();

    assert!(matches!(err, FetchError::Decode { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_fetch_page_wrong_shape_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2.2/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"name": "rust"}],
            "has_more": false
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.fetch_page(1).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn test_fetch_page_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2.2/tags"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"items": [], "has_more": false}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let config = FetchConfig::builder()
        .base_url(format!("{}/2.2", mock_server.uri()))
        .timeout(Duration::from_millis(100))
        .build();
    let client = TagClient::new(config).unwrap();

    let err = client.fetch_page(1).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { timeout: true, .. }));
}

#[tokio::test]
async fn test_fetch_page_connection_refused() {
    // Nothing listens on port 1
    let config = FetchConfig::builder()
        .base_url("http://127.0.0.1:1/2.2")
        .timeout(Duration::from_secs(2))
        .build();
    let client = TagClient::new(config).unwrap();

    let err = client.fetch_page(1).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
    assert!(err.is_retryable());
}
