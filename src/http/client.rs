//! Tag page client
//!
//! Builds the `/tags` request for a page number, sends it with reqwest and
//! decodes the body. Errors are classified for the retry logic upstream.

use crate::config::FetchConfig;
use crate::error::{Error, FetchError, Result};
use crate::types::TagPage;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

/// Something that can fetch one page of tags
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the 1-based page `page`
    async fn fetch_page(&self, page: u32) -> std::result::Result<TagPage, FetchError>;
}

/// reqwest-backed fetcher for the Stack Exchange `/tags` endpoint
pub struct TagClient {
    client: Client,
    config: FetchConfig,
    tags_url: Url,
}

impl TagClient {
    /// Create a client for the given config
    pub fn new(config: FetchConfig) -> Result<Self> {
        config.validate()?;
        let tags_url = config.tags_url()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            tags_url,
        })
    }

    /// The config this client was built with
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Full request URL for a page, credentials included
    pub fn page_url(&self, page: u32) -> Url {
        let mut url = self.tags_url.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("pagesize", &self.config.page_size.to_string())
            .append_pair("order", &self.config.order)
            .append_pair("sort", &self.config.sort)
            .append_pair("site", &self.config.site)
            .append_pair("key", self.config.credentials.key_param())
            .append_pair(
                "access_token",
                self.config.credentials.access_token_param(),
            );
        url
    }

    /// Request URL with credential values masked, for logs
    pub fn redacted_page_url(&self, page: u32) -> Url {
        let url = self.page_url(page);
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let masked = matches!(k.as_ref(), "key" | "access_token") && !v.is_empty();
                let value = if masked { "***".to_string() } else { v.into_owned() };
                (k.into_owned(), value)
            })
            .collect();

        let mut redacted = url;
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
        redacted
    }
}

#[async_trait]
impl PageFetcher for TagClient {
    async fn fetch_page(&self, page: u32) -> std::result::Result<TagPage, FetchError> {
        debug_assert!(page >= 1, "pages are 1-based");
        debug!("GET {}", self.redacted_page_url(page));

        let response = self.client.get(self.page_url(page)).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::decode(e.to_string()))
    }
}

impl std::fmt::Debug for TagClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagClient")
            .field("config", &self.config)
            .field("tags_url", &self.tags_url.as_str())
            .finish_non_exhaustive()
    }
}
