//! Configuration for fetching, paginating and persisting tags
//!
//! Everything the run needs is resolved up front into plain structs.
//! Credentials come from the environment once, at construction time, and
//! are carried inside [`FetchConfig`] from then on.

use crate::error::{Error, Result};
use crate::types::BackoffType;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

// ============================================================================
// Constants
// ============================================================================

/// Stack Exchange API root
pub const DEFAULT_BASE_URL: &str = "https://api.stackexchange.com/2.2";

/// Resource path of the tag listing, relative to the base URL
pub const TAGS_PATH: &str = "/tags";

/// Tags requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest page size the API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Site identifier sent with every request
pub const DEFAULT_SITE: &str = "stackoverflow";

/// Sort direction
pub const DEFAULT_ORDER: &str = "desc";

/// Sort key
pub const DEFAULT_SORT: &str = "popular";

/// Destination of the CSV file
pub const DEFAULT_OUTPUT_PATH: &str = "/tmp/stackoverflow_tags.csv";

/// Pause between consecutive successful page fetches
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(3);

/// Attempts allowed per page before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the OAuth access token
pub const ACCESS_TOKEN_VAR: &str = "ACCESS_TOKEN";

/// Environment variable holding the application key
pub const KEY_VAR: &str = "KEY";

// ============================================================================
// Credentials
// ============================================================================

/// Optional API credentials
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// OAuth access token
    pub access_token: Option<String>,
    /// Application key, raises the daily quota
    pub key: Option<String>,
}

impl Credentials {
    /// Create credentials from explicit values
    ///
    /// Empty strings are treated as absent.
    pub fn new(access_token: Option<String>, key: Option<String>) -> Self {
        Self {
            access_token: access_token.filter(|s| !s.is_empty()),
            key: key.filter(|s| !s.is_empty()),
        }
    }

    /// Read credentials from `ACCESS_TOKEN` and `KEY`
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::new(
            std::env::var(ACCESS_TOKEN_VAR).ok(),
            std::env::var(KEY_VAR).ok(),
        )
    }

    /// Access token as sent on the wire (empty when absent)
    pub fn access_token_param(&self) -> &str {
        self.access_token.as_deref().unwrap_or("")
    }

    /// Key as sent on the wire (empty when absent)
    pub fn key_param(&self) -> &str {
        self.key.as_deref().unwrap_or("")
    }

    /// Whether neither value is set
    pub fn is_anonymous(&self) -> bool {
        self.access_token.is_none() && self.key.is_none()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("Credentials")
            .field("access_token", &redact(&self.access_token))
            .field("key", &redact(&self.key))
            .finish()
    }
}

// ============================================================================
// Fetch Config
// ============================================================================

/// Fixed query configuration of the page fetcher
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// API root, e.g. `https://api.stackexchange.com/2.2`
    pub base_url: String,
    /// Tags per page
    pub page_size: u32,
    /// Sort direction
    pub order: String,
    /// Sort key
    pub sort: String,
    /// Site identifier
    pub site: String,
    /// API credentials
    pub credentials: Credentials,
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            order: DEFAULT_ORDER.to_string(),
            sort: DEFAULT_SORT.to_string(),
            site: DEFAULT_SITE.to_string(),
            credentials: Credentials::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("stackoverflow-tags/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FetchConfig {
    /// Create a new config builder
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::default()
    }

    /// Full URL of the tag listing, without query
    pub fn tags_url(&self) -> Result<Url> {
        let base = self.base_url.trim_end_matches('/');
        let path = TAGS_PATH.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Check the config for values the API would reject
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::invalid_value(
                "page_size",
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }
        if self.site.is_empty() {
            return Err(Error::invalid_value("site", "must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(Error::invalid_value("timeout", "must be greater than zero"));
        }
        Ok(())
    }
}

/// Builder for fetch config
#[derive(Default)]
pub struct FetchConfigBuilder {
    config: FetchConfig,
}

impl FetchConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set the site identifier
    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.config.site = site.into();
        self
    }

    /// Set the credentials
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.config.credentials = credentials;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> FetchConfig {
        self.config
    }
}

// ============================================================================
// Retry Policy
// ============================================================================

/// Bounded retry policy applied to each page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts allowed per page, including the first
    pub max_attempts: u32,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Spend retry budget on undecodable bodies instead of aborting at once
    pub retry_decode_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_type: BackoffType::Exponential,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            retry_decode_errors: true,
        }
    }
}

impl RetryPolicy {
    /// Policy with the given attempt budget and default backoff
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Policy that retries without pausing
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff_type: BackoffType::Constant,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            retry_decode_errors: true,
        }
    }

    /// Set backoff configuration
    #[must_use]
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.backoff_type = backoff_type;
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Enable or disable retrying decode errors
    #[must_use]
    pub fn retry_decode_errors(mut self, enabled: bool) -> Self {
        self.retry_decode_errors = enabled;
        self
    }

    /// Delay before the attempt following failed attempt number `attempt` (1-based)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let step = attempt.saturating_sub(1);
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self.initial_backoff.saturating_mul(step + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(step);
                self.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.max_backoff)
    }

    /// Check the policy is usable
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::invalid_value("max_attempts", "must be at least 1"));
        }
        Ok(())
    }
}

// ============================================================================
// Listing Config
// ============================================================================

/// Pacing and retry settings of the pagination driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    /// Pause between consecutive successful fetches
    pub request_delay: Duration,
    /// Per-page retry policy
    pub retry: RetryPolicy,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            request_delay: DEFAULT_REQUEST_DELAY,
            retry: RetryPolicy::default(),
        }
    }
}

impl ListingConfig {
    /// Create a listing config
    pub fn new(request_delay: Duration, retry: RetryPolicy) -> Self {
        Self {
            request_delay,
            retry,
        }
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        self.retry.validate()
    }
}

// ============================================================================
// Output Config
// ============================================================================

/// Where the CSV file goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Destination path, truncated on write
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.base_url, "https://api.stackexchange.com/2.2");
        assert_eq!(config.page_size, 100);
        assert_eq!(config.order, "desc");
        assert_eq!(config.sort, "popular");
        assert_eq!(config.site, "stackoverflow");
        assert!(config.credentials.is_anonymous());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fetch_config_builder() {
        let config = FetchConfig::builder()
            .base_url("http://localhost:8080/2.3")
            .page_size(50)
            .site("serverfault")
            .timeout(Duration::from_secs(5))
            .user_agent("test-agent/1.0")
            .credentials(Credentials::new(Some("tok".into()), None))
            .build();

        assert_eq!(config.base_url, "http://localhost:8080/2.3");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.site, "serverfault");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.credentials.access_token_param(), "tok");
        assert_eq!(config.credentials.key_param(), "");
    }

    #[test_case("https://api.stackexchange.com/2.2", "https://api.stackexchange.com/2.2/tags" ; "no slash")]
    #[test_case("https://api.stackexchange.com/2.2/", "https://api.stackexchange.com/2.2/tags" ; "trailing slash")]
    #[test_case("http://127.0.0.1:1234", "http://127.0.0.1:1234/tags" ; "bare host")]
    fn test_tags_url(base: &str, expected: &str) {
        let config = FetchConfig::builder().base_url(base).build();
        assert_eq!(config.tags_url().unwrap().as_str(), expected);
    }

    #[test_case(0 ; "zero")]
    #[test_case(101 ; "too large")]
    fn test_invalid_page_size(size: u32) {
        let config = FetchConfig::builder().page_size(size).build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = FetchConfig::builder().base_url("not a url").build();
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        let config = FetchConfig::builder().base_url("ftp://example.com").build();
        assert!(config.validate().unwrap_err().to_string().contains("scheme"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = FetchConfig::builder().timeout(Duration::ZERO).build();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "timeout"));
    }

    #[test]
    fn test_credentials_empty_values_are_absent() {
        let creds = Credentials::new(Some(String::new()), Some("k".into()));
        assert!(creds.access_token.is_none());
        assert_eq!(creds.key.as_deref(), Some("k"));
        assert!(!creds.is_anonymous());
    }

    #[test]
    fn test_credentials_debug_redacts() {
        let creds = Credentials::new(Some("secret-token".into()), Some("secret-key".into()));
        let debug = format!("{creds:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_retry_policy_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 10);
        assert!(policy.retry_decode_errors);
        assert!(policy.validate().is_ok());
        assert!(RetryPolicy::with_max_attempts(0).validate().is_err());
    }

    #[test]
    fn test_backoff_exponential() {
        let policy = RetryPolicy::default().backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_secs(1),
        );
        assert_eq!(policy.backoff_for(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_for(3), Duration::from_millis(400));
        assert_eq!(policy.backoff_for(5), Duration::from_secs(1));
        assert_eq!(policy.backoff_for(40), Duration::from_secs(1));
    }

    #[test]
    fn test_backoff_linear_and_constant() {
        let linear = RetryPolicy::default().backoff(
            BackoffType::Linear,
            Duration::from_millis(100),
            Duration::from_secs(10),
        );
        assert_eq!(linear.backoff_for(1), Duration::from_millis(100));
        assert_eq!(linear.backoff_for(3), Duration::from_millis(300));

        let constant = RetryPolicy::default().backoff(
            BackoffType::Constant,
            Duration::from_millis(250),
            Duration::from_secs(10),
        );
        assert_eq!(constant.backoff_for(1), constant.backoff_for(7));
    }

    #[test]
    fn test_immediate_policy_never_waits() {
        let policy = RetryPolicy::immediate(3);
        assert_eq!(policy.backoff_for(1), Duration::ZERO);
        assert_eq!(policy.backoff_for(3), Duration::ZERO);
    }

    #[test]
    fn test_listing_config_default() {
        let config = ListingConfig::default();
        assert_eq!(config.request_delay, Duration::from_secs(3));
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_output_config_default() {
        assert_eq!(
            OutputConfig::default().path,
            PathBuf::from("/tmp/stackoverflow_tags.csv")
        );
    }
}
