//! Error types for stackoverflow-tags
//!
//! Two layers live here. [`FetchError`] is the per-attempt taxonomy the
//! page fetcher reports and the pagination driver classifies for retries.
//! [`Error`] is the crate-wide error returned by configuration, output and
//! the CLI runner. Fetch failures never reach it; the driver reports them
//! through its abort reason.

use thiserror::Error;

/// Failure of a single page fetch attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connectivity problem or timeout before a response arrived
    #[error("transport error: {message}")]
    Transport { message: String, timeout: bool },

    /// The server answered with something other than 200 OK
    #[error("unexpected HTTP status {code}")]
    Status { code: u16 },

    /// The body could not be decoded as a tag page
    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

impl FetchError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            timeout: false,
        }
    }

    /// Create a transport error caused by a timeout
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            timeout: true,
        }
    }

    /// Create a status error
    pub fn status(code: u16) -> Self {
        Self::Status { code }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Check if this error is retryable on its own merits
    ///
    /// Decode errors are not, although the driver may still spend retry
    /// budget on them depending on its policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport { .. } | FetchError::Status { .. } => true,
            FetchError::Decode { .. } => false,
        }
    }

    /// HTTP status code, if the server responded
    pub fn code(&self) -> Option<u16> {
        match self {
            FetchError::Status { code } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::decode(err.to_string());
        }
        if err.is_timeout() {
            return Self::timeout(err.to_string());
        }
        Self::transport(err.to_string())
    }
}

/// The main error type for stackoverflow-tags
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Output error: {message}")]
    Output { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }
}

/// Result type alias for stackoverflow-tags
pub type Result<T> = std::result::Result<T, Error>;
