/*!
 * Error types for the loctran application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The provider signalled throttling; the dispatcher backs off and retries
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// The request did not complete within the configured per-call timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),
}

impl ProviderError {
    /// Whether this error should trigger backoff-and-retry rather than
    /// immediate failure of the job.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }
}

/// Errors that can occur while reading or writing the persistent cache
#[derive(Error, Debug)]
pub enum CacheError {
    /// Error loading the cache file; callers start with an empty cache
    #[error("Failed to read cache file: {0}")]
    Read(String),

    /// Error persisting the cache file; the in-memory cache remains usable
    #[error("Failed to write cache file: {0}")]
    Write(String),
}

/// A raw CSV line without a `|` delimiter (or with an empty key).
///
/// Recoverable: the line is kept verbatim in the output and counted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed line (missing '|' delimiter): {0}")]
pub struct MalformedLine(pub String);

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-level failure; the only error that aborts the run
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the translation cache
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Whether this error should abort the whole run with a non-zero exit.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
