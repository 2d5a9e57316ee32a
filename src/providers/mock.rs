/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock translators that simulate different behaviors:
 * - `MockTranslator::working()` - Always succeeds with translated text
 * - `MockTranslator::rate_limited()` - Always reports throttling
 * - `MockTranslator::failing()` - Always fails with a provider error
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::TranslationClient;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a deterministic translation
    Working,
    /// Always fails with a generic provider error
    Failing,
    /// Always reports throttling
    RateLimited,
    /// Reports throttling for the first N calls, then succeeds
    RateLimitedFirst {
        /// Number of leading calls that are throttled
        calls: usize,
    },
    /// Fails every Nth request with a generic provider error
    Intermittent {
        /// Period of the failure pattern
        fail_every: usize,
    },
    /// Every call exceeds the per-call timeout
    TimingOut {
        /// Timeout reported in the error
        timeout_secs: u64,
    },
}

/// Mock translator for testing dispatcher and pipeline behavior
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Total translate calls, shared across clones
    call_count: Arc<AtomicUsize>,
    /// Canned translations by source text; falls back to a generated marker
    responses: HashMap<String, String>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            responses: HashMap::new(),
        }
    }

    /// Create a working mock translator that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock translator that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock translator that is always rate limited
    pub fn rate_limited() -> Self {
        Self::new(MockBehavior::RateLimited)
    }

    /// Create a mock that is throttled for the first `calls` requests
    pub fn rate_limited_first(calls: usize) -> Self {
        Self::new(MockBehavior::RateLimitedFirst { calls })
    }

    /// Create an intermittently failing mock translator
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a mock whose calls always exceed the per-call timeout
    pub fn timing_out(timeout_secs: u64) -> Self {
        Self::new(MockBehavior::TimingOut { timeout_secs })
    }

    /// Register a canned translation for a specific source text
    pub fn with_response(mut self, source: impl Into<String>, translated: impl Into<String>) -> Self {
        self.responses.insert(source.into(), translated.into());
        self
    }

    /// Total number of translate calls made through this mock (and its clones)
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn respond(&self, text: &str, target_language: &str) -> String {
        self.responses
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("[{}] {}", target_language, text))
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            call_count: Arc::clone(&self.call_count),
            responses: self.responses.clone(),
        }
    }
}

#[async_trait]
impl TranslationClient for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.respond(text, target_language)),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::RateLimited => Err(ProviderError::RateLimited(
                "Simulated throttling".to_string(),
            )),

            MockBehavior::RateLimitedFirst { calls } => {
                if count < calls {
                    Err(ProviderError::RateLimited(format!(
                        "Simulated throttling (call #{})",
                        count + 1
                    )))
                } else {
                    Ok(self.respond(text, target_language))
                }
            }

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                    })
                } else {
                    Ok(self.respond(text, target_language))
                }
            }

            MockBehavior::TimingOut { timeout_secs } => Err(ProviderError::Timeout(timeout_secs)),
        }
    }
}
