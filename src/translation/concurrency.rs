/*!
 * Mode-specific concurrency tuning.
 *
 * This module provides the throughput profile for each translation mode:
 * worker pool width, batch size, pool size and the deliberate inter-request
 * delay used for self-throttling.
 */

use std::time::Duration;

use crate::app_config::TranslationMode;

/// Concurrency profile derived from the configured mode
#[derive(Debug, Clone)]
pub struct ModeProfile {
    /// Maximum batches processed concurrently
    pub worker_count: usize,
    /// Jobs per batch
    pub batch_size: usize,
    /// Provider client handles in the pool
    pub pool_size: usize,
    /// Sleep between consecutive translate calls by the same worker.
    /// Pure self-throttling policy, not a correctness requirement.
    pub request_delay: Duration,
}

impl ModeProfile {
    /// Get the profile for a given mode
    pub fn for_mode(mode: TranslationMode) -> Self {
        match mode {
            TranslationMode::Standard => Self {
                worker_count: 8,
                batch_size: 20,
                pool_size: 8,
                request_delay: Duration::from_millis(100),
            },
            TranslationMode::Turbo => Self {
                worker_count: 32,
                batch_size: 50,
                pool_size: 32,
                request_delay: Duration::from_millis(50),
            },
        }
    }

    /// Backoff before retrying a rate-limited job.
    ///
    /// Exponential in the attempt number and always strictly greater than
    /// the inter-request delay.
    pub fn retry_backoff(&self, attempt: u32) -> Duration {
        let factor = 4u32.saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)));
        self.request_delay.saturating_mul(factor)
    }
}
