/*!
 * Batch translation dispatching.
 *
 * The dispatcher is the orchestration core: it partitions translation jobs
 * into fixed-size batches, runs batches concurrently through a
 * semaphore-bounded worker pool, self-throttles between consecutive calls,
 * retries rate-limited jobs with backoff, and reassembles results in the
 * original line order. One job's failure never aborts its batch or file.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use tokio::sync::Semaphore;

use crate::csv_processor::CsvLine;
use crate::translation::cache::TranslationCache;
use crate::translation::concurrency::ModeProfile;
use crate::translation::formatting::VariableProtector;
use crate::translation::pool::TranslatorPool;

/// States of a translation job's bounded retry state machine:
/// `Pending → InFlight → { Done | Retrying → InFlight | Failed }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Not yet picked up by a worker
    Pending,
    /// A provider call is in progress
    InFlight,
    /// Rate limited; waiting out the backoff before the next attempt
    Retrying,
    /// Terminal: translated text available
    Done(String),
    /// Terminal: translation failed, original text is kept
    Failed(String),
}

/// One line's journey through the dispatcher.
#[derive(Debug, Clone)]
pub struct TranslationJob {
    /// The line needing translation
    pub line: CsvLine,

    /// Provider calls made so far
    pub attempt: u32,

    /// Current state
    pub status: JobStatus,

    /// Format variables protected for this line
    pub protected_variables: usize,
}

impl TranslationJob {
    /// Create a pending job for a line.
    pub fn new(line: CsvLine) -> Self {
        Self {
            line,
            attempt: 0,
            status: JobStatus::Pending,
            protected_variables: 0,
        }
    }

    /// The text to emit for this job: the translation when done, the
    /// original otherwise.
    pub fn output_text(&self) -> &str {
        match &self.status {
            JobStatus::Done(text) => text,
            _ => &self.line.text,
        }
    }

    /// Whether the job resolved to a translation.
    pub fn is_done(&self) -> bool {
        matches!(self.status, JobStatus::Done(_))
    }

    /// Whether the job exhausted its options.
    pub fn is_failed(&self) -> bool {
        matches!(self.status, JobStatus::Failed(_))
    }
}

/// Concurrent batch scheduler over a translator pool.
pub struct BatchDispatcher {
    /// Provider handles, rotated per call
    pool: Arc<TranslatorPool>,

    /// Shared persistent cache, written on every success
    cache: Arc<TranslationCache>,

    /// Mode-derived worker/batch/delay knobs
    profile: ModeProfile,

    /// Maximum attempts for a rate-limited job
    max_retries: u32,

    /// Target language code
    target_language: String,
}

impl BatchDispatcher {
    /// Create a dispatcher.
    pub fn new(
        pool: Arc<TranslatorPool>,
        cache: Arc<TranslationCache>,
        profile: ModeProfile,
        max_retries: u32,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            pool,
            cache,
            profile,
            max_retries: max_retries.max(1),
            target_language: target_language.into(),
        }
    }

    /// Resolve every job to `Done` or `Failed`.
    ///
    /// The returned vector is ordered by `original_index` regardless of
    /// batch or worker completion order. `progress` is invoked with
    /// (completed, total) after each job settles.
    pub async fn dispatch(
        &self,
        jobs: Vec<TranslationJob>,
        progress: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Vec<TranslationJob> {
        let total = jobs.len();
        if total == 0 {
            return jobs;
        }

        let batch_size = self.profile.batch_size.max(1);
        let batches: Vec<Vec<TranslationJob>> = {
            let mut jobs = jobs;
            let mut batches = Vec::with_capacity(total.div_ceil(batch_size));
            while !jobs.is_empty() {
                let rest = jobs.split_off(batch_size.min(jobs.len()));
                batches.push(jobs);
                jobs = rest;
            }
            batches
        };

        let semaphore = Arc::new(Semaphore::new(self.profile.worker_count));
        let completed = Arc::new(AtomicUsize::new(0));
        let this = self;

        let mut results = stream::iter(batches.into_iter().enumerate())
            .map(|(batch_index, batch)| {
                let semaphore = Arc::clone(&semaphore);
                let completed = Arc::clone(&completed);
                let progress = progress.clone();

                async move {
                    let _permit = semaphore.acquire().await.expect("semaphore never closed");
                    debug!("Processing batch {} ({} jobs)", batch_index + 1, batch.len());

                    let mut resolved = Vec::with_capacity(batch.len());
                    for (pos, job) in batch.into_iter().enumerate() {
                        // Deliberate self-throttling between consecutive calls
                        // issued by this worker
                        if pos > 0 {
                            tokio::time::sleep(this.profile.request_delay).await;
                        }
                        resolved.push(this.run_job(job).await);

                        let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                        progress(done, total);
                    }
                    resolved
                }
            })
            .buffer_unordered(self.profile.worker_count)
            .collect::<Vec<_>>()
            .await;

        // Reassemble in original line order; completion order is irrelevant
        let mut all: Vec<TranslationJob> = results.drain(..).flatten().collect();
        all.sort_by_key(|job| job.line.original_index);
        all
    }

    /// Drive one job through its retry state machine until terminal.
    async fn run_job(&self, mut job: TranslationJob) -> TranslationJob {
        let protected = VariableProtector::protect(&job.line.text);
        job.protected_variables = protected.variable_count();

        loop {
            job.attempt += 1;
            job.status = JobStatus::InFlight;

            let client = self.pool.acquire();
            match client
                .translate(&protected.text, "auto", &self.target_language)
                .await
            {
                Ok(translated) => {
                    match VariableProtector::restore(&translated, &protected) {
                        Ok(restored) => {
                            self.cache
                                .put(&job.line.text, &self.target_language, &restored);
                            job.status = JobStatus::Done(restored);
                        }
                        Err(e) => {
                            warn!("Keeping original text for '{}': {}", job.line.key, e);
                            job.status = JobStatus::Failed(e.to_string());
                        }
                    }
                    return job;
                }
                Err(e) if e.is_rate_limited() && job.attempt < self.max_retries => {
                    debug!(
                        "Rate limited on '{}' (attempt {}/{}), backing off",
                        job.line.key, job.attempt, self.max_retries
                    );
                    job.status = JobStatus::Retrying;
                    tokio::time::sleep(self.profile.retry_backoff(job.attempt)).await;
                }
                Err(e) => {
                    warn!(
                        "Translation failed for '{}' after {} attempt(s): {}",
                        job.line.key, job.attempt, e
                    );
                    job.status = JobStatus::Failed(e.to_string());
                    return job;
                }
            }
        }
    }
}
