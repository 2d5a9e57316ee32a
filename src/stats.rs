/*!
 * Run and per-file statistics.
 *
 * Statistics are explicit values owned by the controller, updated at defined
 * join points only: the file pipeline fills a `FileReport` after its
 * dispatcher completes, and the controller folds reports into the
 * `RunStatistics` between files. No worker touches these concurrently.
 */

use std::collections::BTreeMap;
use std::time::Duration;

/// Per-line counters for one processed file.
#[derive(Debug, Default, Clone)]
pub struct FileReport {
    /// File name for log output
    pub file_name: String,

    /// Total lines read from the input file
    pub lines_total: usize,

    /// Lines translated through the provider this run
    pub lines_translated: usize,

    /// Lines resolved from the persistent cache
    pub cache_hits: usize,

    /// Lines passed through untouched (short, empty, already target language,
    /// or untranslatable)
    pub lines_skipped: usize,

    /// Lines without a usable `key|text` delimiter
    pub malformed_lines: usize,

    /// Lines whose translation failed after retries (original text kept)
    pub errors: usize,

    /// Format variables protected across provider calls
    pub protected_variables: usize,

    /// Multiset of source languages detected in this file
    pub detected_languages: BTreeMap<String, usize>,
}

impl FileReport {
    /// Create a report for the named file.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    /// Record one detected source language occurrence.
    pub fn record_language(&mut self, code: &str) {
        *self.detected_languages.entry(code.to_string()).or_insert(0) += 1;
    }

    /// One-line summary for the per-file log entry.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} lines, {} translated, {} cached, {} skipped, {} malformed, {} errors",
            self.file_name,
            self.lines_total,
            self.lines_translated,
            self.cache_hits,
            self.lines_skipped,
            self.malformed_lines,
            self.errors
        )
    }
}

/// Aggregated counters for one run.
#[derive(Debug, Default, Clone)]
pub struct RunStatistics {
    /// Files processed to completion
    pub files_processed: usize,

    /// Files that failed at the file level (unreadable input etc.)
    pub files_failed: usize,

    /// Total lines read across all files
    pub lines_total: usize,

    /// Lines translated through the provider
    pub lines_translated: usize,

    /// Lines resolved from the cache
    pub cache_hits: usize,

    /// Lines passed through untouched
    pub lines_skipped: usize,

    /// Lines without a usable delimiter
    pub malformed_lines: usize,

    /// Per-line translation failures
    pub errors: usize,

    /// Format variables protected across provider calls
    pub protected_variables: usize,

    /// Multiset of detected source languages
    pub detected_languages: BTreeMap<String, usize>,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunStatistics {
    /// Fold a completed file report into the run totals.
    pub fn merge_file(&mut self, report: &FileReport) {
        self.files_processed += 1;
        self.lines_total += report.lines_total;
        self.lines_translated += report.lines_translated;
        self.cache_hits += report.cache_hits;
        self.lines_skipped += report.lines_skipped;
        self.malformed_lines += report.malformed_lines;
        self.errors += report.errors;
        self.protected_variables += report.protected_variables;
        for (code, count) in &report.detected_languages {
            *self.detected_languages.entry(code.clone()).or_insert(0) += count;
        }
    }

    /// Translations per second over the whole run.
    pub fn translations_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.lines_translated as f64 / secs
        } else {
            0.0
        }
    }

    /// Multi-line human-readable summary for the run log.
    pub fn summary(&self) -> String {
        let languages = if self.detected_languages.is_empty() {
            "none".to_string()
        } else {
            self.detected_languages
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!(
            "Files processed: {} ({} failed)\n\
             Lines total: {}\n\
             Lines translated: {}\n\
             Cache hits: {}\n\
             Lines skipped: {}\n\
             Malformed lines: {}\n\
             Errors: {}\n\
             Protected variables: {}\n\
             Detected languages: {}\n\
             Elapsed: {} ({:.2} translations/s)",
            self.files_processed,
            self.files_failed,
            self.lines_total,
            self.lines_translated,
            self.cache_hits,
            self.lines_skipped,
            self.malformed_lines,
            self.errors,
            self.protected_variables,
            languages,
            format_duration(self.elapsed),
            self.translations_per_second()
        )
    }
}

/// Format duration in a human-readable format
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}.{:03}s", seconds, duration.subsec_millis())
    }
}
