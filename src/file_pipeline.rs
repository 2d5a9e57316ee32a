/*!
 * Per-file translation pipeline.
 *
 * The pipeline takes one localization CSV file from disk to disk: parse,
 * classify each line (passthrough, skip, cache hit, or needs translation),
 * dispatch the remainder in batches, then reassemble the output in the
 * original line order and write it atomically. Every input line produces
 * exactly one output line.
 */

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use crate::csv_processor::{self, CsvDocument, CsvLine, ParsedLine};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::language_utils::{Detection, LanguageDetector, language_codes_match};
use crate::stats::FileReport;
use crate::translation::batch::{BatchDispatcher, TranslationJob};
use crate::translation::cache::TranslationCache;
use crate::translation::concurrency::ModeProfile;
use crate::translation::pool::TranslatorPool;

/// How a parsed record line will be handled.
enum LineAction {
    /// Emit the original line untouched and count it as skipped
    Skip,
    /// Emit a cached translation
    CacheHit(String),
    /// Send the line to the dispatcher
    Translate,
}

/// Drives one file through classification, dispatch and output assembly.
pub struct FilePipeline {
    cache: Arc<TranslationCache>,
    dispatcher: BatchDispatcher,
    detector: LanguageDetector,
    target_language: String,
}

impl FilePipeline {
    /// Create a pipeline sharing the given pool and cache.
    pub fn new(
        pool: Arc<TranslatorPool>,
        cache: Arc<TranslationCache>,
        profile: ModeProfile,
        max_retries: u32,
        min_text_length: usize,
        target_language: impl Into<String>,
    ) -> Self {
        let target_language = target_language.into();
        let dispatcher = BatchDispatcher::new(
            pool,
            Arc::clone(&cache),
            profile,
            max_retries,
            target_language.clone(),
        );

        Self {
            cache,
            dispatcher,
            detector: LanguageDetector::new(min_text_length),
            target_language,
        }
    }

    /// Translate one file, writing the result atomically to `output_path`.
    ///
    /// Per-line failures are absorbed into the report; only file-level
    /// problems (unreadable input, unwritable output) surface as errors.
    pub async fn process_file(
        &self,
        input_path: &Path,
        output_path: &Path,
        progress: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<FileReport, AppError> {
        let file_name = input_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input_path.display().to_string());
        let mut report = FileReport::new(&file_name);

        let document = CsvDocument::from_file(input_path)
            .map_err(|e| AppError::File(e.to_string()))?;
        report.lines_total = document.len();
        report.malformed_lines = document.malformed_count();

        // One output slot per input line, filled as lines resolve
        let mut slots: Vec<Option<String>> = vec![None; document.len()];
        let mut jobs = Vec::new();

        for line in &document.lines {
            match line {
                ParsedLine::Passthrough { raw, original_index } => {
                    slots[*original_index] = Some(raw.clone());
                }
                ParsedLine::Record(record) => match self.classify(record, &mut report) {
                    LineAction::Skip => {
                        report.lines_skipped += 1;
                        slots[record.original_index] = Some(record.render());
                    }
                    LineAction::CacheHit(translated) => {
                        report.cache_hits += 1;
                        slots[record.original_index] =
                            Some(record.render_with_text(&translated));
                    }
                    LineAction::Translate => {
                        jobs.push(TranslationJob::new(record.clone()));
                    }
                },
            }
        }

        debug!(
            "{}: {} lines, {} to translate, {} cached, {} skipped",
            file_name,
            report.lines_total,
            jobs.len(),
            report.cache_hits,
            report.lines_skipped
        );

        if !jobs.is_empty() {
            for job in self.dispatcher.dispatch(jobs, progress).await {
                if job.is_done() {
                    report.lines_translated += 1;
                    report.protected_variables += job.protected_variables;
                } else {
                    report.errors += 1;
                }
                slots[job.line.original_index] =
                    Some(job.line.render_with_text(job.output_text()));
            }
        }

        let lines: Vec<String> = slots
            .into_iter()
            .map(|slot| slot.unwrap_or_default())
            .collect();
        FileManager::write_atomic(output_path, &csv_processor::render_output(&lines))
            .map_err(|e| AppError::File(e.to_string()))?;

        info!("{}", report.summary());
        Ok(report)
    }

    /// Decide what to do with a well-formed record.
    ///
    /// The already-in-target check runs before the cache lookup so a line in
    /// the target language never costs a hash computation.
    fn classify(&self, record: &CsvLine, report: &mut FileReport) -> LineAction {
        let trimmed = record.text.trim();
        if trimmed.is_empty() || is_untranslatable(trimmed) {
            return LineAction::Skip;
        }

        match self.detector.detect(trimmed) {
            Detection::TooShort => return LineAction::Skip,
            Detection::Detected(code) => {
                report.record_language(&code);
                if language_codes_match(&code, &self.target_language) {
                    return LineAction::Skip;
                }
            }
            // Unreliable detection translates anyway rather than dropping
            // content
            Detection::Unknown => {}
        }

        match self.cache.get(&record.text, &self.target_language) {
            Some(translated) => LineAction::CacheHit(translated),
            None => LineAction::Translate,
        }
    }
}

/// Placeholder values game data files use for unset strings.
const IGNORED_VALUES: [&str; 3] = ["INVALID ITEM", "NONE", "NULL"];

/// Heuristic for text with nothing worth translating: no alphabetic content
/// (numbers, punctuation), a single code-like identifier token, or a known
/// placeholder value.
fn is_untranslatable(trimmed: &str) -> bool {
    if !trimmed.chars().any(|c| c.is_alphabetic()) {
        return true;
    }

    if IGNORED_VALUES.contains(&trimmed) {
        return true;
    }

    !trimmed.contains(' ')
        && trimmed
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
