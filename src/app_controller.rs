use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_pipeline::FilePipeline;
use crate::file_utils::FileManager;
use crate::stats::RunStatistics;
use crate::translation::{ModeProfile, TranslationCache, TranslatorPool};

// @module: Application controller for batch CSV translation

/// File name of the persistent cache inside the output directory
const CACHE_FILE_NAME: &str = "translation_cache.json";

/// File name of the append-only run log inside the output directory
const RUN_LOG_FILE_NAME: &str = "loctran.run.log";

/// Main application controller for localization file translation
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self { config })
    }

    /// Run the full workflow: find input files, translate each one, flush the
    /// cache between files and write the run summary.
    ///
    /// Per-file failures are logged and counted; only configuration problems
    /// abort the run.
    pub async fn run(&self) -> Result<RunStatistics, AppError> {
        let start_time = Instant::now();

        let input_dir = &self.config.input_dir;
        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::Config(format!(
                "Input directory does not exist: {:?}",
                input_dir
            )));
        }
        FileManager::ensure_dir(&self.config.output_dir)?;

        let input_files = FileManager::find_files(input_dir, "csv")?;
        let mut stats = RunStatistics::default();
        if input_files.is_empty() {
            warn!("No CSV files found in {:?}", input_dir);
            stats.elapsed = start_time.elapsed();
            return Ok(stats);
        }

        info!(
            "Translating {} file(s) to '{}' using {} ({} mode)",
            input_files.len(),
            self.config.target_language,
            self.config.translation.provider.display_name(),
            self.config.mode
        );

        let profile = ModeProfile::for_mode(self.config.mode);
        let cache = Arc::new(TranslationCache::load(
            self.config.output_dir.join(CACHE_FILE_NAME),
        ));
        let pool = Arc::new(TranslatorPool::for_config(&self.config, profile.pool_size)?);
        let pipeline = FilePipeline::new(
            pool,
            Arc::clone(&cache),
            profile,
            self.config.max_retries,
            self.config.min_text_length,
            self.config.target_language.clone(),
        );

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(input_files.len() as u64));
        folder_pb.set_style(progress_style("files"));
        folder_pb.set_message("Processing files");

        for input_file in &input_files {
            let file_name = input_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_path = self.output_path_for(input_file, input_dir);

            // Length is unknown until the file is classified; the callback
            // sets it on the first tick
            let file_pb = multi_progress.add(ProgressBar::new(0));
            file_pb.set_style(progress_style("lines"));
            let pb = file_pb.clone();

            let result = pipeline
                .process_file(input_file, &output_path, move |completed, total| {
                    pb.set_length(total as u64);
                    pb.set_position(completed as u64);
                })
                .await;
            file_pb.finish_and_clear();

            match result {
                Ok(report) => {
                    stats.merge_file(&report);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    error!("Failed to process {:?}: {}", input_file, e);
                    stats.files_failed += 1;
                }
            }

            // Flush after every file so an interrupted run keeps its progress
            if let Err(e) = cache.flush() {
                warn!("{}", e);
            }

            folder_pb.inc(1);
        }
        folder_pb.finish_and_clear();

        stats.elapsed = start_time.elapsed();
        self.write_run_summary(&stats);
        Ok(stats)
    }

    /// Mirror the input file's position relative to the input directory.
    fn output_path_for(&self, input_file: &Path, input_dir: &Path) -> PathBuf {
        let relative = input_file.strip_prefix(input_dir).unwrap_or_else(|_| {
            Path::new(input_file.file_name().unwrap_or(input_file.as_os_str()))
        });
        self.config.output_dir.join(relative)
    }

    fn write_run_summary(&self, stats: &RunStatistics) {
        let summary = stats.summary();
        info!("Run complete.\n{}", summary);

        let log_path = self.config.output_dir.join(RUN_LOG_FILE_NAME);
        let context = format!(
            "{} -> {} ({} mode)\n{}",
            self.config.translation.provider.display_name(),
            self.config.target_language,
            self.config.mode,
            summary
        );
        if let Err(e) = FileManager::append_to_log_file(&log_path, &context) {
            warn!("Failed to write run log: {}", e);
        }
    }
}

/// Progress styling shared by the folder and file bars.
fn progress_style(unit: &str) -> ProgressStyle {
    let template = format!(
        "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}} {{eta}}",
        unit
    );
    ProgressStyle::default_bar()
        .template(&template)
        .or_else(|_| {
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
        })
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░")
}
