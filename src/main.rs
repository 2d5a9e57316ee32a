// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::{Config, LogLevel, TranslationMode, TranslationProvider};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod csv_processor;
mod errors;
mod file_pipeline;
mod file_utils;
mod language_utils;
mod providers;
mod stats;
mod translation;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Libre,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Libre => TranslationProvider::Libre,
        }
    }
}

/// CLI Wrapper for TranslationMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationMode {
    Standard,
    Turbo,
}

impl From<CliTranslationMode> for TranslationMode {
    fn from(cli_mode: CliTranslationMode) -> Self {
        match cli_mode {
            CliTranslationMode::Standard => TranslationMode::Standard,
            CliTranslationMode::Turbo => TranslationMode::Turbo,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn to_level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

/// loctran - Localization CSV Translator
///
/// Batch-translates pipe-delimited `key|text` localization files using
/// external machine-translation services (Google Translate, LibreTranslate).
#[derive(Parser, Debug)]
#[command(name = "loctran")]
#[command(version = "0.1.0")]
#[command(about = "Batch translator for game localization CSV files")]
#[command(long_about = "loctran translates pipe-delimited key|text localization files.

EXAMPLES:
    loctran                                  # Translate using default config
    loctran -i strings/ -o translated/       # Explicit input and output dirs
    loctran -t fr                            # Translate to French
    loctran -p libre --mode turbo            # LibreTranslate at maximum speed
    loctran --log-level debug                # Verbose logging

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.

SUPPORTED PROVIDERS:
    google - Unofficial Google Translate web endpoint (no API key)
    libre  - LibreTranslate server (API key optional)")]
struct CommandLineOptions {
    /// Directory containing the input CSV files
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory receiving translated files, the cache and the run log
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Target language code (e.g. 'pt', 'fr', 'es')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Throughput preset
    #[arg(short, long, value_enum)]
    mode: Option<CliTranslationMode>,

    /// Maximum attempts for a rate-limited translation
    #[arg(long)]
    max_retries: Option<u32>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let config_level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_level));
    }

    // Load or create configuration, then apply CLI overrides
    let mut config = Config::load_or_create(&cli.config_path)
        .with_context(|| format!("Failed to load config from '{}'", cli.config_path))?;

    if let Some(input_dir) = cli.input_dir {
        config.input_dir = input_dir;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(target_language) = cli.target_language {
        config.target_language = target_language;
    }
    if let Some(provider) = cli.provider {
        config.translation.provider = provider.into();
    }
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    if let Some(max_retries) = cli.max_retries {
        config.max_retries = max_retries;
    }
    if let Some(log_level) = cli.log_level.clone() {
        config.log_level = log_level.into();
    } else {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config).map_err(|e| anyhow!("{}", e))?;
    let stats = controller.run().await.map_err(|e| anyhow!("{}", e))?;

    if stats.files_failed > 0 {
        info!(
            "Finished with {} file(s) failed out of {}",
            stats.files_failed,
            stats.files_failed + stats.files_processed
        );
    }

    Ok(())
}
