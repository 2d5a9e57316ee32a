/*!
 * Common test utilities for the loctran test suite
 */

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;

use loctran::app_config::TranslationMode;
use loctran::file_pipeline::FilePipeline;
use loctran::providers::TranslationClient;
use loctran::providers::mock::MockTranslator;
use loctran::translation::{ModeProfile, TranslationCache, TranslatorPool};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample localization CSV file for testing
pub fn create_test_csv(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "\
dlga_start:close.1|Nous parlerons plus tard.\n\
dlga_do_lady_options:lady_end_talk.3|Nous parlerons plus tard.\n\
ui_gold|1250\n\
dlga_greeting|Bonjour, {playername}. Comment allez-vous aujourd'hui ?\n";
    create_test_file(dir, filename, content)
}

/// Builds a pipeline wired to the given mock, with the cache stored in `dir`
pub fn create_mock_pipeline(translator: MockTranslator, dir: &TempDir) -> FilePipeline {
    let clients: Vec<Arc<dyn TranslationClient>> = (0..2)
        .map(|_| Arc::new(translator.clone()) as Arc<dyn TranslationClient>)
        .collect();
    let pool = Arc::new(TranslatorPool::from_clients(clients).expect("non-empty pool"));
    let cache = Arc::new(TranslationCache::load(dir.path().join("cache.json")));
    FilePipeline::new(
        pool,
        cache,
        ModeProfile::for_mode(TranslationMode::Standard),
        3,
        3,
        "pt",
    )
}
