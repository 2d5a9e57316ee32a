/*!
 * Tests for the concurrent batch dispatcher
 */

use std::sync::Arc;

use loctran::app_config::TranslationMode;
use loctran::csv_processor::CsvLine;
use loctran::providers::TranslationClient;
use loctran::providers::mock::MockTranslator;
use loctran::translation::batch::{BatchDispatcher, TranslationJob};
use loctran::translation::{ModeProfile, TranslationCache, TranslatorPool};

use crate::common;

fn jobs_from(texts: &[&str]) -> Vec<TranslationJob> {
    texts
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            TranslationJob::new(CsvLine {
                key: format!("key_{}", idx),
                text: text.to_string(),
                original_index: idx,
            })
        })
        .collect()
}

fn dispatcher_with(
    translator: &MockTranslator,
    max_retries: u32,
    cache: Arc<TranslationCache>,
) -> BatchDispatcher {
    let clients: Vec<Arc<dyn TranslationClient>> = (0..4)
        .map(|_| Arc::new(translator.clone()) as Arc<dyn TranslationClient>)
        .collect();
    let pool = Arc::new(TranslatorPool::from_clients(clients).unwrap());
    BatchDispatcher::new(
        pool,
        cache,
        ModeProfile::for_mode(TranslationMode::Standard),
        max_retries,
        "pt",
    )
}

#[tokio::test(start_paused = true)]
async fn test_dispatch_withMoreJobsThanOneBatch_shouldPreserveInputOrder() {
    let temp_dir = common::create_temp_dir().unwrap();
    let cache = Arc::new(TranslationCache::load(temp_dir.path().join("cache.json")));
    let translator = MockTranslator::working();
    let dispatcher = dispatcher_with(&translator, 3, cache);

    // Three full batches plus a remainder in standard mode
    let texts: Vec<String> = (0..65).map(|i| format!("some sentence number {}", i)).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();

    let resolved = dispatcher.dispatch(jobs_from(&refs), |_, _| {}).await;

    assert_eq!(resolved.len(), 65);
    for (idx, job) in resolved.iter().enumerate() {
        assert_eq!(job.line.original_index, idx);
        assert!(job.is_done());
    }
}

#[tokio::test(start_paused = true)]
async fn test_dispatch_rateLimitedJob_shouldUseExactlyMaxRetriesAttempts() {
    let temp_dir = common::create_temp_dir().unwrap();
    let cache = Arc::new(TranslationCache::load(temp_dir.path().join("cache.json")));
    let translator = MockTranslator::rate_limited();
    let dispatcher = dispatcher_with(&translator, 4, cache);

    let resolved = dispatcher
        .dispatch(jobs_from(&["Une phrase qui sera limitée."]), |_, _| {})
        .await;

    assert!(resolved[0].is_failed());
    assert_eq!(resolved[0].attempt, 4);
    assert_eq!(translator.call_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_dispatch_recoveredJob_shouldNotCountAsError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let cache = Arc::new(TranslationCache::load(temp_dir.path().join("cache.json")));
    let translator = MockTranslator::rate_limited_first(1);
    let dispatcher = dispatcher_with(&translator, 3, cache);

    let resolved = dispatcher
        .dispatch(jobs_from(&["Une phrase transitoirement limitée."]), |_, _| {})
        .await;

    assert!(resolved[0].is_done());
    assert_eq!(resolved[0].attempt, 2);
}

#[tokio::test(start_paused = true)]
async fn test_dispatch_timedOutJob_shouldFailInOneAttemptKeepingOriginalText() {
    let temp_dir = common::create_temp_dir().unwrap();
    let cache = Arc::new(TranslationCache::load(temp_dir.path().join("cache.json")));
    let translator = MockTranslator::timing_out(30);
    let dispatcher = dispatcher_with(&translator, 3, cache);

    let resolved = dispatcher
        .dispatch(jobs_from(&["Une phrase qui prend trop de temps."]), |_, _| {})
        .await;

    // Timeouts are not throttling, so the job fails without retry
    assert!(resolved[0].is_failed());
    assert_eq!(resolved[0].attempt, 1);
    assert_eq!(translator.call_count(), 1);
    assert_eq!(
        resolved[0].output_text(),
        "Une phrase qui prend trop de temps."
    );
}

#[tokio::test(start_paused = true)]
async fn test_dispatch_shouldProtectFormatVariablesAcrossProviderCalls() {
    let temp_dir = common::create_temp_dir().unwrap();
    let cache = Arc::new(TranslationCache::load(temp_dir.path().join("cache.json")));
    let translator = MockTranslator::working();
    let dispatcher = dispatcher_with(&translator, 3, cache);

    let resolved = dispatcher
        .dispatch(
            jobs_from(&["Bonjour, {playername}. Vous devez {reg4} deniers."]),
            |_, _| {},
        )
        .await;

    assert!(resolved[0].is_done());
    assert_eq!(resolved[0].protected_variables, 2);
    // The markup survives the provider round trip verbatim
    let output = resolved[0].output_text();
    assert!(output.contains("{playername}"));
    assert!(output.contains("{reg4}"));
}

#[tokio::test(start_paused = true)]
async fn test_dispatch_partialFailures_shouldResolveEveryJobTerminally() {
    let temp_dir = common::create_temp_dir().unwrap();
    let cache = Arc::new(TranslationCache::load(temp_dir.path().join("cache.json")));
    let translator = MockTranslator::intermittent(4);
    let dispatcher = dispatcher_with(&translator, 3, cache);

    let texts: Vec<String> = (0..12).map(|i| format!("phrase numéro {}", i)).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let resolved = dispatcher.dispatch(jobs_from(&refs), |_, _| {}).await;

    assert_eq!(resolved.len(), 12);
    assert!(resolved.iter().all(|job| job.is_done() || job.is_failed()));
    assert_eq!(resolved.iter().filter(|job| job.is_failed()).count(), 3);
}
