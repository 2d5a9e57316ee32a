/*!
 * End-to-end tests for the per-file translation pipeline
 */

use loctran::providers::mock::MockTranslator;

use crate::common;

#[tokio::test(start_paused = true)]
async fn test_pipeline_endToEnd_shouldTranslateKnownDialogLine() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "dialogs.csv",
        "dlga_do_lady_options:lady_end_talk.3|Nous parlerons plus tard.\n",
    )
    .unwrap();
    let output = temp_dir.path().join("out").join("dialogs.csv");

    let translator = MockTranslator::working()
        .with_response("Nous parlerons plus tard.", "Falaremos mais tarde.");
    let pipeline = common::create_mock_pipeline(translator, &temp_dir);

    let report = pipeline.process_file(&input, &output, |_, _| {}).await.unwrap();
    assert_eq!(report.lines_translated, 1);
    assert_eq!(report.errors, 0);

    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        content,
        "dlga_do_lady_options:lady_end_talk.3|Falaremos mais tarde.\n"
    );
}

#[tokio::test(start_paused = true)]
async fn test_pipeline_withMixedFile_shouldKeepEveryLineInPlace() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_csv(&temp_dir.path().to_path_buf(), "dialogs.csv").unwrap();
    let output = temp_dir.path().join("dialogs_out.csv");

    let pipeline = common::create_mock_pipeline(MockTranslator::working(), &temp_dir);
    let report = pipeline.process_file(&input, &output, |_, _| {}).await.unwrap();

    assert_eq!(report.lines_total, 4);
    // Numeric payloads never reach the provider
    assert!(report.lines_skipped >= 1);

    let input_content = std::fs::read_to_string(&input).unwrap();
    let output_content = std::fs::read_to_string(&output).unwrap();
    let input_keys: Vec<&str> = input_content
        .lines()
        .map(|line| line.split('|').next().unwrap())
        .collect();
    let output_keys: Vec<&str> = output_content
        .lines()
        .map(|line| line.split('|').next().unwrap())
        .collect();
    assert_eq!(input_keys, output_keys);
}

#[tokio::test(start_paused = true)]
async fn test_pipeline_rerunWithWarmCache_shouldMakeNoProviderCalls() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "dialogs.csv",
        "a|Nous parlerons plus tard.\nb|Je voudrais acheter du pain demain.\n",
    )
    .unwrap();
    let output = temp_dir.path().join("out.csv");

    let translator = MockTranslator::working();
    let counter = translator.clone();
    let pipeline = common::create_mock_pipeline(translator, &temp_dir);

    let first = pipeline.process_file(&input, &output, |_, _| {}).await.unwrap();
    assert_eq!(first.lines_translated, 2);
    let first_output = std::fs::read_to_string(&output).unwrap();
    let calls_after_first = counter.call_count();

    let second = pipeline.process_file(&input, &output, |_, _| {}).await.unwrap();
    assert_eq!(second.cache_hits, 2);
    assert_eq!(second.lines_translated, 0);
    assert_eq!(counter.call_count(), calls_after_first);

    // Idempotent: the rerun reproduces the same output
    assert_eq!(std::fs::read_to_string(&output).unwrap(), first_output);
}

#[tokio::test(start_paused = true)]
async fn test_pipeline_withMalformedLines_shouldPassThemThroughVerbatim() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "broken.csv",
        "a|Nous parlerons plus tard.\nthis line has no delimiter at all\nb|Je voudrais du pain.\n",
    )
    .unwrap();
    let output = temp_dir.path().join("broken_out.csv");

    let pipeline = common::create_mock_pipeline(MockTranslator::working(), &temp_dir);
    let report = pipeline.process_file(&input, &output, |_, _| {}).await.unwrap();

    assert_eq!(report.malformed_lines, 1);
    let lines: Vec<String> = std::fs::read_to_string(&output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "this line has no delimiter at all");
}

#[tokio::test(start_paused = true)]
async fn test_pipeline_withAlwaysFailingProvider_shouldKeepOriginalsAndCountErrors() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "dialogs.csv",
        "a|Nous parlerons plus tard.\nb|Je voudrais acheter du pain.\n",
    )
    .unwrap();
    let output = temp_dir.path().join("out.csv");

    let pipeline = common::create_mock_pipeline(MockTranslator::failing(), &temp_dir);
    let report = pipeline.process_file(&input, &output, |_, _| {}).await.unwrap();

    assert_eq!(report.errors, 2);
    assert_eq!(report.lines_translated, 0);

    // Output still contains every line, with original text preserved
    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        content,
        "a|Nous parlerons plus tard.\nb|Je voudrais acheter du pain.\n"
    );
}

#[tokio::test(start_paused = true)]
async fn test_pipeline_withRateLimitRecovery_shouldCompleteAllLines() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "dialogs.csv",
        "a|Nous parlerons plus tard.\nb|Je voudrais acheter du pain.\nc|Il fait beau aujourd'hui.\n",
    )
    .unwrap();
    let output = temp_dir.path().join("out.csv");

    // First two calls are throttled, then the provider recovers
    let pipeline =
        common::create_mock_pipeline(MockTranslator::rate_limited_first(2), &temp_dir);
    let report = pipeline.process_file(&input, &output, |_, _| {}).await.unwrap();

    assert_eq!(report.lines_translated, 3);
    assert_eq!(report.errors, 0);
}
