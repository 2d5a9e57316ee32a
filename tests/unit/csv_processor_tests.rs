/*!
 * Tests for localization CSV parsing and rendering
 */

use loctran::csv_processor::{CsvDocument, ParsedLine, render_output};

use crate::common;

#[test]
fn test_parseString_withMixedContent_shouldClassifyEveryLine() {
    let content = "\
dlga_start:close.1|Nous parlerons plus tard.\n\
line without any delimiter\n\
\n\
ui_label|OK | Annuler\n";
    let doc = CsvDocument::parse_string(content, "mixed.csv");

    assert_eq!(doc.len(), 4);
    assert_eq!(doc.malformed_count(), 1);

    match &doc.lines[0] {
        ParsedLine::Record(line) => {
            assert_eq!(line.key, "dlga_start:close.1");
            assert_eq!(line.text, "Nous parlerons plus tard.");
        }
        other => panic!("expected record, got {:?}", other),
    }
    assert!(matches!(&doc.lines[1], ParsedLine::Passthrough { .. }));
    // Blank lines pass through but are not counted as malformed
    assert!(matches!(&doc.lines[2], ParsedLine::Passthrough { raw, .. } if raw.is_empty()));

    // Only the first pipe splits; the rest belongs to the text
    match &doc.lines[3] {
        ParsedLine::Record(line) => assert_eq!(line.text, "OK | Annuler"),
        other => panic!("expected record, got {:?}", other),
    }
}

#[test]
fn test_fromFile_shouldReadAndParse() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_csv(&temp_dir.path().to_path_buf(), "dialogs.csv").unwrap();

    let doc = CsvDocument::from_file(&path).unwrap();
    assert_eq!(doc.len(), 4);
    assert_eq!(doc.malformed_count(), 0);
    assert_eq!(doc.source_file, path);
}

#[test]
fn test_fromFile_withMissingFile_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let result = CsvDocument::from_file(&temp_dir.path().join("missing.csv"));
    assert!(result.is_err());
}

#[test]
fn test_renderOutput_shouldEndWithSingleTrailingNewline() {
    let rendered = render_output(&["a|one".to_string(), "b|two".to_string()]);
    assert_eq!(rendered, "a|one\nb|two\n");
}

#[test]
fn test_parseString_withCrlfContent_shouldStripCarriageReturns() {
    let doc = CsvDocument::parse_string("a|one\r\nb|two\r\n", "crlf.csv");
    match &doc.lines[0] {
        ParsedLine::Record(line) => assert_eq!(line.text, "one"),
        other => panic!("expected record, got {:?}", other),
    }
}
