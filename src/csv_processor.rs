/*!
 * Localization CSV handling.
 *
 * Game localization files are line-oriented: one record per line in the form
 * `key|text`. Only the first `|` is significant; the text side may contain
 * further pipes. Keys are stable identifiers and are never translated.
 */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::errors::MalformedLine;
use crate::file_utils::FileManager;

/// A single key/text record from a localization CSV file.
///
/// `original_index` is the zero-based line number in the source file and is
/// preserved all the way through to output assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLine {
    /// Stable identifier, never translated
    pub key: String,

    /// Translatable payload, may be empty
    pub text: String,

    /// Zero-based position in the source file
    pub original_index: usize,
}

impl CsvLine {
    /// Render the line back to its on-disk `key|text` form.
    pub fn render(&self) -> String {
        format!("{}|{}", self.key, self.text)
    }

    /// Render with a replacement text, keeping the key untouched.
    pub fn render_with_text(&self, text: &str) -> String {
        format!("{}|{}", self.key, text)
    }
}

/// Outcome of parsing one raw input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// A well-formed `key|text` record
    Record(CsvLine),

    /// A line without a usable delimiter, kept verbatim in the output
    Passthrough {
        /// The raw line, trailing newline/CR stripped
        raw: String,
        /// Zero-based position in the source file
        original_index: usize,
    },
}

impl ParsedLine {
    /// Original position of this line in the source file.
    pub fn original_index(&self) -> usize {
        match self {
            ParsedLine::Record(line) => line.original_index,
            ParsedLine::Passthrough { original_index, .. } => *original_index,
        }
    }
}

/// An in-memory localization CSV file.
#[derive(Debug, Clone)]
pub struct CsvDocument {
    /// Path this document was read from
    pub source_file: PathBuf,

    /// All lines in original order
    pub lines: Vec<ParsedLine>,
}

impl CsvDocument {
    /// Parse a single raw line.
    ///
    /// Splits on the first `|` only, so pipes in the text survive. Trailing
    /// newline and carriage-return characters are stripped first. A line
    /// without a delimiter, or with an empty key side, is malformed.
    pub fn parse_line(raw: &str, original_index: usize) -> Result<CsvLine, MalformedLine> {
        let trimmed = raw.trim_end_matches(['\r', '\n']);

        match trimmed.split_once('|') {
            Some((key, text)) if !key.is_empty() => Ok(CsvLine {
                key: key.to_string(),
                text: text.to_string(),
                original_index,
            }),
            _ => Err(MalformedLine(trimmed.to_string())),
        }
    }

    /// Parse complete file content into a document.
    ///
    /// Malformed lines become [`ParsedLine::Passthrough`] entries; parsing
    /// never fails for an individual line.
    pub fn parse_string(content: &str, source_file: impl Into<PathBuf>) -> Self {
        let lines = content
            .lines()
            .enumerate()
            .map(|(idx, raw)| match Self::parse_line(raw, idx) {
                Ok(line) => ParsedLine::Record(line),
                Err(MalformedLine(raw)) => ParsedLine::Passthrough {
                    raw,
                    original_index: idx,
                },
            })
            .collect();

        Self {
            source_file: source_file.into(),
            lines,
        }
    }

    /// Read and parse a file from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = FileManager::read_to_string(path)
            .with_context(|| format!("Failed to read CSV file: {:?}", path))?;
        Ok(Self::parse_string(&content, path))
    }

    /// Number of lines in the document.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Count of lines that failed to parse, excluding blank lines.
    pub fn malformed_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| match line {
                ParsedLine::Passthrough { raw, .. } => !raw.trim().is_empty(),
                ParsedLine::Record(_) => false,
            })
            .count()
    }
}

/// Join rendered output lines into file content with a trailing newline.
pub fn render_output(lines: &[String]) -> String {
    let mut content = lines.join("\n");
    content.push('\n');
    content
}
