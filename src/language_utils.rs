use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities: ISO code handling and best-effort detection
///
/// This module provides functions for validating and matching ISO 639-1
/// (2-letter) and ISO 639-3 (3-letter) language codes, plus the language
/// detector that decides whether a line needs translation at all.
/// Validate if a language code is a valid ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<()> {
    parse_language(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let lang =
        parse_language(code).ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;
    Ok(lang.to_name().to_string())
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (parse_language(code1), parse_language(code2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn parse_language(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();
    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    }
}

/// Result of classifying a text's source language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Reliable detection; carries an ISO 639-1 code where one exists,
    /// otherwise the ISO 639-3 code
    Detected(String),

    /// Input shorter than the configured minimum; the line passes through
    /// untranslated
    TooShort,

    /// Detection failed or was unreliable; callers translate anyway
    /// (fail open, never silently drop content)
    Unknown,
}

/// Best-effort source language classifier.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    /// Minimum trimmed length (in characters) worth classifying
    min_text_length: usize,
}

impl LanguageDetector {
    /// Create a detector with the given minimum text length.
    pub fn new(min_text_length: usize) -> Self {
        Self { min_text_length }
    }

    /// Classify the source language of `text`.
    pub fn detect(&self, text: &str) -> Detection {
        let trimmed = text.trim();
        if trimmed.chars().count() < self.min_text_length {
            return Detection::TooShort;
        }

        match whatlang::detect(trimmed) {
            Some(info) if info.is_reliable() => match to_short_code(info.lang()) {
                Some(code) => Detection::Detected(code),
                None => Detection::Unknown,
            },
            _ => Detection::Unknown,
        }
    }
}

/// Map a whatlang language to its shortest ISO code.
fn to_short_code(lang: whatlang::Lang) -> Option<String> {
    let iso = Language::from_639_3(lang.code())?;
    match iso.to_639_1() {
        Some(part1) => Some(part1.to_string()),
        None => Some(iso.to_639_3().to_string()),
    }
}
