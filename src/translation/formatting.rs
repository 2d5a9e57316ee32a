/*!
 * Format-variable protection.
 *
 * Game localization strings carry markup the provider must not touch:
 * `{s1}`, `{reg63? Sir: Madam}`, `{playername}`, `{/...}` and `^^`. Before a
 * provider call these tokens are swapped for opaque placeholders, and swapped
 * back afterwards. A translation that loses a placeholder is rejected so the
 * original text is kept instead of shipping broken markup.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

// Ordered most-specific first so conditionals are not consumed by the
// generic brace pattern.
static PROTECTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Conditional variables: {reg63? Sir: Madam}
        Regex::new(r"\{[^{}]*\?[^{}]*:[^{}]*\}").expect("invalid conditional pattern"),
        // Closing variables: {/s}
        Regex::new(r"\{/[^{}]*\}").expect("invalid closing pattern"),
        // Any other brace variable: {s1}, {reg4}, {playername}
        Regex::new(r"\{[^{}]+\}").expect("invalid variable pattern"),
        // Forced line break
        Regex::new(r"\^\^").expect("invalid caret pattern"),
    ]
});

/// A translation came back without all of its protected tokens.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{missing} protected variable(s) lost in translation")]
pub struct RestoreError {
    /// Count of placeholders missing from the provider output
    pub missing: usize,
}

/// Text prepared for a provider call.
#[derive(Debug, Clone)]
pub struct ProtectedText {
    /// The text with markup replaced by placeholders
    pub text: String,

    /// Placeholder to original token, in substitution order
    replacements: Vec<(String, String)>,
}

impl ProtectedText {
    /// Number of tokens protected in this text.
    pub fn variable_count(&self) -> usize {
        self.replacements.len()
    }
}

/// Protects format variables across provider calls.
pub struct VariableProtector;

impl VariableProtector {
    /// Replace every markup token with an opaque placeholder.
    ///
    /// Placeholders use bracket glyphs providers pass through verbatim.
    pub fn protect(text: &str) -> ProtectedText {
        let mut out = text.to_string();
        let mut replacements = Vec::new();

        for pattern in PROTECTION_PATTERNS.iter() {
            while let Some((range, token)) = pattern
                .find(&out)
                .map(|m| (m.range(), m.as_str().to_string()))
            {
                let placeholder = format!("\u{27e6}{}\u{27e7}", replacements.len());
                replacements.push((placeholder.clone(), token));
                out.replace_range(range, &placeholder);
            }
        }

        ProtectedText {
            text: out,
            replacements,
        }
    }

    /// Swap placeholders back for their original tokens.
    ///
    /// Fails when the provider dropped or mangled a placeholder; callers keep
    /// the original text in that case.
    pub fn restore(translated: &str, protected: &ProtectedText) -> Result<String, RestoreError> {
        let missing = protected
            .replacements
            .iter()
            .filter(|(placeholder, _)| !translated.contains(placeholder.as_str()))
            .count();
        if missing > 0 {
            return Err(RestoreError { missing });
        }

        let mut out = translated.to_string();
        for (placeholder, original) in &protected.replacements {
            out = out.replacen(placeholder.as_str(), original, 1);
        }

        // A leftover bracket glyph means a placeholder was duplicated or mangled
        if out.contains('\u{27e6}') {
            return Err(RestoreError { missing: 1 });
        }

        Ok(out)
    }
}
