/*!
 * Provider implementations for machine-translation services.
 *
 * This module contains client implementations for the supported backends:
 * - Google: unofficial public translate endpoint
 * - Libre: self-hosted or public LibreTranslate server
 * - Mock: deterministic in-memory provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing the pool to rotate over them interchangeably and tests
/// to inject deterministic fakes.
#[async_trait]
pub trait TranslationClient: Send + Sync + Debug {
    /// Translate `text` into `target_language`.
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `source_language` - ISO code of the source, or "auto" for provider-side detection
    /// * `target_language` - ISO code of the target
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error;
    ///   throttling is reported as [`ProviderError::RateLimited`] so callers
    ///   can back off specifically
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;
}

pub mod google;
pub mod libre;
pub mod mock;
