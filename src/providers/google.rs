use async_trait::async_trait;
use log::error;
use reqwest::Client;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::TranslationClient;

/// Client for the unofficial Google translate endpoint.
///
/// Each instance owns its own HTTP client, so a pool of these spreads
/// request volume across independent connection contexts.
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Endpoint base URL
    endpoint: String,
    /// Per-call timeout in seconds
    timeout_secs: u64,
}

impl GoogleTranslate {
    /// Create a new client against the given endpoint.
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: if endpoint.is_empty() {
                "https://translate.googleapis.com".to_string()
            } else {
                endpoint
            },
            timeout_secs,
        }
    }

    /// Extract the translated text from the endpoint's nested-array response.
    ///
    /// The body looks like `[[["translated","source",..],..],..]`: the first
    /// element is a list of segments whose first element is the translated
    /// piece.
    fn extract_translation(value: &serde_json::Value) -> Result<String, ProviderError> {
        let segments = value
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| ProviderError::ParseError("missing segment array".to_string()))?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(|v| v.as_str()) {
                translated.push_str(part);
            }
        }

        if translated.is_empty() {
            return Err(ProviderError::ParseError(
                "response contained no translated text".to_string(),
            ));
        }

        Ok(translated)
    }
}

#[async_trait]
impl TranslationClient for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let url = format!(
            "{}/translate_a/single",
            self.endpoint.trim_end_matches('/')
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source_language),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_secs)
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited(format!(
                "endpoint returned {}",
                status
            )));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google endpoint error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Self::extract_translation(&value)
    }
}
