use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::TranslationClient;

/// Client for a LibreTranslate server.
#[derive(Debug)]
pub struct LibreTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Server base URL
    endpoint: String,
    /// API key, empty when the server does not require one
    api_key: String,
    /// Per-call timeout in seconds
    timeout_secs: u64,
}

/// LibreTranslate request body
#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    /// The text to translate
    q: &'a str,

    /// Source language code, or "auto"
    source: &'a str,

    /// Target language code
    target: &'a str,

    /// Plain-text mode; localization strings carry no HTML
    format: &'static str,

    /// API key when the server requires one
    #[serde(skip_serializing_if = "str::is_empty")]
    api_key: &'a str,
}

/// LibreTranslate response body
#[derive(Debug, Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl LibreTranslate {
    /// Create a new client against the given server.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: if endpoint.is_empty() {
                "http://localhost:5000".to_string()
            } else {
                endpoint
            },
            api_key: api_key.into(),
            timeout_secs,
        }
    }
}

#[async_trait]
impl TranslationClient for LibreTranslate {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/translate", self.endpoint.trim_end_matches('/'));

        let request = LibreRequest {
            q: text,
            source: source_language,
            target: target_language,
            format: "text",
            api_key: &self.api_key,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
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
                "server returned {}",
                status
            )));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("LibreTranslate error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .json::<LibreResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(body.translated_text)
    }
}
