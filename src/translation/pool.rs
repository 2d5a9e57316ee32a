/*!
 * Round-robin pool of provider client handles.
 *
 * The pool exists to distribute request volume across independent client
 * contexts and mitigate per-client throttling; it is not a connection pool
 * with blocking acquisition. Every handle is always available and `acquire`
 * never waits.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::app_config::{Config, TranslationProvider};
use crate::errors::AppError;
use crate::providers::TranslationClient;
use crate::providers::google::GoogleTranslate;
use crate::providers::libre::LibreTranslate;

/// A fixed set of provider clients used in rotation.
pub struct TranslatorPool {
    /// Client handles, each with its own HTTP context
    clients: Vec<Arc<dyn TranslationClient>>,

    /// Rotation counter; atomic so concurrent workers never serialize load
    /// onto a single handle
    next: AtomicUsize,
}

impl TranslatorPool {
    /// Build a pool from pre-constructed clients (tests inject mocks here).
    pub fn from_clients(clients: Vec<Arc<dyn TranslationClient>>) -> Result<Self, AppError> {
        if clients.is_empty() {
            return Err(AppError::Config(
                "Translator pool requires at least one client".to_string(),
            ));
        }
        Ok(Self {
            clients,
            next: AtomicUsize::new(0),
        })
    }

    /// Build a pool of `size` clients for the configured provider.
    pub fn for_config(config: &Config, size: usize) -> Result<Self, AppError> {
        let endpoint = config.translation.get_endpoint();
        let api_key = config.translation.get_api_key();
        let timeout_secs = config.translation.get_timeout_secs();

        let clients: Vec<Arc<dyn TranslationClient>> = (0..size.max(1))
            .map(|_| match config.translation.provider {
                TranslationProvider::Google => {
                    Arc::new(GoogleTranslate::new(endpoint.clone(), timeout_secs))
                        as Arc<dyn TranslationClient>
                }
                TranslationProvider::Libre => Arc::new(LibreTranslate::new(
                    endpoint.clone(),
                    api_key.clone(),
                    timeout_secs,
                )) as Arc<dyn TranslationClient>,
            })
            .collect();

        Self::from_clients(clients)
    }

    /// Select the next handle by round-robin.
    pub fn acquire(&self) -> Arc<dyn TranslationClient> {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.clients.len();
        Arc::clone(&self.clients[idx])
    }

    /// Number of handles in the pool.
    pub fn size(&self) -> usize {
        self.clients.len()
    }
}
