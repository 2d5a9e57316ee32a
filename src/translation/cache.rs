/*!
 * Persistent translation caching.
 *
 * The cache maps a content hash of (trimmed source text, target language) to
 * the translated text, avoiding provider calls for text already translated in
 * this or any previous run. The whole map is loaded at startup and flushed
 * atomically at checkpoints; entries are never deleted automatically.
 */

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::errors::CacheError;

/// One cached translation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheEntry {
    /// The translated text
    pub translated_text: String,

    /// Unix timestamp of the last write; last writer wins
    pub timestamp: i64,
}

/// Persistent translation cache.
pub struct TranslationCache {
    /// On-disk location
    path: PathBuf,

    /// In-memory entries keyed by content hash
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl TranslationCache {
    /// Load the cache from disk, starting empty when the file is missing or
    /// unreadable (a read failure is a warning, never fatal).
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => {
                if !entries.is_empty() {
                    debug!("Loaded {} cached translations from {:?}", entries.len(), path);
                }
                entries
            }
            Err(e) => {
                warn!("{} - starting with an empty cache", e);
                HashMap::new()
            }
        };

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn read_entries(path: &Path) -> Result<HashMap<String, CacheEntry>, CacheError> {
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| CacheError::Read(format!("{:?}: {}", path, e)))?;
        serde_json::from_str(&content).map_err(|e| CacheError::Read(format!("{:?}: {}", path, e)))
    }

    /// Stable hex key for (trimmed text, target language).
    fn cache_key(text: &str, target_language: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(target_language.as_bytes());
        hasher.update(b":");
        hasher.update(text.trim().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Get a cached translation. Text is trimmed before hashing so
    /// near-identical duplicate lines share an entry.
    pub fn get(&self, text: &str, target_language: &str) -> Option<String> {
        let key = Self::cache_key(text, target_language);
        self.entries
            .read()
            .get(&key)
            .map(|entry| entry.translated_text.clone())
    }

    /// Store a translation; an existing entry for the same key is replaced.
    pub fn put(&self, text: &str, target_language: &str, translated: &str) {
        let key = Self::cache_key(text, target_language);
        let entry = CacheEntry {
            translated_text: translated.to_string(),
            timestamp: Utc::now().timestamp(),
        };
        self.entries.write().insert(key, entry);
    }

    /// Atomically persist the cache to disk (write-to-temp-then-rename).
    ///
    /// Idempotent and safe to call repeatedly. A write failure is retried
    /// once; afterwards the in-memory cache keeps serving the rest of the run.
    pub fn flush(&self) -> Result<(), CacheError> {
        let serialized = {
            let entries = self.entries.read();
            serde_json::to_string_pretty(&*entries)
                .map_err(|e| CacheError::Write(e.to_string()))?
        };

        match self.write_atomic(&serialized) {
            Ok(()) => Ok(()),
            Err(first) => {
                warn!("{} - retrying once", first);
                self.write_atomic(&serialized).map_err(|_| first)
            }
        }
    }

    fn write_atomic(&self, content: &str) -> Result<(), CacheError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| CacheError::Write(e.to_string()))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| CacheError::Write(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| CacheError::Write(e.to_string()))?;
        Ok(())
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
