/*!
 * Translation orchestration.
 *
 * This module contains the core machinery for translating batches of text
 * through external providers. It is split into several submodules:
 *
 * - `batch`: Concurrent batch dispatching with retry and reassembly
 * - `cache`: Persistent content-keyed translation cache
 * - `concurrency`: Mode-derived worker/batch/delay profiles
 * - `formatting`: Format-variable protection across provider calls
 * - `pool`: Round-robin pool of provider client handles
 */

// Re-export main types for easier usage
pub use self::batch::{BatchDispatcher, JobStatus, TranslationJob};
pub use self::cache::{CacheEntry, TranslationCache};
pub use self::concurrency::ModeProfile;
pub use self::formatting::{ProtectedText, RestoreError, VariableProtector};
pub use self::pool::TranslatorPool;

// Submodules
pub mod batch;
pub mod cache;
pub mod concurrency;
pub mod formatting;
pub mod pool;
