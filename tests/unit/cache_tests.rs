/*!
 * Tests for the persistent translation cache
 */

use loctran::translation::TranslationCache;

use crate::common;

#[test]
fn test_cache_acrossInstances_shouldPersistEntries() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("cache.json");

    {
        let cache = TranslationCache::load(&path);
        cache.put("Nous parlerons plus tard.", "pt", "Falaremos mais tarde.");
        cache.put("Bonjour", "pt", "Bom dia");
        cache.flush().unwrap();
    }

    let cache = TranslationCache::load(&path);
    assert_eq!(cache.len(), 2);
    assert_eq!(
        cache.get("Nous parlerons plus tard.", "pt"),
        Some("Falaremos mais tarde.".to_string())
    );
}

#[test]
fn test_cache_keying_shouldSeparateTargetLanguages() {
    let temp_dir = common::create_temp_dir().unwrap();
    let cache = TranslationCache::load(temp_dir.path().join("cache.json"));

    cache.put("Bonjour", "pt", "Bom dia");
    cache.put("Bonjour", "es", "Buenos días");

    assert_eq!(cache.get("Bonjour", "pt"), Some("Bom dia".to_string()));
    assert_eq!(cache.get("Bonjour", "es"), Some("Buenos días".to_string()));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_cache_lookup_shouldIgnoreSurroundingWhitespace() {
    let temp_dir = common::create_temp_dir().unwrap();
    let cache = TranslationCache::load(temp_dir.path().join("cache.json"));

    cache.put("  Bonjour  ", "pt", "Bom dia");
    assert_eq!(cache.get("Bonjour", "pt"), Some("Bom dia".to_string()));
}

#[test]
fn test_cache_withUnreadableFile_shouldStartEmptyWithoutPanic() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("cache.json");
    std::fs::write(&path, "][ definitely not json").unwrap();

    let cache = TranslationCache::load(&path);
    assert!(cache.is_empty());

    // The cache is still usable and can overwrite the corrupt file
    cache.put("Bonjour", "pt", "Bom dia");
    cache.flush().unwrap();
    assert_eq!(TranslationCache::load(&path).len(), 1);
}
