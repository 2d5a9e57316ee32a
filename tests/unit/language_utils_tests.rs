/*!
 * Tests for language code utilities and detection
 */

use loctran::language_utils::{
    Detection, LanguageDetector, get_language_name, language_codes_match, validate_language_code,
};

#[test]
fn test_validateLanguageCode_withTwoAndThreeLetterCodes_shouldSucceed() {
    assert!(validate_language_code("pt").is_ok());
    assert!(validate_language_code("por").is_ok());
    assert!(validate_language_code("FR").is_ok());
    assert!(validate_language_code("x").is_err());
    assert!(validate_language_code("french").is_err());
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("pt").unwrap(), "Portuguese");
    assert_eq!(get_language_name("fr").unwrap(), "French");
}

#[test]
fn test_languageCodesMatch_shouldTreatEquivalentCodesAsEqual() {
    assert!(language_codes_match("pt", "pt"));
    assert!(language_codes_match("pt", "por"));
    assert!(language_codes_match("POR", "pt"));
    assert!(!language_codes_match("pt", "es"));
    assert!(!language_codes_match("pt", "not_a_code"));
}

#[test]
fn test_detect_withLongFrenchSentence_shouldDetectFrench() {
    let detector = LanguageDetector::new(3);
    let detection = detector.detect(
        "Je voudrais acheter du pain et du fromage au marché demain matin avec mes amis.",
    );
    assert_eq!(detection, Detection::Detected("fr".to_string()));
}

#[test]
fn test_detect_withShortText_shouldSkipClassification() {
    let detector = LanguageDetector::new(5);
    assert_eq!(detector.detect("Oui"), Detection::TooShort);
    assert_eq!(detector.detect("   "), Detection::TooShort);
}

#[test]
fn test_detect_withMinLengthBoundary_shouldCountTrimmedCharacters() {
    let detector = LanguageDetector::new(3);
    // Exactly at the minimum is classified, one below is not
    assert_eq!(detector.detect(" ab "), Detection::TooShort);
    assert_ne!(detector.detect("abc"), Detection::TooShort);
}
