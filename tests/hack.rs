use cyprium::config::Settings;
use cyprium::language::{LanguageProfile, LanguageProvider, Languages};
use cyprium::vigenere::{self, analysis, Algorithm, HackHints};
use cyprium::{CypriumError, Result};

const SAMPLE: &str = include_str!("data/english.txt");

/// Provider holding English only
struct EnglishOnly(LanguageProfile);

impl LanguageProvider for EnglishOnly {
    fn get_profile(&self, code: &str) -> Result<&LanguageProfile> {
        if code.eq_ignore_ascii_case("en") {
            Ok(&self.0)
        } else {
            Err(CypriumError::LanguageNotFound(code.to_string()))
        }
    }

    fn list_languages(&self) -> Vec<&str> {
        vec!["en"]
    }
}

fn english_only() -> EnglishOnly {
    let builtin = Languages::builtin();
    EnglishOnly(builtin.get_profile("en").unwrap().clone())
}

#[test]
fn estimate_then_recover_with_custom_provider() {
    let cyphered = vigenere::cypher(SAMPLE, "LEMON", Algorithm::Vigenere, false).unwrap();
    let provider = english_only();
    let outcome = vigenere::hack(
        &cyphered,
        Algorithm::Vigenere,
        &HackHints::Nothing,
        &provider,
        &Settings::default(),
    )
    .unwrap();
    assert_eq!(outcome.key.to_string(), "LEMON");
    assert_eq!(outcome.language.as_deref(), Some("en"));
}

#[test]
fn every_variant_is_broken_with_length_and_language() {
    let cases = [
        (Algorithm::Vigenere, "LEMON"),
        (Algorithm::Beaufort, "FORTIFY"),
        (Algorithm::Gronsfeld, "31415"),
        (Algorithm::Autoclave, "KEY"),
    ];
    for (algorithm, key) in cases {
        let cyphered = vigenere::cypher(SAMPLE, key, algorithm, true).unwrap();
        let hints = HackHints::LengthAndLanguage {
            length: key.len(),
            language: "en".into(),
        };
        let outcome = vigenere::hack(
            &cyphered,
            algorithm,
            &hints,
            &Languages::builtin(),
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(outcome.key.to_string(), key, "{}", algorithm);
        assert_eq!(outcome.plaintext, SAMPLE.to_uppercase());
    }
}

#[test]
fn estimator_ranks_key_length_in_top_three() {
    let cyphered = vigenere::cypher(&SAMPLE[..600], "LEMON", Algorithm::Vigenere, false).unwrap();
    let symbols: Vec<u8> = cyphered.bytes().filter(|b| b.is_ascii_uppercase()).map(|b| b - b'A').collect();
    assert!(symbols.len() >= 450);
    let ranked = analysis::estimate_length(&symbols, english_only().0.expected_ic(), 20);
    assert!(ranked.iter().take(3).any(|c| c.length == 5), "{:?}", ranked);
}

#[test]
fn strict_threshold_rejects_weak_keys() {
    let cyphered = vigenere::cypher(&SAMPLE[..200], "LEMON", Algorithm::Vigenere, true).unwrap();
    let settings = Settings {
        min_confidence: 1.0,
        ..Default::default()
    };
    let err = vigenere::hack(
        &cyphered,
        Algorithm::Vigenere,
        &HackHints::Length(5),
        &Languages::builtin(),
        &settings,
    )
    .unwrap_err();
    assert!(matches!(err, CypriumError::KeyRecoveryFailed(_)));
}
