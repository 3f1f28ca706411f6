//! Ciphertext-only attack, driven by whatever the caller already knows.

use super::algorithm::{Algorithm, Direction, Key};
use super::analysis::{brute_force_lengths, estimate_length, LengthCandidate};
use super::recovery::{recover_key, recover_key_and_language, KeyGuess};
use super::transform::apply;
use crate::alphabet::{normalize, restore};
use crate::config::Settings;
use crate::error::{CypriumError, Result};
use crate::language::LanguageProvider;
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// Weight of the length estimator's doubt in the candidate score
const LENGTH_DOUBT_WEIGHT: f64 = 0.25;

/// What is known about the key before attacking
#[derive(Debug, Clone, PartialEq)]
pub enum HackHints {
    /// The key itself: plain decipherment
    Key(Key),
    LengthAndLanguage { length: usize, language: String },
    Length(usize),
    Language(String),
    Nothing,
}

/// Result of an attack
#[derive(Debug, Clone, PartialEq)]
pub struct HackOutcome {
    pub key: Key,
    /// None when the key was given
    pub language: Option<String>,
    pub plaintext: String,
    pub distance: f64,
    pub confidence: f64,
}

/// Break `ciphertext` using `hints`.
///
/// Spacing and punctuation of the ciphertext are kept in the plaintext. Fails
/// with [`CypriumError::KeyRecoveryFailed`] when the best key found stays
/// below `settings.min_confidence`.
pub fn hack(
    ciphertext: &str,
    algorithm: Algorithm,
    hints: &HackHints,
    provider: &impl LanguageProvider,
    settings: &Settings,
) -> Result<HackOutcome> {
    settings.validate()?;
    let normalized = normalize(ciphertext, true)?;
    let symbols = normalized.symbols;
    if symbols.is_empty() {
        return Err(CypriumError::EmptyText);
    }

    let guess = match hints {
        HackHints::Key(key) => {
            let plain = apply(&symbols, key, algorithm, Direction::Decipher)?;
            return Ok(HackOutcome {
                key: key.clone(),
                language: None,
                plaintext: restore(&plain, &normalized.restore)?,
                distance: 0.0,
                confidence: 1.0,
            });
        }
        HackHints::LengthAndLanguage { length, language } => {
            let profile = provider.get_profile(language)?;
            recover_key(&symbols, *length, algorithm, profile)?
        }
        HackHints::Length(length) => {
            recover_key_and_language(&symbols, *length, algorithm, provider)?
        }
        HackHints::Language(language) => {
            let profile = provider.get_profile(language)?;
            let lengths = candidate_lengths(&symbols, algorithm, profile.expected_ic(), settings);
            search(&lengths, settings, |length| {
                Ok(vec![recover_key(&symbols, length, algorithm, profile)?])
            })?
        }
        HackHints::Nothing => {
            let expected_ic = provider.mean_expected_ic().ok_or_else(|| {
                CypriumError::KeyRecoveryFailed("no language profiles available".into())
            })?;
            let lengths = candidate_lengths(&symbols, algorithm, expected_ic, settings);
            search(&lengths, settings, |length| {
                provider
                    .list_languages()
                    .into_iter()
                    .map(|code| recover_key(&symbols, length, algorithm, provider.get_profile(code)?))
                    .collect()
            })?
        }
    };

    if guess.confidence < settings.min_confidence {
        warn!(
            key = %guess.key,
            language = %guess.language,
            confidence = guess.confidence,
            "best key is below the confidence threshold"
        );
        return Err(CypriumError::KeyRecoveryFailed(format!(
            "best key {} ({}) only reaches confidence {:.2}, below {:.2}",
            guess.key, guess.language, guess.confidence, settings.min_confidence
        )));
    }

    info!(
        %algorithm,
        key = %guess.key,
        language = %guess.language,
        confidence = guess.confidence,
        "key found"
    );
    let plain = apply(&symbols, &guess.key, algorithm, Direction::Decipher)?;
    Ok(HackOutcome {
        plaintext: restore(&plain, &normalized.restore)?,
        key: guess.key,
        language: Some(guess.language),
        distance: guess.distance,
        confidence: guess.confidence,
    })
}

/// Key lengths worth trying, with the estimator's confidence in each
fn candidate_lengths(
    symbols: &[u8],
    algorithm: Algorithm,
    expected_ic: f64,
    settings: &Settings,
) -> Vec<LengthCandidate> {
    if algorithm == Algorithm::Autoclave {
        return brute_force_lengths(symbols.len(), settings.autoclave_max_seed);
    }

    let mut lengths = estimate_length(symbols, expected_ic, settings.max_key_length);
    if lengths.is_empty() {
        warn!(
            symbols = symbols.len(),
            "too little ciphertext to estimate the key length, trying every length"
        );
        return brute_force_lengths(symbols.len(), settings.max_key_length);
    }
    lengths.truncate(settings.candidate_lengths);
    debug!(?lengths, "key length candidates");
    lengths
}

/// Recover keys for each candidate length and keep the best scoring one
fn search<F>(lengths: &[LengthCandidate], settings: &Settings, mut recover: F) -> Result<KeyGuess>
where
    F: FnMut(usize) -> Result<Vec<KeyGuess>>,
{
    let mut best: Option<(f64, KeyGuess)> = None;
    for candidate in lengths {
        for guess in recover(candidate.length)? {
            let score = guess.distance + LENGTH_DOUBT_WEIGHT * (1.0 - candidate.confidence);
            debug!(
                length = guess.length,
                key = %guess.key,
                language = %guess.language,
                score,
                "candidate"
            );
            let better = match &best {
                None => true,
                Some((best_score, best_guess)) => {
                    compare(score, &guess, *best_score, best_guess) == Ordering::Less
                }
            };
            if better {
                best = Some((score, guess));
            }
        }
    }

    match best {
        Some((_, guess)) => Ok(guess),
        None => Err(CypriumError::KeyRecoveryFailed(format!(
            "no key length could be tried (max {})",
            settings.max_key_length
        ))),
    }
}

/// Lower score first, then shorter length, smaller key, language code
fn compare(score: f64, guess: &KeyGuess, other_score: f64, other: &KeyGuess) -> Ordering {
    score
        .total_cmp(&other_score)
        .then(guess.length.cmp(&other.length))
        .then_with(|| guess.key.cmp(&other.key))
        .then_with(|| guess.language.cmp(&other.language))
}
