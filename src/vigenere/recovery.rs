//! Key recovery for a known key length: every column is a Caesar shift, scored
//! against a language profile.

use super::algorithm::{Algorithm, Direction, Key, KeyCharset};
use super::analysis::{columns, letter_counts};
use super::transform::combine;
use crate::alphabet::ALPHABET_SIZE;
use crate::error::{CypriumError, Result};
use crate::language::{LanguageProfile, LanguageProvider};
use tracing::debug;

/// Longest Autoclave seed key recovery will attempt
pub const AUTOCLAVE_SEED_LIMIT: usize = 8;

/// A recovered key and how well its plaintext matches the language
#[derive(Debug, Clone, PartialEq)]
pub struct KeyGuess {
    pub key: Key,
    pub language: String,
    pub length: usize,
    /// Mean per-column chi-squared distance
    pub distance: f64,
    /// 1 for a clear match, 0 for no better than random letters
    pub confidence: f64,
}

/// Per-column result of the shift search
struct ColumnFit {
    shift: u8,
    distance: f64,
    counts: [usize; ALPHABET_SIZE],
}

/// Recover a key of `length` for a known language.
pub fn recover_key(
    ciphertext: &[u8],
    length: usize,
    algorithm: Algorithm,
    profile: &LanguageProfile,
) -> Result<KeyGuess> {
    if length == 0 {
        return Err(CypriumError::KeyRecoveryFailed(
            "key length must be at least 1".into(),
        ));
    }
    if ciphertext.len() < length {
        return Err(CypriumError::KeyRecoveryFailed(format!(
            "ciphertext has {} symbols, fewer than the key length {}",
            ciphertext.len(),
            length
        )));
    }
    if algorithm == Algorithm::Autoclave && length > AUTOCLAVE_SEED_LIMIT {
        return Err(CypriumError::KeyRecoveryFailed(format!(
            "autoclave seeds longer than {} can't be recovered",
            AUTOCLAVE_SEED_LIMIT
        )));
    }

    let charset = algorithm.key_charset();
    let mut shifts = Vec::with_capacity(length);
    let mut total = 0.0;
    let mut likelihood = 0.0;
    for column in columns(ciphertext, length) {
        let fit = best_shift(&column, charset, algorithm, profile);
        shifts.push(fit.shift);
        total += fit.distance;
        likelihood += profile.log_likelihood_ratio(&fit.counts);
    }

    let distance = total / length as f64;
    let shape = 1.0 - distance / profile.flat_distance();
    let significance = significance(likelihood, length, charset, ciphertext.len(), profile);
    let confidence = shape.min(significance).clamp(0.0, 1.0);
    let key = Key::from_shifts(shifts, charset)?;
    debug!(
        %algorithm,
        language = profile.code(),
        length,
        key = %key,
        distance,
        shape,
        significance,
        "recovered key"
    );

    Ok(KeyGuess {
        key,
        language: profile.code().to_string(),
        length,
        distance,
        confidence,
    })
}

/// Recover a key of `length` trying every language of `provider`.
///
/// The lowest distance wins; on a tie the first language code in order.
pub fn recover_key_and_language(
    ciphertext: &[u8],
    length: usize,
    algorithm: Algorithm,
    provider: &impl LanguageProvider,
) -> Result<KeyGuess> {
    let mut best: Option<KeyGuess> = None;
    for code in provider.list_languages() {
        let profile = provider.get_profile(code)?;
        let guess = recover_key(ciphertext, length, algorithm, profile)?;
        if best.as_ref().map_or(true, |b| guess.distance < b.distance) {
            best = Some(guess);
        }
    }
    best.ok_or_else(|| CypriumError::KeyRecoveryFailed("no language profiles available".into()))
}

/// How far the plaintext's likelihood ratio stands above what picking the
/// best of `charset.size()` shifts per column gives random letters anyway.
///
/// Each column is charged `ln(shifts)` for its free choice, and the remainder
/// is scaled so that genuine text of the language lands near 1.
fn significance(
    likelihood: f64,
    length: usize,
    charset: KeyCharset,
    symbols: usize,
    profile: &LanguageProfile,
) -> f64 {
    let choice_cost = length as f64 * f64::from(charset.size()).ln();
    let expected = symbols as f64 * profile.information();
    if expected <= 0.0 {
        return 0.0;
    }
    (likelihood - choice_cost) / expected
}

/// Shift of one column with the lowest distance; ties go to the smaller shift
fn best_shift(
    column: &[u8],
    charset: KeyCharset,
    algorithm: Algorithm,
    profile: &LanguageProfile,
) -> ColumnFit {
    let mut best = ColumnFit {
        shift: 0,
        distance: f64::INFINITY,
        counts: [0; ALPHABET_SIZE],
    };
    for shift in 0..charset.size() {
        let plain = match algorithm {
            Algorithm::Autoclave => autoclave_chain(column, shift),
            _ => column
                .iter()
                .map(|&c| combine(c, shift, algorithm, Direction::Decipher))
                .collect(),
        };
        let counts = letter_counts(&plain);
        let distance = profile.distance(&counts, plain.len());
        if distance < best.distance {
            best = ColumnFit {
                shift,
                distance,
                counts,
            };
        }
    }
    best
}

/// Decipher one Autoclave column: its first symbol uses the seed shift, every
/// later one the plaintext found one key length earlier.
fn autoclave_chain(column: &[u8], seed: u8) -> Vec<u8> {
    let modulo = ALPHABET_SIZE as u8;
    let mut previous = seed;
    column
        .iter()
        .map(|&c| {
            let p = (c + modulo - previous) % modulo;
            previous = p;
            p
        })
        .collect()
}
