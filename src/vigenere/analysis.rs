//! Key-length estimation: Kasiski examination plus per-column index of
//! coincidence.

use crate::alphabet::ALPHABET_SIZE;
use std::collections::{BTreeMap, HashMap};

/// Below this many symbols there is no usable signal
pub const MIN_ANALYSIS_SYMBOLS: usize = 20;

const IC_WEIGHT: f64 = 0.6;
const KASISKI_WEIGHT: f64 = 0.4;

/// Index of coincidence of uniformly random letters
const RANDOM_IC: f64 = 1.0 / ALPHABET_SIZE as f64;

/// A probable key length and how strongly the ciphertext supports it (0-1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthCandidate {
    pub length: usize,
    pub confidence: f64,
}

/// Occurrences of each letter
pub fn letter_counts(symbols: &[u8]) -> [usize; ALPHABET_SIZE] {
    let mut counts = [0usize; ALPHABET_SIZE];
    for &s in symbols {
        counts[s as usize % ALPHABET_SIZE] += 1;
    }
    counts
}

/// Probability that two symbols drawn without replacement are equal
pub fn index_of_coincidence(symbols: &[u8]) -> f64 {
    if symbols.len() < 2 {
        return 0.0;
    }
    let numerator: usize = letter_counts(symbols)
        .iter()
        .map(|&c| if c > 1 { c * (c - 1) } else { 0 })
        .sum();
    let denominator = (symbols.len() * (symbols.len() - 1)) as f64;
    numerator as f64 / denominator
}

/// Split into `n` interleaved columns: positions i, i+n, i+2n, ...
pub fn columns(symbols: &[u8], n: usize) -> Vec<Vec<u8>> {
    let mut cols = vec![Vec::with_capacity(symbols.len() / n.max(1) + 1); n];
    if n == 0 {
        return cols;
    }
    for (i, &s) in symbols.iter().enumerate() {
        cols[i % n].push(s);
    }
    cols
}

/// Mean index of coincidence of the `n` columns
pub fn average_column_ic(symbols: &[u8], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let total: f64 = columns(symbols, n)
        .iter()
        .map(|col| index_of_coincidence(col))
        .sum();
    total / n as f64
}

/// Kasiski votes per length in `1..=max_length`.
///
/// Every distance between consecutive occurrences of a repeated trigram
/// votes for each length dividing it; `votes[1]` is therefore the number of
/// distances seen.
pub fn kasiski(symbols: &[u8], max_length: usize) -> BTreeMap<usize, usize> {
    let mut votes: BTreeMap<usize, usize> = (1..=max_length).map(|l| (l, 0)).collect();
    if symbols.len() < 6 {
        return votes;
    }

    let mut positions: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, window) in symbols.windows(3).enumerate() {
        let key = (window[0] as usize * ALPHABET_SIZE + window[1] as usize) * ALPHABET_SIZE
            + window[2] as usize;
        positions.entry(key).or_default().push(i);
    }

    for pos in positions.values().filter(|p| p.len() > 1) {
        for pair in pos.windows(2) {
            let distance = pair[1] - pair[0];
            for (length, count) in votes.iter_mut() {
                if distance % *length == 0 {
                    *count += 1;
                }
            }
        }
    }
    votes
}

/// Rank key lengths `1..=max_length` by combined IC closeness and Kasiski votes.
///
/// Returns an empty list when the text is too short to carry a signal; the
/// caller falls back to [`brute_force_lengths`].
pub fn estimate_length(symbols: &[u8], expected_ic: f64, max_length: usize) -> Vec<LengthCandidate> {
    if symbols.len() < MIN_ANALYSIS_SYMBOLS {
        return Vec::new();
    }

    let votes = kasiski(symbols, max_length);
    let distances = votes.get(&1).copied().unwrap_or(0);
    let span = (expected_ic - RANDOM_IC).max(1e-6);

    let mut candidates: Vec<LengthCandidate> = (1..=max_length)
        .take_while(|&length| symbols.len() / length >= 2)
        .map(|length| {
            let ic = average_column_ic(symbols, length);
            let closeness = (1.0 - (ic - expected_ic).abs() / span).max(0.0);
            let share = if distances == 0 {
                0.0
            } else {
                votes.get(&length).copied().unwrap_or(0) as f64 / distances as f64
            };
            LengthCandidate {
                length,
                confidence: IC_WEIGHT * closeness + KASISKI_WEIGHT * share,
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then(a.length.cmp(&b.length))
    });
    candidates
}

/// Every length up to `max_length` (bounded by the text length), no confidence
pub fn brute_force_lengths(text_len: usize, max_length: usize) -> Vec<LengthCandidate> {
    (1..=max_length.min(text_len))
        .map(|length| LengthCandidate {
            length,
            confidence: 0.0,
        })
        .collect()
}
