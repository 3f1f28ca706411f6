use super::algorithm::{Algorithm, Direction, Key};
use crate::alphabet::ALPHABET_SIZE;
use crate::error::{CypriumError, Result};
use std::collections::VecDeque;

const MODULO: u8 = ALPHABET_SIZE as u8;

// Operands are reduced first so any u8 is accepted without overflow.

fn add(p: u8, k: u8) -> u8 {
    (p % MODULO + k % MODULO) % MODULO
}

fn sub(c: u8, k: u8) -> u8 {
    (c % MODULO + MODULO - k % MODULO) % MODULO
}

fn beaufort(x: u8, k: u8) -> u8 {
    (k % MODULO + MODULO - x % MODULO) % MODULO
}

/// Combine one symbol with one key shift
pub fn combine(symbol: u8, shift: u8, algorithm: Algorithm, direction: Direction) -> u8 {
    match (algorithm, direction) {
        (Algorithm::Beaufort, _) => beaufort(symbol, shift),
        (_, Direction::Encipher) => add(symbol, shift),
        (_, Direction::Decipher) => sub(symbol, shift),
    }
}

/// Combine each symbol with the key repeated over the buffer
pub fn transform(buf: &[u8], key: &[u8], comb: impl Fn(u8, u8) -> u8) -> Vec<u8> {
    let keylen = key.len();
    buf.iter()
        .enumerate()
        .map(|(i, &c)| comb(c, key[i % keylen]))
        .collect()
}

/// Encipher or decipher working symbols (0-25) with `key`
pub fn apply(symbols: &[u8], key: &Key, algorithm: Algorithm, direction: Direction) -> Result<Vec<u8>> {
    if symbols.is_empty() {
        return Err(CypriumError::EmptyText);
    }
    if key.is_empty() {
        return Err(CypriumError::EmptyKey);
    }
    if key.charset() != algorithm.key_charset() {
        return Err(CypriumError::InvalidCharacter(format!(
            "a {} key must be made of {}",
            algorithm,
            algorithm.key_charset().description()
        )));
    }

    let out = match algorithm {
        Algorithm::Autoclave => autoclave(symbols, key.shifts(), direction),
        _ => transform(symbols, key.shifts(), |s, k| combine(s, k, algorithm, direction)),
    };
    Ok(out)
}

/// Autoclave key stream: the seed key, then the plaintext as it goes by.
///
/// Holds exactly `seed.len()` pending shifts between symbols, so a whole
/// message costs linear time.
#[derive(Debug, Clone)]
pub struct AutoclaveStream {
    pending: VecDeque<u8>,
}

impl AutoclaveStream {
    pub fn new(seed: &[u8]) -> Self {
        Self {
            pending: seed.iter().copied().collect(),
        }
    }

    /// Shift for the current position
    pub fn next_shift(&mut self) -> u8 {
        self.pending.pop_front().unwrap_or_default()
    }

    /// Push the plaintext symbol of the position just consumed
    pub fn feed(&mut self, plain: u8) {
        self.pending.push_back(plain);
    }
}

fn autoclave(symbols: &[u8], seed: &[u8], direction: Direction) -> Vec<u8> {
    let mut stream = AutoclaveStream::new(seed);
    symbols
        .iter()
        .map(|&s| {
            let k = stream.next_shift();
            let (out, plain) = match direction {
                Direction::Encipher => (add(s, k), s),
                Direction::Decipher => {
                    let p = sub(s, k);
                    (p, p)
                }
            };
            stream.feed(plain);
            out
        })
        .collect()
}
