//! Vigenère family: Vigenère, Beaufort, Gronsfeld and Autoclave, plus the
//! ciphertext-only attack.

pub mod algorithm;
pub mod analysis;
pub mod hack;
pub mod recovery;
pub mod transform;

pub use algorithm::{Algorithm, Direction, Key, KeyCharset};
pub use analysis::{estimate_length, LengthCandidate};
pub use hack::{hack, HackHints, HackOutcome};
pub use recovery::{recover_key, recover_key_and_language, KeyGuess, AUTOCLAVE_SEED_LIMIT};
pub use transform::AutoclaveStream;

use crate::alphabet::{normalize, restore};
use crate::error::Result;

/// Encipher `text` with a key written for `algorithm`.
///
/// Non-letters are kept in place; whitespace is dropped unless
/// `preserve_spacing` is set.
pub fn cypher(text: &str, key: &str, algorithm: Algorithm, preserve_spacing: bool) -> Result<String> {
    let key = Key::parse(key, algorithm)?;
    cypher_with_key(text, &key, algorithm, preserve_spacing)
}

/// Decipher `text` with a key written for `algorithm`
pub fn decypher(text: &str, key: &str, algorithm: Algorithm, preserve_spacing: bool) -> Result<String> {
    let key = Key::parse(key, algorithm)?;
    decypher_with_key(text, &key, algorithm, preserve_spacing)
}

pub fn cypher_with_key(text: &str, key: &Key, algorithm: Algorithm, preserve_spacing: bool) -> Result<String> {
    run(text, key, algorithm, Direction::Encipher, preserve_spacing)
}

pub fn decypher_with_key(text: &str, key: &Key, algorithm: Algorithm, preserve_spacing: bool) -> Result<String> {
    run(text, key, algorithm, Direction::Decipher, preserve_spacing)
}

fn run(
    text: &str,
    key: &Key,
    algorithm: Algorithm,
    direction: Direction,
    preserve_spacing: bool,
) -> Result<String> {
    let normalized = normalize(text, preserve_spacing)?;
    let out = transform::apply(&normalized.symbols, key, algorithm, direction)?;
    restore(&out, &normalized.restore)
}
