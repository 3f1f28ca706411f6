//! Cyprium - classical text cyphers and their cryptanalysis
//!
//! The core is the Vigenère family (Vigenère, Beaufort, Gronsfeld and
//! Autoclave) with a ciphertext-only attack that recovers the key from
//! optional hints: the key itself, its length, the plaintext language, or
//! nothing at all.
//!
//! ## Attack Pipeline
//!
//! ```text
//! Ciphertext → Normalize → Estimate length (Kasiski + IC) → Recover key per column (χ²) → Score → Decypher
//! ```
//!
//! Two smaller tools come along: the Biliteral code and AlphaSpaces text
//! steganography.
//!
//! ## Example
//!
//! ```no_run
//! use cyprium::config::Settings;
//! use cyprium::language::Languages;
//! use cyprium::vigenere::{self, Algorithm, HackHints};
//!
//! let text = std::fs::read_to_string("letter.txt").unwrap();
//! let cyphered = vigenere::cypher(&text, "LEMON", Algorithm::Vigenere, true).unwrap();
//!
//! let outcome = vigenere::hack(
//!     &cyphered,
//!     Algorithm::Vigenere,
//!     &HackHints::Language("en".into()),
//!     &Languages::builtin(),
//!     &Settings::default(),
//! )
//! .unwrap();
//! println!("{} ({:.2})", outcome.key, outcome.confidence);
//! ```

pub mod alphabet;
pub mod alphaspaces;
pub mod biliteral;
pub mod cli;
pub mod config;
pub mod error;
pub mod language;
pub mod vigenere;

pub use config::Settings;
pub use error::{CypriumError, Result};
pub use language::{LanguageProfile, LanguageProvider, Languages};
