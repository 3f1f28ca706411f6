use crate::alphabet::{check_charset, letter, shift_of, ALPHABET_SIZE};
use crate::error::{CypriumError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vigenère family variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Vigenere,
    Beaufort,
    Gronsfeld,
    Autoclave,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Vigenere,
        Algorithm::Beaufort,
        Algorithm::Gronsfeld,
        Algorithm::Autoclave,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Vigenere => "vigenere",
            Self::Beaufort => "beaufort",
            Self::Gronsfeld => "gronsfeld",
            Self::Autoclave => "autoclave",
        }
    }

    /// Symbols a key for this variant is written with
    pub fn key_charset(&self) -> KeyCharset {
        match self {
            Self::Gronsfeld => KeyCharset::Digits,
            _ => KeyCharset::Letters,
        }
    }
}

impl std::str::FromStr for Algorithm {
    type Err = CypriumError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "vigenere" | "vigenère" => Ok(Self::Vigenere),
            "beaufort" => Ok(Self::Beaufort),
            "gronsfeld" => Ok(Self::Gronsfeld),
            "autoclave" | "autokey" => Ok(Self::Autoclave),
            _ => Err(CypriumError::UnsupportedVariant(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encipher,
    Decipher,
}

/// Key alphabet: letters A-Z (shift 0-25) or digits 0-9 (shift 0-9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCharset {
    Letters,
    Digits,
}

impl KeyCharset {
    /// Number of distinct shifts
    pub fn size(&self) -> u8 {
        match self {
            Self::Letters => ALPHABET_SIZE as u8,
            Self::Digits => 10,
        }
    }

    pub fn shift_of(&self, c: char) -> Option<u8> {
        match self {
            Self::Letters => shift_of(c),
            Self::Digits => c.to_digit(10).map(|d| d as u8),
        }
    }

    pub fn symbol(&self, shift: u8) -> char {
        match self {
            Self::Letters => letter(shift),
            Self::Digits => char::from(b'0' + shift % 10),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Letters => "ASCII letters",
            Self::Digits => "decimal digits",
        }
    }
}

/// A non-empty sequence of shifts, written in its charset
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    charset: KeyCharset,
    shifts: Vec<u8>,
}

impl Key {
    /// Parse a key for `algorithm`; case and whitespace are ignored
    pub fn parse(text: &str, algorithm: Algorithm) -> Result<Self> {
        let charset = algorithm.key_charset();
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(CypriumError::EmptyKey);
        }
        check_charset(
            &compact,
            |c| charset.shift_of(c).is_some(),
            &format!("{} (in a {} key)", charset.description(), algorithm),
        )?;
        let shifts = compact.chars().filter_map(|c| charset.shift_of(c)).collect();
        Ok(Self { charset, shifts })
    }

    pub fn from_shifts(shifts: Vec<u8>, charset: KeyCharset) -> Result<Self> {
        if shifts.is_empty() {
            return Err(CypriumError::EmptyKey);
        }
        if let Some(bad) = shifts.iter().find(|&&s| s >= charset.size()) {
            return Err(CypriumError::InvalidCharacter(format!(
                "shift {} is outside the {} key range",
                bad,
                charset.description()
            )));
        }
        Ok(Self { charset, shifts })
    }

    pub fn charset(&self) -> KeyCharset {
        self.charset
    }

    pub fn shifts(&self) -> &[u8] {
        &self.shifts
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &s in &self.shifts {
            write!(f, "{}", self.charset.symbol(s))?;
        }
        Ok(())
    }
}
