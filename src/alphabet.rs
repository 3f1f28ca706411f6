use crate::error::{CypriumError, Result};
use std::collections::BTreeSet;

/// Number of symbols in the working alphabet (A-Z)
pub const ALPHABET_SIZE: usize = 26;

/// Position of an ASCII letter in the alphabet, case-insensitive
pub fn shift_of(c: char) -> Option<u8> {
    if c.is_ascii_alphabetic() {
        Some(c.to_ascii_uppercase() as u8 - b'A')
    } else {
        None
    }
}

/// Uppercase letter for an alphabet position
pub fn letter(shift: u8) -> char {
    (b'A' + shift % ALPHABET_SIZE as u8) as char
}

/// Western European letters folded to uppercase ASCII
fn fold(c: char) -> Option<&'static str> {
    match c {
        'Æ' | 'æ' => Some("AE"),
        'Œ' | 'œ' => Some("OE"),
        'ß' => Some("SS"),
        'À' | 'Á' | 'Â' | 'Ä' | 'à' | 'á' | 'â' | 'ä' => Some("A"),
        'Ç' | 'ç' => Some("C"),
        'É' | 'È' | 'Ê' | 'Ë' | 'é' | 'è' | 'ê' | 'ë' => Some("E"),
        'Î' | 'Ï' | 'î' | 'ï' => Some("I"),
        'Ñ' | 'ñ' => Some("N"),
        'Ó' | 'Ô' | 'Ö' | 'ó' | 'ô' | 'ö' => Some("O"),
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'ù' | 'ú' | 'û' | 'ü' => Some("U"),
        _ => None,
    }
}

/// Where the non-alphabet characters of a text go back on output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreMap {
    len: usize,
    kept: Vec<(usize, char)>,
}

impl RestoreMap {
    /// Number of cipher symbols the map expects
    pub fn symbol_count(&self) -> usize {
        self.len - self.kept.len()
    }
}

/// Text split into cipher symbols (0-25) and the layout needed to rebuild it
#[derive(Debug, Clone)]
pub struct Normalized {
    pub symbols: Vec<u8>,
    pub restore: RestoreMap,
}

/// Convert text to working symbols, remembering every non-alphabet character.
///
/// Letters are uppercased, accented Western European letters are folded to
/// ASCII, any other alphabetic character is rejected. When `preserve_spacing`
/// is off, whitespace is dropped instead of being kept.
pub fn normalize(text: &str, preserve_spacing: bool) -> Result<Normalized> {
    let mut symbols = Vec::with_capacity(text.len());
    let mut kept = Vec::new();
    let mut invalid = BTreeSet::new();

    for c in text.chars() {
        if let Some(shift) = shift_of(c) {
            symbols.push(shift);
        } else if let Some(folded) = fold(c) {
            symbols.extend(folded.bytes().map(|b| b - b'A'));
        } else if c.is_alphabetic() {
            invalid.insert(c);
        } else if c.is_whitespace() && !preserve_spacing {
            continue;
        } else {
            let pos = symbols.len() + kept.len();
            kept.push((pos, c));
        }
    }

    if !invalid.is_empty() {
        return Err(CypriumError::InvalidCharacter(format!(
            "only latin letters can be cyphered: {}",
            quote_chars(&invalid)
        )));
    }

    let len = symbols.len() + kept.len();
    Ok(Normalized {
        symbols,
        restore: RestoreMap { len, kept },
    })
}

/// Rebuild text from symbols, re-inserting kept characters at their positions
pub fn restore(symbols: &[u8], map: &RestoreMap) -> Result<String> {
    if symbols.len() != map.symbol_count() {
        return Err(CypriumError::InvalidLength(format!(
            "{} symbols given, the text layout holds {}",
            symbols.len(),
            map.symbol_count()
        )));
    }

    let mut out = String::with_capacity(map.len);
    let mut symbols = symbols.iter();
    let mut kept = map.kept.iter().peekable();

    for pos in 0..map.len {
        match kept.peek() {
            Some(&&(at, c)) if at == pos => {
                out.push(c);
                kept.next();
            }
            _ => {
                if let Some(&s) = symbols.next() {
                    out.push(letter(s));
                }
            }
        }
    }
    Ok(out)
}

/// Fail with every character of `text` rejected by `allowed`
pub fn check_charset(text: &str, allowed: impl Fn(char) -> bool, description: &str) -> Result<()> {
    let invalid: BTreeSet<char> = text.chars().filter(|&c| !allowed(c)).collect();
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(CypriumError::InvalidCharacter(format!(
            "only {} are allowed: {}",
            description,
            quote_chars(&invalid)
        )))
    }
}

fn quote_chars(chars: &BTreeSet<char>) -> String {
    chars
        .iter()
        .map(|c| format!("'{}'", c))
        .collect::<Vec<_>>()
        .join(", ")
}
