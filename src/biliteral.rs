//! Biliteral code: each letter as five binary digits written `A`/`B`.
//!
//! `j` shares the code of `i` and `v` that of `u`, so decoding yields `[ij]`
//! and `[uv]` for those two groups.

use crate::alphabet::check_charset;
use crate::error::{CypriumError, Result};
use std::collections::BTreeSet;

const DIGITS: usize = 5;

/// Five-digit A/B code of a lowercase letter
fn code(c: char) -> Option<String> {
    let c = match c {
        'j' => 'i',
        'v' => 'u',
        'a'..='z' => c,
        _ => return None,
    };
    let index = c as u8 - b'a';
    Some(
        (0..DIGITS)
            .rev()
            .map(|bit| if index >> bit & 1 == 1 { 'B' } else { 'A' })
            .collect(),
    )
}

/// Decoded form of one five-digit group
fn decode_group(group: &str) -> Option<&'static str> {
    const LETTERS: [&str; 26] = [
        "a", "b", "c", "d", "e", "f", "g", "h", "[ij]", "", "k", "l", "m", "n", "o", "p", "q",
        "r", "s", "t", "[uv]", "", "w", "x", "y", "z",
    ];
    let index = group
        .chars()
        .try_fold(0usize, |acc, c| match c {
            'A' => Some(acc * 2),
            'B' => Some(acc * 2 + 1),
            _ => None,
        })?;
    LETTERS.get(index).copied().filter(|l| !l.is_empty())
}

/// Encode lowercase ASCII text
pub fn cypher(text: &str) -> Result<String> {
    if text.is_empty() {
        return Err(CypriumError::EmptyText);
    }
    check_charset(text, |c| c.is_ascii_lowercase(), "lowercase strict ASCII chars")?;
    Ok(text.chars().filter_map(code).collect())
}

/// Decode a string of `A`/`B` groups of five
pub fn decypher(text: &str) -> Result<String> {
    if text.is_empty() {
        return Err(CypriumError::EmptyText);
    }
    check_charset(text, |c| c == 'A' || c == 'B', "A and B")?;
    if text.len() % DIGITS != 0 {
        return Err(CypriumError::InvalidLength(format!(
            "text must be made of groups of five chars (current length: {})",
            text.len()
        )));
    }

    let groups: Vec<&str> = (0..text.len())
        .step_by(DIGITS)
        .map(|i| &text[i..i + DIGITS])
        .collect();
    let invalid: BTreeSet<&str> = groups
        .iter()
        .copied()
        .filter(|g| decode_group(g).is_none())
        .collect();
    if !invalid.is_empty() {
        return Err(CypriumError::InvalidCode(format!(
            "unknown biliteral codes: {}",
            invalid.into_iter().collect::<Vec<_>>().join(", ")
        )));
    }

    Ok(groups.into_iter().filter_map(decode_group).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(cypher("d").unwrap(), "AAABB");
        assert_eq!(cypher("az").unwrap(), "AAAAABBAAB");
        assert_eq!(cypher("j").unwrap(), cypher("i").unwrap());
        assert_eq!(cypher("v").unwrap(), cypher("u").unwrap());
    }

    #[test]
    fn test_round_trip() {
        let text = "abcdefghklmnopqrstwxyz".repeat(3);
        assert_eq!(decypher(&cypher(&text).unwrap()).unwrap(), text);
        assert_eq!(decypher(&cypher("jive").unwrap()).unwrap(), "[ij][ij][uv]e");
    }

    #[test]
    fn test_cypher_errors() {
        assert!(matches!(cypher(""), Err(CypriumError::EmptyText)));
        assert!(matches!(
            cypher("Hello world"),
            Err(CypriumError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_decypher_errors() {
        assert!(matches!(decypher("AABC"), Err(CypriumError::InvalidCharacter(_))));
        assert!(matches!(decypher("AAAB"), Err(CypriumError::InvalidLength(_))));
        // 9 is the code j would have had
        assert!(matches!(decypher("ABAAB"), Err(CypriumError::InvalidCode(_))));
        assert!(matches!(decypher("BBBBB"), Err(CypriumError::InvalidCode(_))));
    }
}
