//! AlphaSpaces: hide lowercase letters in the lengths of a text's space runs.
//!
//! A letter becomes a run of `index + 1` spaces (a = 1, z = 26) and the data
//! ends with a run of 27 spaces. Runs after the terminator are left alone.

use crate::alphabet::check_charset;
use crate::error::{CypriumError, Result};

/// Length of the space run closing the hidden data
pub const TERMINATOR: usize = 27;

/// Longest space run standing for a letter
const ALPHABET_SPACES: usize = 26;

/// One piece of a text: a run of spaces, or anything between two runs
#[derive(Debug, PartialEq)]
enum Chunk<'a> {
    Spaces(usize),
    Text(&'a str),
}

fn chunks(text: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut spaces = 0;
    for (i, c) in text.char_indices() {
        if c == ' ' {
            if spaces == 0 && i > start {
                out.push(Chunk::Text(&text[start..i]));
            }
            spaces += 1;
        } else if spaces > 0 {
            out.push(Chunk::Spaces(spaces));
            spaces = 0;
            start = i;
        }
    }
    if spaces > 0 {
        out.push(Chunk::Spaces(spaces));
    } else if start < text.len() {
        out.push(Chunk::Text(&text[start..]));
    }
    out
}

/// Hide `data` (lowercase ASCII) into the space runs of `text`
pub fn hide(text: &str, data: &str) -> Result<String> {
    if data.is_empty() || text.is_empty() {
        return Err(CypriumError::EmptyText);
    }
    check_charset(data, |c| c.is_ascii_lowercase(), "lowercase strict ASCII chars")?;

    let chunks = chunks(text);
    let available = chunks.iter().filter(|c| matches!(c, Chunk::Spaces(_))).count();
    let needed = data.len() + 1;
    if available < needed {
        return Err(CypriumError::TextTooShort { needed, available });
    }

    let mut runs = data
        .bytes()
        .map(|b| (b - b'a') as usize + 1)
        .chain(std::iter::once(TERMINATOR));
    let mut out = String::with_capacity(text.len() + needed * TERMINATOR);
    for chunk in chunks {
        match chunk {
            Chunk::Text(t) => out.push_str(t),
            Chunk::Spaces(n) => {
                let n = runs.next().unwrap_or(n);
                out.extend(std::iter::repeat(' ').take(n));
            }
        }
    }
    Ok(out)
}

/// Read the data hidden by [`hide`]
pub fn unhide(text: &str) -> Result<String> {
    if text.is_empty() {
        return Err(CypriumError::EmptyText);
    }

    let mut data = String::new();
    for chunk in chunks(text) {
        match chunk {
            Chunk::Spaces(TERMINATOR) => return Ok(data),
            Chunk::Spaces(n) if n <= ALPHABET_SPACES => data.push((b'a' + (n - 1) as u8) as char),
            Chunk::Spaces(n) => {
                return Err(CypriumError::InvalidCode(format!(
                    "a run of {} spaces does not encode a letter",
                    n
                )))
            }
            Chunk::Text(_) => {}
        }
    }
    Err(CypriumError::InvalidCode(
        "no end of hidden data found in the text".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks() {
        assert_eq!(
            chunks("ab  c d"),
            vec![
                Chunk::Text("ab"),
                Chunk::Spaces(2),
                Chunk::Text("c"),
                Chunk::Spaces(1),
                Chunk::Text("d"),
            ]
        );
        assert_eq!(chunks(" x "), vec![Chunk::Spaces(1), Chunk::Text("x"), Chunk::Spaces(1)]);
    }

    #[test]
    fn test_hide_and_unhide() {
        let cover = "one two three four five six";
        let hidden = hide(cover, "cab").unwrap();
        assert!(hidden.starts_with("one   two three  four"));
        assert_eq!(hidden.replace(' ', ""), cover.replace(' ', ""));
        assert_eq!(unhide(&hidden).unwrap(), "cab");
    }

    #[test]
    fn test_text_too_short() {
        match hide("a b c", "xyz") {
            Err(CypriumError::TextTooShort { needed, available }) => {
                assert_eq!(needed, 4);
                assert_eq!(available, 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_hide_rejects_uppercase() {
        assert!(matches!(
            hide("a b c d", "Ab"),
            Err(CypriumError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_unhide_errors() {
        assert!(matches!(unhide("plain text"), Err(CypriumError::InvalidCode(_))));
        let long_run = format!("a{}b", " ".repeat(30));
        assert!(matches!(unhide(&long_run), Err(CypriumError::InvalidCode(_))));
    }
}
