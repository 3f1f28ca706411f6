pub mod about;
pub mod alphaspaces;
pub mod biliteral;
pub mod languages;
pub mod vigenere;

pub use about::*;
pub use alphaspaces::*;
pub use biliteral::*;
pub use languages::*;
pub use vigenere::*;

use crate::error::{CypriumError, Result};
use std::path::Path;

/// Text given inline, else the content of `input`, without its final newline
pub fn read_input(data: Option<String>, input: Option<&Path>) -> Result<String> {
    let text = match (data, input) {
        (Some(data), _) => data,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Err(CypriumError::EmptyText),
    };
    Ok(text.strip_suffix('\n').map(str::to_string).unwrap_or(text))
}

/// Write `text` to `output` and return a short notice, or return `text` itself
pub fn write_output(text: &str, output: Option<&Path>) -> Result<String> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(format!("Written to {}", path.display()))
        }
        None => Ok(text.to_string()),
    }
}
