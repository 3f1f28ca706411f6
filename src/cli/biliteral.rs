use crate::biliteral;
use crate::error::Result;

/// Encode text, lowercasing it first
pub fn biliteral_cypher(text: &str) -> Result<String> {
    biliteral::cypher(&text.to_lowercase())
}

/// Decode A/B groups, ignoring whitespace between them
pub fn biliteral_decypher(text: &str) -> Result<String> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    biliteral::decypher(&compact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_biliteral() {
        assert_eq!(biliteral_cypher("Bacon").unwrap(), "AAAABAAAAAAAABAABBBAABBAB");
        assert_eq!(
            biliteral_decypher("aaaab aaaaa aaaba abbba abbab").unwrap(),
            "bacon"
        );
    }
}
