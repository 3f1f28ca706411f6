use std::fmt;

const VERSION: &str = env!("CYPRIUM_VERSION");

/// Tools with an about page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Vigenere,
    Biliteral,
    AlphaSpaces,
}

impl std::str::FromStr for Tool {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vigenere" => Ok(Self::Vigenere),
            "biliteral" => Ok(Self::Biliteral),
            "alphaspaces" => Ok(Self::AlphaSpaces),
            _ => Err(format!("Unknown tool: {}", s)),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vigenere => write!(f, "Vigenere"),
            Self::Biliteral => write!(f, "Biliteral"),
            Self::AlphaSpaces => write!(f, "AlphaSpaces"),
        }
    }
}

/// Help page of a tool
pub fn about(tool: Tool) -> String {
    let body = match tool {
        Tool::Vigenere => {
            "Vigenere is a polyalphabetic cypher: each letter is shifted by the\n\
             matching letter of a repeated key. Variants:\n\
             \x20 vigenere   c = p + k\n\
             \x20 beaufort   c = k - p (cyphering and decyphering are the same)\n\
             \x20 gronsfeld  vigenere with a key made of digits\n\
             \x20 autoclave  the key is followed by the plain text itself\n\n\
             Without a key, decypher tries to break the text. A key length\n\
             and/or a language (en, fr, de, es, it) make it faster and safer.\n"
        }
        Tool::Biliteral => {
            "Biliteral writes each letter as five binary digits using A and B.\n\
             Cypher input must be lowercase ASCII letters only, decypher input\n\
             an integer number of groups of five A/B digits.\n\n\
             Note that [ij] and [uv] share the same biliteral codes.\n"
        }
        Tool::AlphaSpaces => {
            "AlphaSpaces hides lowercase letters into a text: the n-th group of\n\
             spaces gets as many spaces as the position of the n-th letter in the\n\
             alphabet (a = 1 ... z = 26), and a group of 27 spaces ends the data.\n\
             The cover text needs one more group of spaces than letters to hide.\n"
        }
    };

    let mut output = String::new();
    output.push_str(&format!("===== About {} =====\n\n", tool));
    output.push_str(body);
    output.push_str(&format!("\nCyprium.{} version {}\n", tool, VERSION));
    output.push_str(&format!("Licence GPL3\n"));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_from_str() {
        assert_eq!("AlphaSpaces".parse::<Tool>().unwrap(), Tool::AlphaSpaces);
        assert!("enigma".parse::<Tool>().is_err());
    }

    #[test]
    fn test_about() {
        let text = about(Tool::Biliteral);
        assert!(text.starts_with("===== About Biliteral =====\n"));
        assert!(text.contains("[ij] and [uv]"));
        assert!(text.contains(VERSION));
    }
}
