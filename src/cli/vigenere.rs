use crate::config::Settings;
use crate::error::Result;
use crate::language::Languages;
use crate::vigenere::{self, Algorithm, HackHints, HackOutcome, Key};

/// Options for the vigenere cypher command
#[derive(Debug, Clone, Default)]
pub struct CypherOptions {
    pub algorithm: Algorithm,
    pub key: String,
    pub preserve_spacing: bool,
}

/// Options for the vigenere decypher command; missing key data means hacking
#[derive(Debug, Clone, Default)]
pub struct DecypherOptions {
    pub algorithm: Algorithm,
    pub key: Option<String>,
    pub length: Option<usize>,
    pub language: Option<String>,
    pub preserve_spacing: bool,
}

impl DecypherOptions {
    /// What the options tell about the key
    pub fn hints(&self) -> Result<HackHints> {
        let hints = match (&self.key, self.length, &self.language) {
            (Some(key), _, _) => HackHints::Key(Key::parse(key, self.algorithm)?),
            (None, Some(length), Some(language)) => HackHints::LengthAndLanguage {
                length,
                language: language.clone(),
            },
            (None, Some(length), None) => HackHints::Length(length),
            (None, None, Some(language)) => HackHints::Language(language.clone()),
            (None, None, None) => HackHints::Nothing,
        };
        Ok(hints)
    }
}

pub fn cypher_text(text: &str, options: &CypherOptions) -> Result<String> {
    vigenere::cypher(text, &options.key, options.algorithm, options.preserve_spacing)
}

/// Decypher with a known key, or break the text with whatever is known
pub fn decypher_text(
    text: &str,
    options: &DecypherOptions,
    languages: &Languages,
    settings: &Settings,
) -> Result<HackOutcome> {
    match options.hints()? {
        HackHints::Key(key) => {
            let plaintext =
                vigenere::decypher_with_key(text, &key, options.algorithm, options.preserve_spacing)?;
            Ok(HackOutcome {
                key,
                language: None,
                plaintext,
                distance: 0.0,
                confidence: 1.0,
            })
        }
        hints => {
            let mut outcome = vigenere::hack(text, options.algorithm, &hints, languages, settings)?;
            if !options.preserve_spacing {
                outcome.plaintext =
                    vigenere::decypher_with_key(text, &outcome.key, options.algorithm, false)?;
            }
            Ok(outcome)
        }
    }
}

/// Report of a hack: the recovered key, its language and the plaintext
pub fn format_outcome(outcome: &HackOutcome) -> String {
    let mut output = String::new();

    output.push_str(&format!("Key: {}\n", outcome.key));
    if let Some(language) = &outcome.language {
        output.push_str(&format!("Language: {}\n", language));
    }
    output.push_str(&format!("Confidence: {:.2}\n", outcome.confidence));
    output.push_str(&format!("\n"));
    output.push_str(&format!("{}\n", outcome.plaintext));

    output
}

/// The classic examples: one text under each variant, then a bad key
pub fn demo() -> Result<String> {
    let plain = "HELLO WORLD 1024";
    let runs = [
        ("HACK", Algorithm::Vigenere),
        ("HACK", Algorithm::Autoclave),
        ("1024", Algorithm::Gronsfeld),
        ("HACK", Algorithm::Beaufort),
    ];

    let mut output = String::new();
    output.push_str(&format!("--- Cyphering ---\n"));
    output.push_str(&format!("plain-text  <->  key  <->  algorithm\n"));
    for (key, algorithm) in runs {
        let cyphered = vigenere::cypher(plain, key, algorithm, true)?;
        output.push_str(&format!("{} - {} - {}\n", plain, key, algorithm));
        output.push_str(&format!("\t{}\n", cyphered));
    }
    output.push_str(&format!("\n"));

    output.push_str(&format!("--- Won't work ---\n"));
    output.push_str(&format!("HELLO WORLD  <->  1234  <->  vigenere\n"));
    if let Err(e) = vigenere::cypher("HELLO WORLD", "1234", Algorithm::Vigenere, true) {
        output.push_str(&format!("Error: {}\n", e));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../../tests/data/english.txt");

    #[test]
    fn test_hints_from_options() {
        let mut options = DecypherOptions::default();
        assert_eq!(options.hints().unwrap(), HackHints::Nothing);

        options.language = Some("fr".into());
        assert_eq!(options.hints().unwrap(), HackHints::Language("fr".into()));

        options.length = Some(4);
        assert_eq!(
            options.hints().unwrap(),
            HackHints::LengthAndLanguage {
                length: 4,
                language: "fr".into()
            }
        );

        options.language = None;
        assert_eq!(options.hints().unwrap(), HackHints::Length(4));

        options.key = Some("hack".into());
        assert!(matches!(options.hints().unwrap(), HackHints::Key(_)));
    }

    #[test]
    fn test_decypher_with_key_keeps_spacing_choice() {
        let options = DecypherOptions {
            key: Some("HACK".into()),
            ..Default::default()
        };
        let outcome = decypher_text(
            "OENVV WQBSD",
            &options,
            &Languages::builtin(),
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(outcome.plaintext, "HELLOWORLD");
    }

    #[test]
    fn test_decypher_hack_report() {
        let ct = vigenere::cypher(SAMPLE, "LEMON", Algorithm::Vigenere, true).unwrap();
        let options = DecypherOptions {
            language: Some("en".into()),
            preserve_spacing: true,
            ..Default::default()
        };
        let outcome =
            decypher_text(&ct, &options, &Languages::builtin(), &Settings::default()).unwrap();
        let report = format_outcome(&outcome);
        assert!(report.starts_with("Key: LEMON\nLanguage: en\n"));
        assert!(report.contains("THE KEEPER OF THE OLD LIGHTHOUSE"));
    }

    #[test]
    fn test_decypher_hack_drops_spaces() {
        let ct = vigenere::cypher(SAMPLE, "LEMON", Algorithm::Vigenere, true).unwrap();
        let options = DecypherOptions {
            length: Some(5),
            preserve_spacing: false,
            ..Default::default()
        };
        let outcome =
            decypher_text(&ct, &options, &Languages::builtin(), &Settings::default()).unwrap();
        assert!(outcome.plaintext.starts_with("THEKEEPEROFTHEOLDLIGHTHOUSE"));
        assert!(!outcome.plaintext.contains(' '));
    }

    #[test]
    fn test_demo() {
        let output = demo().unwrap();
        assert!(output.contains("\tOENVV WQBSD 1024\n"));
        assert!(output.contains("\tIENPP WQVMD 1024\n"));
        assert!(output.contains("Error: Text contains unallowed chars"));
    }
}
