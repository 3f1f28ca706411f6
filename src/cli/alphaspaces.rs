use crate::alphaspaces;
use crate::error::Result;

/// Cover text of the demo, from Rabelais' Gargantua
const DEMO_COVER: &str = concat!(
    "“En icelluy fut ladicte geneallogie trouvée, escripte au long de ",
    "lettres cancelleresques, non en papier, non en parchemin, non en ",
    "cere, mais en escorce d’ulmeau, tant toutesfoys usées par vetusté ",
    "qu’à poine en povoit on troys recognoistre de ranc.” –\u{a0}extrait de ",
    "«\u{a0}Gargantua\u{a0}» de François Rabelais.",
);

/// The same text hiding "pantagruel"
const DEMO_HIDDEN: &str = concat!(
    "“En                icelluy fut              ",
    "ladicte                    geneallogie trouvée,       ",
    "escripte                  au                     long     ",
    "de            lettres                           cancelleresques, non ",
    "en papier, non en parchemin, non en cere, mais en escorce d’ulmeau, ",
    "tant toutesfoys usées par vetusté qu’à poine en povoit on troys ",
    "recognoistre de ranc.” –\u{a0}extrait de «\u{a0}Gargantua\u{a0}» de François ",
    "Rabelais.",
);

pub fn alphaspaces_hide(text: &str, data: &str) -> Result<String> {
    alphaspaces::hide(text, &data.to_lowercase())
}

pub fn alphaspaces_unhide(text: &str) -> Result<String> {
    alphaspaces::unhide(text)
}

/// Hide, unhide, then fail on data too long for the cover
pub fn alphaspaces_demo() -> Result<String> {
    let mut output = String::new();

    output.push_str(&format!("--- Hiding ---\n"));
    let data = "vieuxfrancois";
    output.push_str(&format!("Text used as source: {}\n", DEMO_COVER));
    output.push_str(&format!("Data to hide: {}\n\n", data));
    output.push_str(&format!(
        "Text with hidden data: {}\n\n",
        alphaspaces::hide(DEMO_COVER, data)?
    ));

    output.push_str(&format!("--- Unhiding ---\n"));
    output.push_str(&format!("Text used as source: {}\n", DEMO_HIDDEN));
    output.push_str(&format!(
        "The hidden data is: {}\n\n",
        alphaspaces::unhide(DEMO_HIDDEN)?
    ));

    output.push_str(&format!("--- Won't work ---\n"));
    let data = "morderegrippipiotabirofreluchamburelurecoquelurintimpanemens";
    output.push_str(&format!("Data to hide: {}\n", data));
    if let Err(e) = alphaspaces::hide(DEMO_COVER, data) {
        output.push_str(&format!("Error: {}\n", e));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_hidden_text() {
        assert_eq!(alphaspaces_unhide(DEMO_HIDDEN).unwrap(), "pantagruel");
        assert_eq!(alphaspaces_hide(DEMO_COVER, "Pantagruel").unwrap(), DEMO_HIDDEN);
    }

    #[test]
    fn test_demo() {
        let output = alphaspaces_demo().unwrap();
        assert!(output.contains("The hidden data is: pantagruel\n"));
        assert!(output.contains("Error: Input text is too short: 61 space groups needed, only 44 available"));
    }
}
