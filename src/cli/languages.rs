use crate::language::Languages;

/// Table of the available language profiles
pub fn list_languages(languages: &Languages) -> String {
    let mut output = String::new();

    output.push_str(&format!("Language profiles\n"));
    output.push_str(&format!("=================\n\n"));
    output.push_str(&format!("{:<6} {:<12} {}\n", "Code", "Name", "Expected IC"));
    for profile in languages.iter() {
        output.push_str(&format!(
            "{:<6} {:<12} {:.4}\n",
            profile.code(),
            profile.name(),
            profile.expected_ic()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_builtin() {
        let output = list_languages(&Languages::builtin());
        assert!(output.contains("\nen     English      0.06"));
        assert!(output.contains("\nit     Italian"));
        assert_eq!(output.lines().count(), 4 + 5);
    }
}
