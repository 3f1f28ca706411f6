use std::error::Error;
use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

const SAMPLE: &str = include_str!("data/english.txt");

fn cyprium_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cyprium"));
    cmd.env_remove("CYPRIUM_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(cyprium_cmd().args(args).output()?)
}

fn stdout_of(output: &Output) -> Result<String, Box<dyn Error>> {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8(output.stdout.clone())?)
}

#[test]
fn version_flag() -> Result<(), Box<dyn Error>> {
    let output = run(&["--version"])?;
    assert!(stdout_of(&output)?.starts_with("cyprium "));
    Ok(())
}

#[test]
fn vigenere_cypher_and_decypher() -> Result<(), Box<dyn Error>> {
    let output = run(&["vigenere", "cypher", "--key", "HACK", "--data", "HELLO WORLD 1024"])?;
    assert_eq!(stdout_of(&output)?, "OENVV WQBSD 1024\n");

    let output = run(&[
        "vigenere", "decypher", "--key", "HACK", "--data", "OENVV WQBSD 1024",
    ])?;
    assert_eq!(stdout_of(&output)?, "HELLO WORLD 1024\n");

    let output = run(&[
        "vigenere", "cypher", "-a", "gronsfeld", "-k", "1024", "--no-spaces", "--data", "hello world",
    ])?;
    assert_eq!(stdout_of(&output)?, "IENPPWQVMD\n");
    Ok(())
}

#[test]
fn vigenere_hack_from_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let plain = dir.path().join("plain.txt");
    let cyphered = dir.path().join("cyphered.txt");
    let recovered = dir.path().join("recovered.txt");
    fs::write(&plain, SAMPLE)?;

    let output = run(&[
        "vigenere", "cypher", "--key", "LEMON",
        "--input", plain.to_str().unwrap(),
        "--output", cyphered.to_str().unwrap(),
    ])?;
    assert!(stdout_of(&output)?.contains("Written to"));

    let output = run(&[
        "vigenere", "decypher", "--language", "en",
        "--input", cyphered.to_str().unwrap(),
    ])?;
    let stdout = stdout_of(&output)?;
    assert!(stdout.starts_with("Key: LEMON\nLanguage: en\n"));

    let output = run(&[
        "vigenere", "decypher",
        "--input", cyphered.to_str().unwrap(),
        "--output", recovered.to_str().unwrap(),
    ])?;
    stdout_of(&output)?;
    assert_eq!(fs::read_to_string(&recovered)?, SAMPLE.trim_end().to_uppercase());
    Ok(())
}

#[test]
fn vigenere_hack_without_spaces() -> Result<(), Box<dyn Error>> {
    let cyphered = stdout_of(&run(&["vigenere", "cypher", "--key", "LEMON", "--data", SAMPLE])?)?;
    let recovered = cyphered.trim_end();

    let dir = tempdir()?;
    let output_path = dir.path().join("plain.txt");
    let output = run(&[
        "vigenere", "decypher", "--length", "5", "--no-spaces",
        "--data", recovered,
        "--output", output_path.to_str().unwrap(),
    ])?;
    stdout_of(&output)?;

    let plain = fs::read_to_string(&output_path)?;
    assert!(plain.starts_with("THEKEEPEROFTHEOLDLIGHTHOUSE"));
    assert!(!plain.contains(' '));
    Ok(())
}

#[test]
fn vigenere_bad_key_fails() -> Result<(), Box<dyn Error>> {
    let output = run(&["vigenere", "cypher", "--key", "1234", "--data", "HELLO"])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.starts_with("Error: Text contains unallowed chars"));

    let output = run(&["vigenere", "cypher", "-a", "enigma", "--key", "A", "--data", "HELLO"])?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn vigenere_demo() -> Result<(), Box<dyn Error>> {
    let stdout = stdout_of(&run(&["vigenere", "demo"])?)?;
    assert!(stdout.contains("HELLO WORLD 1024 - 1024 - gronsfeld"));
    Ok(())
}

#[test]
fn biliteral_round_trip() -> Result<(), Box<dyn Error>> {
    let coded = stdout_of(&run(&["biliteral", "cypher", "--data", "bacon"])?)?;
    assert_eq!(coded, "AAAABAAAAAAAABAABBBAABBAB\n");
    let decoded = stdout_of(&run(&["biliteral", "decypher", "--data", coded.trim()])?)?;
    assert_eq!(decoded, "bacon\n");

    let output = run(&["biliteral", "decypher", "--data", "AAAB"])?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn alphaspaces_hide_and_unhide() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let hidden = dir.path().join("hidden.txt");

    let output = run(&[
        "alphaspaces", "hide", "--data", "cab",
        "--text", "one two three four five six",
        "--output", hidden.to_str().unwrap(),
    ])?;
    stdout_of(&output)?;

    let output = run(&["alphaspaces", "unhide", "--input", hidden.to_str().unwrap()])?;
    assert_eq!(stdout_of(&output)?, "cab\n");

    let output = run(&["alphaspaces", "hide", "--data", "abc", "--text", "a b"])?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("too short"));
    Ok(())
}

#[test]
fn languages_and_profiles_dir() -> Result<(), Box<dyn Error>> {
    let stdout = stdout_of(&run(&["languages"])?)?;
    assert!(stdout.contains("English"));
    assert!(!stdout.contains("Flat"));

    let dir = tempdir()?;
    let profiles = dir.path().join("profiles");
    fs::create_dir(&profiles)?;
    let flat = vec![1.0 / 26.0; 26];
    fs::write(
        profiles.join("xx.json"),
        format!(r#"{{"code": "xx", "name": "Flat", "frequencies": {:?}}}"#, flat),
    )?;
    let config = dir.path().join("cyprium.json");
    fs::write(
        &config,
        format!(r#"{{"profiles_dir": {:?}}}"#, profiles.to_str().unwrap()),
    )?;

    let stdout = stdout_of(&run(&["languages", "--config", config.to_str().unwrap()])?)?;
    assert!(stdout.contains("Flat"));
    Ok(())
}

#[test]
fn invalid_config_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let config = dir.path().join("cyprium.json");
    fs::write(&config, r#"{"max_key_length": 0}"#)?;

    let output = run(&["languages", "--config", config.to_str().unwrap()])?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Invalid settings"));
    Ok(())
}

#[test]
fn about_page() -> Result<(), Box<dyn Error>> {
    let stdout = stdout_of(&run(&["about", "alphaspaces"])?)?;
    assert!(stdout.starts_with("===== About AlphaSpaces ====="));
    Ok(())
}
