//! Language letter-frequency profiles.
//!
//! The cryptanalysis code never looks languages up by itself: a
//! [`LanguageProvider`] is passed into every call. [`Languages`] is the
//! provided implementation, built from the embedded tables and/or a
//! directory of JSON profile files.

use crate::alphabet::ALPHABET_SIZE;
use crate::config::Settings;
use crate::error::{CypriumError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Allowed deviation of a frequency table's sum from 1
const SUM_TOLERANCE: f64 = 1e-3;

/// Lowest frequency used when scoring, so rare letters don't explode chi-squared
const FREQUENCY_FLOOR: f64 = 5e-4;

const ENGLISH: [f64; ALPHABET_SIZE] = [
    0.08167, 0.01492, 0.02782, 0.04253, 0.12702, 0.02228, 0.02015,
    0.06094, 0.06966, 0.00153, 0.00772, 0.04025, 0.02406, 0.06749,
    0.07507, 0.01929, 0.00095, 0.05987, 0.06327, 0.09056, 0.02758,
    0.00978, 0.02360, 0.00150, 0.01974, 0.00074,
];

const FRENCH: [f64; ALPHABET_SIZE] = [
    0.07854, 0.00927, 0.03353, 0.03774, 0.15135, 0.01096, 0.00891,
    0.00758, 0.07744, 0.00630, 0.00076, 0.05612, 0.03053, 0.07297,
    0.05961, 0.02593, 0.01401, 0.06884, 0.08175, 0.07451, 0.06491,
    0.01890, 0.00050, 0.00439, 0.00132, 0.00335,
];

const GERMAN: [f64; ALPHABET_SIZE] = [
    0.06671, 0.01931, 0.02797, 0.05197, 0.16786, 0.01695, 0.03080,
    0.04686, 0.06706, 0.00274, 0.01451, 0.03519, 0.02594, 0.10008,
    0.02656, 0.00686, 0.00018, 0.07169, 0.07443, 0.06300, 0.04265,
    0.00866, 0.01967, 0.00035, 0.00040, 0.01161,
];

const SPANISH: [f64; ALPHABET_SIZE] = [
    0.11879, 0.02283, 0.04142, 0.05164, 0.12555, 0.00713, 0.01822,
    0.00725, 0.06439, 0.00508, 0.00011, 0.05119, 0.03254, 0.06918,
    0.08950, 0.02587, 0.00904, 0.07082, 0.08222, 0.04774, 0.03017,
    0.01173, 0.00018, 0.00222, 0.01039, 0.00481,
];

const ITALIAN: [f64; ALPHABET_SIZE] = [
    0.11874, 0.00937, 0.04551, 0.03777, 0.11922, 0.01166, 0.01662,
    0.00643, 0.10255, 0.00011, 0.00009, 0.06582, 0.02540, 0.06959,
    0.09940, 0.03090, 0.00511, 0.06437, 0.05036, 0.05685, 0.03044,
    0.02120, 0.00033, 0.00003, 0.00020, 0.01194,
];

/// Embedded profiles: (code, name, frequencies A-Z)
pub const BUILTIN: [(&str, &str, &[f64; ALPHABET_SIZE]); 5] = [
    ("en", "English", &ENGLISH),
    ("fr", "French", &FRENCH),
    ("de", "German", &GERMAN),
    ("es", "Spanish", &SPANISH),
    ("it", "Italian", &ITALIAN),
];

/// Reference letter distribution of a language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProfile", into = "RawProfile")]
pub struct LanguageProfile {
    code: String,
    name: String,
    frequencies: [f64; ALPHABET_SIZE],
    expected_ic: f64,
}

/// On-disk shape of a profile, validated into [`LanguageProfile`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawProfile {
    code: String,
    #[serde(default)]
    name: Option<String>,
    frequencies: Vec<f64>,
    #[serde(default)]
    expected_ic: Option<f64>,
}

impl LanguageProfile {
    /// Build a profile, checking the table has 26 non-negative entries summing to 1
    pub fn new(code: &str, name: &str, frequencies: &[f64]) -> Result<Self> {
        if code.trim().is_empty() {
            return Err(CypriumError::InvalidProfile("empty language code".into()));
        }
        if frequencies.len() != ALPHABET_SIZE {
            return Err(CypriumError::InvalidProfile(format!(
                "{}: expected {} frequencies, got {}",
                code,
                ALPHABET_SIZE,
                frequencies.len()
            )));
        }
        if frequencies.iter().any(|f| !f.is_finite() || *f < 0.0) {
            return Err(CypriumError::InvalidProfile(format!(
                "{}: frequencies must be finite and non-negative",
                code
            )));
        }
        let sum: f64 = frequencies.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(CypriumError::InvalidProfile(format!(
                "{}: frequencies sum to {:.4}, expected 1",
                code, sum
            )));
        }

        let mut table = [0.0; ALPHABET_SIZE];
        table.copy_from_slice(frequencies);
        Ok(Self::from_table(code, name, &table))
    }

    /// Build from a table already known to be valid, normalizing it exactly
    fn from_table(code: &str, name: &str, table: &[f64; ALPHABET_SIZE]) -> Self {
        let sum: f64 = table.iter().sum();
        let mut frequencies = [0.0; ALPHABET_SIZE];
        for (dst, src) in frequencies.iter_mut().zip(table.iter()) {
            *dst = src / sum;
        }
        let expected_ic = frequencies.iter().map(|f| f * f).sum();
        Self {
            code: code.trim().to_lowercase(),
            name: name.to_string(),
            frequencies,
            expected_ic,
        }
    }

    /// Override the expected monographic index of coincidence
    pub fn with_expected_ic(mut self, expected_ic: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&expected_ic) || expected_ic == 0.0 {
            return Err(CypriumError::InvalidProfile(format!(
                "{}: expected IC {} out of range",
                self.code, expected_ic
            )));
        }
        self.expected_ic = expected_ic;
        Ok(self)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frequencies(&self) -> &[f64; ALPHABET_SIZE] {
        &self.frequencies
    }

    pub fn expected_ic(&self) -> f64 {
        self.expected_ic
    }

    /// Chi-squared distance per symbol between observed counts and this profile.
    ///
    /// Equals `Σ (oᵢ − fᵢ)² / fᵢ` over observed proportions `oᵢ`, which keeps
    /// columns of different sizes comparable.
    pub fn distance(&self, counts: &[usize; ALPHABET_SIZE], total: usize) -> f64 {
        if total == 0 {
            return f64::INFINITY;
        }
        let n = total as f64;
        counts
            .iter()
            .zip(self.frequencies.iter())
            .map(|(&count, &f)| {
                let expected = f.max(FREQUENCY_FLOOR);
                let diff = count as f64 / n - expected;
                diff * diff / expected
            })
            .sum()
    }

    /// Natural-log likelihood ratio of the observed letters under this profile
    /// against uniformly random letters.
    pub fn log_likelihood_ratio(&self, counts: &[usize; ALPHABET_SIZE]) -> f64 {
        counts
            .iter()
            .zip(self.frequencies.iter())
            .filter(|(&count, _)| count > 0)
            .map(|(&count, &f)| count as f64 * (ALPHABET_SIZE as f64 * f.max(FREQUENCY_FLOOR)).ln())
            .sum()
    }

    /// Expected likelihood ratio per letter of genuine text (KL divergence from uniform)
    pub fn information(&self) -> f64 {
        self.frequencies
            .iter()
            .filter(|&&f| f > 0.0)
            .map(|&f| f * (ALPHABET_SIZE as f64 * f).ln())
            .sum()
    }

    /// Distance of a perfectly flat distribution; the "no language" reference
    pub fn flat_distance(&self) -> f64 {
        let uniform = 1.0 / ALPHABET_SIZE as f64;
        self.frequencies
            .iter()
            .map(|&f| {
                let expected = f.max(FREQUENCY_FLOOR);
                let diff = uniform - expected;
                diff * diff / expected
            })
            .sum()
    }
}

impl TryFrom<RawProfile> for LanguageProfile {
    type Error = CypriumError;

    fn try_from(raw: RawProfile) -> Result<Self> {
        let name = raw.name.unwrap_or_else(|| raw.code.clone());
        let profile = LanguageProfile::new(&raw.code, &name, &raw.frequencies)?;
        match raw.expected_ic {
            Some(ic) => profile.with_expected_ic(ic),
            None => Ok(profile),
        }
    }
}

impl From<LanguageProfile> for RawProfile {
    fn from(profile: LanguageProfile) -> Self {
        RawProfile {
            code: profile.code,
            name: Some(profile.name),
            frequencies: profile.frequencies.to_vec(),
            expected_ic: Some(profile.expected_ic),
        }
    }
}

/// Source of language profiles for the cryptanalysis code
pub trait LanguageProvider {
    /// Profile for a language code (case-insensitive)
    fn get_profile(&self, code: &str) -> Result<&LanguageProfile>;

    /// All known language codes, in a stable order
    fn list_languages(&self) -> Vec<&str>;

    /// Mean expected IC over all languages, used when the language is unknown
    fn mean_expected_ic(&self) -> Option<f64> {
        let codes = self.list_languages();
        let ics: Vec<f64> = codes
            .iter()
            .filter_map(|code| self.get_profile(code).ok())
            .map(|p| p.expected_ic())
            .collect();
        if ics.is_empty() {
            None
        } else {
            Some(ics.iter().sum::<f64>() / ics.len() as f64)
        }
    }
}

/// Ordered set of language profiles keyed by code
#[derive(Debug, Clone, Default)]
pub struct Languages {
    profiles: BTreeMap<String, LanguageProfile>,
}

impl Languages {
    pub fn new() -> Self {
        Self::default()
    }

    /// The embedded English, French, German, Spanish and Italian profiles
    pub fn builtin() -> Self {
        let mut languages = Self::new();
        for (code, name, table) in BUILTIN.iter() {
            languages.insert(LanguageProfile::from_table(code, name, table));
        }
        languages
    }

    /// Load every `*.json` profile of a directory
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().map_or(false, |ext| ext == "json"))
            .collect();
        paths.sort();

        let mut languages = Self::new();
        for path in paths {
            let data = std::fs::read_to_string(&path)?;
            let profile: LanguageProfile = serde_json::from_str(&data)?;
            debug!(code = profile.code(), path = %path.display(), "loaded language profile");
            languages.insert(profile);
        }
        Ok(languages)
    }

    /// Builtin profiles, extended or overridden by the configured directory
    pub fn load(settings: &Settings) -> Result<Self> {
        let mut languages = Self::builtin();
        if let Some(dir) = &settings.profiles_dir {
            for (_, profile) in Self::from_dir(dir)?.profiles {
                languages.insert(profile);
            }
        }
        Ok(languages)
    }

    /// Add a profile, replacing any previous one with the same code
    pub fn insert(&mut self, profile: LanguageProfile) {
        self.profiles.insert(profile.code.clone(), profile);
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageProfile> {
        self.profiles.values()
    }
}

impl LanguageProvider for Languages {
    fn get_profile(&self, code: &str) -> Result<&LanguageProfile> {
        self.profiles
            .get(&code.trim().to_lowercase())
            .ok_or_else(|| CypriumError::LanguageNotFound(code.to_string()))
    }

    fn list_languages(&self) -> Vec<&str> {
        self.profiles.keys().map(|k| k.as_str()).collect()
    }
}
