use crate::error::{CypriumError, Result};
use crate::vigenere::AUTOCLAVE_SEED_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a settings file when `--config` isn't given
pub const CONFIG_ENV: &str = "CYPRIUM_CONFIG";

/// Tunables for cryptanalysis and profile loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Longest key length tried when the length is unknown
    pub max_key_length: usize,
    /// How many estimated lengths are handed to key recovery
    pub candidate_lengths: usize,
    /// Below this confidence a recovered key is reported as a failure
    pub min_confidence: f64,
    /// Longest Autoclave seed key tried
    pub autoclave_max_seed: usize,
    /// Directory of extra `*.json` language profiles
    pub profiles_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_key_length: 20,
            candidate_lengths: 5,
            min_confidence: 0.6,
            autoclave_max_seed: 8,
            profiles_dir: None,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&data)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path`, else from `$CYPRIUM_CONFIG`, else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(p) => Self::load(Path::new(&p)),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_key_length == 0 {
            return Err(CypriumError::InvalidSettings(
                "max_key_length must be at least 1".into(),
            ));
        }
        if self.candidate_lengths == 0 {
            return Err(CypriumError::InvalidSettings(
                "candidate_lengths must be at least 1".into(),
            ));
        }
        if self.autoclave_max_seed == 0 || self.autoclave_max_seed > AUTOCLAVE_SEED_LIMIT {
            return Err(CypriumError::InvalidSettings(format!(
                "autoclave_max_seed must be between 1 and {}",
                AUTOCLAVE_SEED_LIMIT
            )));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(CypriumError::InvalidSettings(format!(
                "min_confidence {} is not within [0, 1]",
                self.min_confidence
            )));
        }
        Ok(())
    }
}
