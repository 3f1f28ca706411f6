use thiserror::Error;

#[derive(Error, Debug)]
pub enum CypriumError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Text contains unallowed chars ({0})")]
    InvalidCharacter(String),

    #[error("No key given")]
    EmptyKey,

    #[error("No text given")]
    EmptyText,

    #[error("Unsupported algorithm: {0}")]
    UnsupportedVariant(String),

    #[error("Unknown language: {0}")]
    LanguageNotFound(String),

    #[error("Key recovery failed: {0}")]
    KeyRecoveryFailed(String),

    #[error("Invalid length: {0}")]
    InvalidLength(String),

    #[error("Invalid code: {0}")]
    InvalidCode(String),

    #[error("Input text is too short: {needed} space groups needed, only {available} available")]
    TextTooShort { needed: usize, available: usize },

    #[error("Invalid language profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, CypriumError>;
