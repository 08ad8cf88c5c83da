use thiserror::Error;

use crate::core::types::AllianceId;

#[derive(Error, Debug)]
pub enum AidError {
    #[error("Snapshot provider failed for alliance {alliance}: {reason}")]
    ProviderError { alliance: AllianceId, reason: String },

    #[error("Offer ledger unavailable: {0}")]
    LedgerError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AidError>;
