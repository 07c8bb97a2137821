//! Infrastructure error types

use promoboard_domain::PromoboardError;
use thiserror::Error;

/// Errors raised by infrastructure plumbing before they reach a boundary
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<InfraError> for PromoboardError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Transport(e) => Self::Network(e.to_string()),
            InfraError::Io(e) => Self::Store(e.to_string()),
            InfraError::Serialization(e) => Self::Store(e.to_string()),
            InfraError::Config(message) => Self::Config(message),
        }
    }
}
