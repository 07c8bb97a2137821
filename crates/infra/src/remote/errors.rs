//! Remote-store error classification

use std::time::Duration;

use promoboard_domain::PromoboardError;
use thiserror::Error;

/// Errors from remote-store operations
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Circuit breaker open")]
    CircuitOpen,
}

/// Boundary conversion: route handlers and services speak `PromoboardError`.
///
/// Row-level access denials surface as NotFound by design - the store
/// answers "no such row" rather than "forbidden" for rows the user cannot
/// see.
impl From<RemoteError> for PromoboardError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Auth(message) => Self::Auth(message),
            RemoteError::NotFound(message) => Self::NotFound(message),
            RemoteError::Config(message) => Self::Config(message),
            RemoteError::Client(message) => Self::InvalidInput(message),
            RemoteError::RateLimit(message) | RemoteError::Server(message) | RemoteError::Network(message) => {
                Self::Network(message)
            }
            RemoteError::Timeout(duration) => {
                Self::Network(format!("remote store timed out after {duration:?}"))
            }
            RemoteError::CircuitOpen => {
                Self::Network("remote store temporarily unavailable".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_stays_not_found_at_the_boundary() {
        let mapped = PromoboardError::from(RemoteError::NotFound("promotions/p1".to_string()));
        assert!(matches!(mapped, PromoboardError::NotFound(_)));
    }

    #[test]
    fn transport_classes_collapse_to_network() {
        for err in [
            RemoteError::Server("500".to_string()),
            RemoteError::RateLimit("429".to_string()),
            RemoteError::Network("refused".to_string()),
            RemoteError::CircuitOpen,
        ] {
            assert!(matches!(PromoboardError::from(err), PromoboardError::Network(_)));
        }
    }
}
