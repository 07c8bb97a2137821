//! Remote-store authentication seam
//!
//! Token issuance (login flows, refresh) lives outside this workspace; the
//! adapters only need something that yields a currently-valid bearer token.

use async_trait::async_trait;

use super::errors::RemoteError;

/// Trait for providing access tokens
///
/// Allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    async fn access_token(&self) -> Result<String, RemoteError>;
}

/// Fixed token, for service accounts and tests
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, RemoteError> {
        Ok(self.token.clone())
    }
}

/// Token read from an environment variable on every call, so a rotated
/// credential is picked up without a restart
pub struct EnvTokenProvider {
    variable: String,
}

impl EnvTokenProvider {
    pub fn new(variable: impl Into<String>) -> Self {
        Self { variable: variable.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for EnvTokenProvider {
    async fn access_token(&self) -> Result<String, RemoteError> {
        std::env::var(&self.variable).map_err(|_| {
            RemoteError::Auth(format!("access token variable {} is not set", self.variable))
        })
    }
}
