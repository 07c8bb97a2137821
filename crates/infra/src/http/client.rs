//! Retrying HTTP client
//!
//! Thin wrapper around reqwest that retries server errors and transient
//! transport failures with exponential backoff. Client errors (4xx) pass
//! straight through: the caller classifies those.

use std::time::Duration;

use promoboard_domain::PromoboardError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with built-in retry and timeout support.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder with retry semantics.
    ///
    /// # Errors
    /// Returns `Network` for transport failures that survive all attempts,
    /// `Internal` when the request body cannot be cloned for a retry.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, PromoboardError> {
        let mut last_error: Option<PromoboardError> = None;

        for attempt in 1..=self.max_attempts {
            let Some(cloned) = builder.try_clone() else {
                return Err(PromoboardError::Internal(
                    "request body cannot be cloned; buffer the body to enable retries".into(),
                ));
            };

            let request = cloned.build().map_err(|err| {
                let infra: InfraError = err.into();
                PromoboardError::from(infra)
            })?;
            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt, %method, %url, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt, %method, %url, %status, "received HTTP response");

                    if status.is_server_error() && attempt < self.max_attempts {
                        last_error = Some(PromoboardError::Network(format!(
                            "{url} returned status {status}"
                        )));
                        self.backoff(attempt).await;
                        continue;
                    }
                    return Ok(response);
                }
                Err(err) => {
                    debug!(attempt, %method, %url, error = %err, "HTTP request failed");
                    let retryable = err.is_timeout() || err.is_connect() || err.is_request();
                    let infra: InfraError = err.into();
                    let mapped = PromoboardError::from(infra);

                    if retryable && attempt < self.max_attempts {
                        last_error = Some(mapped);
                        self.backoff(attempt).await;
                        continue;
                    }
                    return Err(mapped);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            PromoboardError::Internal("http client exhausted retries without a result".into())
        }))
    }

    async fn backoff(&self, completed_attempts: usize) {
        let shift = completed_attempts.saturating_sub(1).min(8) as u32;
        let delay = self.base_backoff.saturating_mul(1 << shift);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `Network` when the underlying reqwest client cannot be built.
    pub fn build(self) -> Result<HttpClient, PromoboardError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            PromoboardError::from(infra)
        })?;

        Ok(HttpClient { client, max_attempts: self.max_attempts.max(1), base_backoff: self.base_backoff })
    }
}
