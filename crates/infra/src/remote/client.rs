//! REST client for the hosted data store
//!
//! Speaks PostgREST conventions: filters travel as query parameters, writes
//! ask for `return=representation` so the stored row comes back, and every
//! request carries the project api key plus a bearer token. Calls run behind
//! a circuit breaker so a flapping backend fails fast.

use std::sync::Arc;
use std::time::Duration;

use promoboard_common::resilience::{CircuitBreaker, CircuitBreakerConfig, ResilienceError};
use promoboard_domain::PromoboardError;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::auth::AccessTokenProvider;
use super::errors::RemoteError;
use crate::http::HttpClient;

/// Configuration for the remote-store client
#[derive(Debug, Clone)]
pub struct RestClientConfig {
    /// Base URL of the store's REST endpoint (e.g. "https://project.example.co/rest/v1")
    pub base_url: String,
    /// Project api key sent as the `apikey` header
    pub api_key: Option<String>,
    /// Timeout for one logical call (including internal retries)
    pub timeout: Duration,
    /// Circuit breaker configuration
    pub circuit_breaker: CircuitBreakerConfig,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            timeout: Duration::from_secs(30),
            circuit_breaker: CircuitBreakerConfig::default(),
        }
    }
}

/// Remote-store REST client
pub struct RestClient {
    http: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    config: RestClientConfig,
    breaker: Arc<CircuitBreaker>,
}

impl RestClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns `Config` when the HTTP client or circuit breaker cannot be
    /// built.
    pub fn new(
        config: RestClientConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, RemoteError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(3)
            .user_agent("promoboard")
            .build()
            .map_err(|e| RemoteError::Config(format!("failed to build http client: {e}")))?;

        let breaker = CircuitBreaker::new(config.circuit_breaker.clone())
            .map_err(|e| RemoteError::Config(e.to_string()))?;

        Ok(Self { http, auth, config, breaker: Arc::new(breaker) })
    }

    /// Fetch rows matching the given filter parameters
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn select<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Vec<R>, RemoteError> {
        let response = self.execute(Method::GET, path, query, None, false).await?;
        parse_rows(response).await
    }

    /// Insert a row, returning the stored representation
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Vec<R>, RemoteError> {
        let body = encode_body(body)?;
        let response = self.execute(Method::POST, path, &[], Some(body), true).await?;
        parse_rows(response).await
    }

    /// Patch rows matching the filter, returning the stored representations
    #[instrument(skip(self, query, body), fields(path = %path))]
    pub async fn update_where<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        body: &T,
    ) -> Result<Vec<R>, RemoteError> {
        let body = encode_body(body)?;
        let response = self.execute(Method::PATCH, path, query, Some(body), true).await?;
        parse_rows(response).await
    }

    /// Delete rows matching the filter
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn delete_where(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<(), RemoteError> {
        self.execute(Method::DELETE, path, query, None, false).await?;
        Ok(())
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
        want_representation: bool,
    ) -> Result<reqwest::Response, RemoteError> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(%method, %url, "remote store request");

        let http = self.http.clone();
        let auth = Arc::clone(&self.auth);
        let api_key = self.config.api_key.clone();
        let timeout = self.config.timeout;
        let query = query.to_vec();

        let response = self
            .breaker
            .execute(|| {
                let http = http.clone();
                let auth = Arc::clone(&auth);
                let api_key = api_key.clone();
                let method = method.clone();
                let url = url.clone();
                let query = query.clone();
                let body = body.clone();
                async move {
                    // Fetch the token inside the guarded call so a refreshed
                    // credential reaches retried requests
                    let token = auth.access_token().await?;

                    let mut request = http
                        .request(method, &url)
                        .query(&query)
                        .header("Authorization", format!("Bearer {token}"))
                        .header("Content-Type", "application/json");
                    if let Some(key) = &api_key {
                        request = request.header("apikey", key.clone());
                    }
                    if want_representation {
                        request = request.header("Prefer", "return=representation");
                    }
                    if let Some(body) = &body {
                        request = request.json(body);
                    }

                    let response = match tokio::time::timeout(timeout, http.send(request)).await {
                        Ok(Ok(response)) => response,
                        Ok(Err(err)) => return Err(map_transport_error(err)),
                        Err(_) => return Err(RemoteError::Timeout(timeout)),
                    };

                    // Server errors count against the breaker; client errors
                    // are the caller's problem and pass through below
                    let status = response.status();
                    if status.is_server_error() {
                        let body = response.text().await.unwrap_or_default();
                        return Err(map_status_error(status, &url, &body));
                    }
                    Ok(response)
                }
            })
            .await
            .map_err(map_resilience_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &url, &body));
        }
        Ok(response)
    }
}

fn encode_body<T: Serialize>(body: &T) -> Result<Value, RemoteError> {
    serde_json::to_value(body)
        .map_err(|e| RemoteError::Client(format!("failed to serialize body: {e}")))
}

async fn parse_rows<R: DeserializeOwned>(response: reqwest::Response) -> Result<Vec<R>, RemoteError> {
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(Vec::new());
    }
    response
        .json()
        .await
        .map_err(|e| RemoteError::Client(format!("failed to parse response: {e}")))
}

fn map_resilience_error(err: ResilienceError<RemoteError>) -> RemoteError {
    match err {
        ResilienceError::CircuitOpen => RemoteError::CircuitOpen,
        ResilienceError::OperationFailed { source } => source,
    }
}

fn map_transport_error(err: PromoboardError) -> RemoteError {
    match err {
        PromoboardError::Network(message) => RemoteError::Network(message),
        PromoboardError::Auth(message) => RemoteError::Auth(message),
        PromoboardError::Config(message) => RemoteError::Config(message),
        PromoboardError::NotFound(message) => RemoteError::NotFound(message),
        PromoboardError::InvalidInput(message) => RemoteError::Client(message),
        PromoboardError::Store(message) | PromoboardError::Internal(message) => {
            RemoteError::Server(message)
        }
    }
}

fn map_status_error(status: StatusCode, url: &str, body: &str) -> RemoteError {
    let message = if body.is_empty() {
        format!("{url} returned status {status}")
    } else {
        format!("{url} returned status {status}: {body}")
    };

    if status == StatusCode::NOT_FOUND {
        RemoteError::NotFound(message)
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        RemoteError::Auth(message)
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        RemoteError::RateLimit(message)
    } else if status.is_server_error() {
        RemoteError::Server(message)
    } else if status.is_client_error() {
        RemoteError::Client(message)
    } else {
        RemoteError::Network(message)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::remote::auth::StaticTokenProvider;

    fn client_for(server: &MockServer) -> RestClient {
        let config = RestClientConfig { base_url: server.uri(), api_key: Some("anon-key".to_string()), ..Default::default() };
        RestClient::new(config, Arc::new(StaticTokenProvider::new("test-token"))).unwrap()
    }

    #[derive(Debug, Serialize, serde::Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    #[tokio::test]
    async fn select_sends_auth_headers_and_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/promotions"))
            .and(header("Authorization", "Bearer test-token"))
            .and(header("apikey", "anon-key"))
            .and(query_param("status", "in.(public)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![Row { id: "p1".to_string() }]))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let rows: Vec<Row> = client
            .select("/promotions", &[("status".to_string(), "in.(public)".to_string())])
            .await
            .unwrap();

        assert_eq!(rows, vec![Row { id: "p1".to_string() }]);
    }

    #[tokio::test]
    async fn insert_requests_representation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/promotions"))
            .and(header("Prefer", "return=representation"))
            .respond_with(ResponseTemplate::new(201).set_body_json(vec![Row { id: "p2".to_string() }]))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let rows: Vec<Row> =
            client.insert("/promotions", &Row { id: "p2".to_string() }).await.unwrap();
        assert_eq!(rows[0].id, "p2");
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/promotions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result: Result<Vec<Row>, _> = client.select("/promotions", &[]).await;
        assert!(matches!(result, Err(RemoteError::Auth(_))));
    }

    #[tokio::test]
    async fn missing_endpoint_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nothing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result: Result<Vec<Row>, _> = client.select("/nothing", &[]).await;
        assert!(matches!(result, Err(RemoteError::NotFound(_))));
    }

    #[tokio::test]
    async fn breaker_opens_after_repeated_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = RestClientConfig {
            base_url: server.uri(),
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: 1,
                ..CircuitBreakerConfig::default()
            },
            ..Default::default()
        };
        let client =
            RestClient::new(config, Arc::new(StaticTokenProvider::new("test-token"))).unwrap();

        let first: Result<Vec<Row>, _> = client.select("/promotions", &[]).await;
        assert!(matches!(first, Err(RemoteError::Server(_))));

        let second: Result<Vec<Row>, _> = client.select("/promotions", &[]).await;
        assert!(matches!(second, Err(RemoteError::CircuitOpen)));
    }
}
