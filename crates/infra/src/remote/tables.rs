//! Display-table repository backed by the remote store

use std::sync::Arc;

use async_trait::async_trait;
use promoboard_core::planning::ports::DisplayTableRepository;
use promoboard_domain::{DisplayTable, PromoboardError, Result};

use super::client::RestClient;
use super::errors::RemoteError;

const TABLES_PATH: &str = "/display_tables";

/// Remote-store display-table repository
pub struct DisplayTableStore {
    client: Arc<RestClient>,
}

impl DisplayTableStore {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DisplayTableRepository for DisplayTableStore {
    async fn list(&self, ids: &[String]) -> Result<Vec<DisplayTable>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let params = vec![
            ("select".to_string(), "*".to_string()),
            ("id".to_string(), format!("in.({})", ids.join(","))),
        ];
        let rows: Vec<DisplayTable> =
            self.client.select(TABLES_PATH, &params).await.map_err(PromoboardError::from)?;
        Ok(rows)
    }

    async fn get(&self, id: &str) -> Result<DisplayTable> {
        let params = vec![
            ("select".to_string(), "*".to_string()),
            ("id".to_string(), format!("eq.{id}")),
            ("limit".to_string(), "1".to_string()),
        ];
        let mut rows: Vec<DisplayTable> =
            self.client.select(TABLES_PATH, &params).await.map_err(PromoboardError::from)?;
        rows.pop().ok_or_else(|| RemoteError::NotFound(format!("display table {id}")).into())
    }
}

#[cfg(test)]
mod tests {
    use promoboard_domain::PromoboardError;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::remote::auth::StaticTokenProvider;
    use crate::remote::client::RestClientConfig;

    fn store_for(server: &MockServer) -> DisplayTableStore {
        let config = RestClientConfig { base_url: server.uri(), ..Default::default() };
        let client =
            RestClient::new(config, Arc::new(StaticTokenProvider::new("test-token"))).unwrap();
        DisplayTableStore::new(Arc::new(client))
    }

    #[tokio::test]
    async fn list_batches_ids_into_one_in_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/display_tables"))
            .and(query_param("id", "in.(t1,t2)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "t1", "title": "A", "header": ["x"], "body": ["1"] },
                { "id": "t2", "title": "B", "header": [], "body": [["2"]] }
            ])))
            .mount(&server)
            .await;

        let store = store_for(&server);
        let tables = store.list(&["t1".to_string(), "t2".to_string()]).await.unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].title, "A");
    }

    #[tokio::test]
    async fn empty_id_set_skips_the_network() {
        let server = MockServer::start().await;
        // No mock mounted: any request would fail the test.
        let store = store_for(&server);
        let tables = store.list(&[]).await.unwrap();
        assert!(tables.is_empty());
    }

    #[tokio::test]
    async fn get_maps_missing_table_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/display_tables"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let store = store_for(&server);
        let result = store.get("ghost").await;
        assert!(matches!(result, Err(PromoboardError::NotFound(_))));
    }
}
