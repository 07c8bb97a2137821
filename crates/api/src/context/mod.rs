//! Application context (dependency injection)
//!
//! One explicit object owns every wired service; handlers receive it as
//! axum state. No global mutable state anywhere.

use std::sync::Arc;
use std::time::Duration;

use promoboard_core::catalog::ports::CatalogRepository;
use promoboard_core::planning::ports::{DisplayTableRepository, PromotionRepository};
use promoboard_core::selections::ports::SelectionStore;
use promoboard_core::{CatalogService, PlanningService};
use promoboard_domain::{Config, PromoboardError, Result};
use promoboard_infra::remote::auth::EnvTokenProvider;
use promoboard_infra::remote::client::{RestClient, RestClientConfig};
use promoboard_infra::remote::{CatalogStore, DisplayTableStore, PromotionStore};
use promoboard_infra::FileSelectionStore;
use tracing::info;

/// Environment variable holding the remote-store bearer token
const ACCESS_TOKEN_VAR: &str = "PROMOBOARD_ACCESS_TOKEN";

/// Catalog lists rarely change; five minutes keeps picker opens cheap
const CATALOG_TTL: Duration = Duration::from_secs(300);

/// Application context
pub struct AppContext {
    pub config: Config,
    pub planning: Arc<PlanningService>,
    pub catalog: Arc<CatalogService>,
    pub promotions: Arc<dyn PromotionRepository>,
    pub tables: Arc<dyn DisplayTableRepository>,
    pub selections: Arc<dyn SelectionStore>,
}

impl AppContext {
    /// Wire the full production stack from configuration.
    ///
    /// # Errors
    /// Returns `Config` when the remote client cannot be built.
    pub fn new(config: Config, current_user: Option<String>) -> Result<Self> {
        let rest_config = RestClientConfig {
            base_url: config.remote.base_url.clone(),
            api_key: config.remote.api_key.clone(),
            timeout: Duration::from_secs(config.remote.timeout_seconds),
            ..RestClientConfig::default()
        };
        let client = Arc::new(
            RestClient::new(rest_config, Arc::new(EnvTokenProvider::new(ACCESS_TOKEN_VAR)))
                .map_err(|e| PromoboardError::Config(e.to_string()))?,
        );

        let promotions: Arc<dyn PromotionRepository> =
            Arc::new(PromotionStore::new(Arc::clone(&client)));
        let tables: Arc<dyn DisplayTableRepository> =
            Arc::new(DisplayTableStore::new(Arc::clone(&client)));
        let catalog_repo: Arc<dyn CatalogRepository> =
            Arc::new(CatalogStore::new(Arc::clone(&client), CATALOG_TTL));
        let selections: Arc<dyn SelectionStore> =
            Arc::new(FileSelectionStore::new(config.selections.path.clone()));

        info!(base_url = %config.remote.base_url, "application context wired");

        Ok(Self::from_parts(config, promotions, tables, catalog_repo, selections, current_user))
    }

    /// Wire a context from explicit ports (tests, alternative backends).
    pub fn from_parts(
        config: Config,
        promotions: Arc<dyn PromotionRepository>,
        tables: Arc<dyn DisplayTableRepository>,
        catalog_repo: Arc<dyn CatalogRepository>,
        selections: Arc<dyn SelectionStore>,
        current_user: Option<String>,
    ) -> Self {
        let mut planning =
            PlanningService::new(Arc::clone(&promotions), Arc::clone(&tables));
        if let Some(user) = current_user {
            planning = planning.with_current_user(user);
        }

        Self {
            config,
            planning: Arc::new(planning),
            catalog: Arc::new(CatalogService::new(catalog_repo)),
            promotions,
            tables,
            selections,
        }
    }
}
