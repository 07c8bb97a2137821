//! Catalog repository backed by the remote store, with a TTL cache
//!
//! Catalog records change rarely and are fetched on every picker open, so
//! the lists sit in a short TTL cache. The cache is transient and
//! rebuildable; invalidation after a write is a courtesy, not a correctness
//! requirement.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use promoboard_core::catalog::ports::CatalogRepository;
use promoboard_domain::{Brand, PromoboardError, Product, Result, SubBrand};
use tracing::debug;

use super::client::RestClient;

const BRANDS_PATH: &str = "/brands";
const SUB_BRANDS_PATH: &str = "/sub_brands";
const PRODUCTS_PATH: &str = "/products";

/// Remote-store catalog repository with per-list TTL caching
pub struct CatalogStore {
    client: Arc<RestClient>,
    brands: Cache<(), Arc<Vec<Brand>>>,
    sub_brands: Cache<(), Arc<Vec<SubBrand>>>,
    products: Cache<(), Arc<Vec<Product>>>,
}

impl CatalogStore {
    pub fn new(client: Arc<RestClient>, ttl: Duration) -> Self {
        Self {
            client,
            brands: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            sub_brands: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            products: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
        }
    }

    /// Drop all cached lists (called after catalog writes)
    pub fn invalidate(&self) {
        self.brands.invalidate_all();
        self.sub_brands.invalidate_all();
        self.products.invalidate_all();
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let params = vec![("select".to_string(), "*".to_string())];
        let rows: Vec<T> = self.client.select(path, &params).await.map_err(PromoboardError::from)?;
        Ok(rows)
    }
}

#[async_trait]
impl CatalogRepository for CatalogStore {
    async fn brands(&self) -> Result<Vec<Brand>> {
        if let Some(cached) = self.brands.get(&()).await {
            debug!("brands served from cache");
            return Ok(cached.as_ref().clone());
        }
        let rows = self.fetch(BRANDS_PATH).await?;
        self.brands.insert((), Arc::new(rows.clone())).await;
        Ok(rows)
    }

    async fn sub_brands(&self) -> Result<Vec<SubBrand>> {
        if let Some(cached) = self.sub_brands.get(&()).await {
            debug!("sub-brands served from cache");
            return Ok(cached.as_ref().clone());
        }
        let rows = self.fetch(SUB_BRANDS_PATH).await?;
        self.sub_brands.insert((), Arc::new(rows.clone())).await;
        Ok(rows)
    }

    async fn products(&self) -> Result<Vec<Product>> {
        if let Some(cached) = self.products.get(&()).await {
            debug!("products served from cache");
            return Ok(cached.as_ref().clone());
        }
        let rows = self.fetch(PRODUCTS_PATH).await?;
        self.products.insert((), Arc::new(rows.clone())).await;
        Ok(rows)
    }
}
