//! Port interface for catalog access

use async_trait::async_trait;
use promoboard_domain::{Brand, Product, Result, SubBrand};

/// Trait for fetching catalog records
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn brands(&self) -> Result<Vec<Brand>>;

    async fn sub_brands(&self) -> Result<Vec<SubBrand>>;

    async fn products(&self) -> Result<Vec<Product>>;
}
