//! Catalog service - assembles the brand tree
//!
//! The three collections are fetched concurrently and joined all-or-nothing:
//! a failure in any fetch fails the whole load, so the picker never renders
//! a half-populated tree.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::try_join3;
use promoboard_domain::{BrandNode, Catalog, Result, SubBrandNode};
use tracing::debug;

use super::ports::CatalogRepository;

/// Catalog loading service
pub struct CatalogService {
    repository: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    /// Create a new catalog service
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    /// Load and assemble the full catalog tree.
    pub async fn load(&self) -> Result<Catalog> {
        let (brands, sub_brands, products) = try_join3(
            self.repository.brands(),
            self.repository.sub_brands(),
            self.repository.products(),
        )
        .await?;

        debug!(
            brands = brands.len(),
            sub_brands = sub_brands.len(),
            products = products.len(),
            "catalog fetched"
        );

        let mut products_by_parent: BTreeMap<String, Vec<_>> = BTreeMap::new();
        for product in products {
            products_by_parent.entry(product.sub_brand_id.clone()).or_default().push(product);
        }

        let mut sub_brands_by_parent: BTreeMap<String, Vec<SubBrandNode>> = BTreeMap::new();
        for sub_brand in sub_brands {
            let mut products = products_by_parent.remove(&sub_brand.id).unwrap_or_default();
            products.sort_by(|a, b| a.name.cmp(&b.name));
            sub_brands_by_parent
                .entry(sub_brand.brand_id.clone())
                .or_default()
                .push(SubBrandNode { sub_brand, products });
        }

        let mut nodes: Vec<BrandNode> = brands
            .into_iter()
            .map(|brand| {
                let mut sub_brands = sub_brands_by_parent.remove(&brand.id).unwrap_or_default();
                sub_brands.sort_by(|a, b| a.sub_brand.name.cmp(&b.sub_brand.name));
                BrandNode { brand, sub_brands }
            })
            .collect();
        nodes.sort_by(|a, b| a.brand.name.cmp(&b.brand.name));

        Ok(Catalog { brands: nodes })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use promoboard_domain::{Brand, Product, PromoboardError, SubBrand};

    use super::*;

    struct FakeCatalog {
        fail_products: bool,
    }

    #[async_trait]
    impl CatalogRepository for FakeCatalog {
        async fn brands(&self) -> Result<Vec<Brand>> {
            Ok(vec![
                Brand { id: "b2".to_string(), name: "Zephyr".to_string(), logo_url: None },
                Brand { id: "b1".to_string(), name: "Aurora".to_string(), logo_url: None },
            ])
        }

        async fn sub_brands(&self) -> Result<Vec<SubBrand>> {
            Ok(vec![
                SubBrand {
                    id: "s1".to_string(),
                    name: "Aurora Zero".to_string(),
                    brand_id: "b1".to_string(),
                    logo_url: None,
                },
                SubBrand {
                    id: "s2".to_string(),
                    name: "Aurora Classic".to_string(),
                    brand_id: "b1".to_string(),
                    logo_url: None,
                },
            ])
        }

        async fn products(&self) -> Result<Vec<Product>> {
            if self.fail_products {
                return Err(PromoboardError::Network("products fetch failed".to_string()));
            }
            Ok(vec![Product {
                id: "p1".to_string(),
                name: "Aurora Zero 330ml".to_string(),
                sub_brand_id: "s1".to_string(),
                logo_url: None,
                packaging: Some("can".to_string()),
                volume: Some("330ml".to_string()),
            }])
        }
    }

    #[tokio::test]
    async fn assembles_sorted_tree() {
        let service = CatalogService::new(Arc::new(FakeCatalog { fail_products: false }));
        let catalog = service.load().await.unwrap();

        let brand_names: Vec<_> =
            catalog.brands.iter().map(|node| node.brand.name.as_str()).collect();
        assert_eq!(brand_names, vec!["Aurora", "Zephyr"]);

        let aurora = &catalog.brands[0];
        let sub_names: Vec<_> =
            aurora.sub_brands.iter().map(|node| node.sub_brand.name.as_str()).collect();
        assert_eq!(sub_names, vec!["Aurora Classic", "Aurora Zero"]);

        let zero = &aurora.sub_brands[1];
        assert_eq!(zero.products.len(), 1);
        assert_eq!(zero.products[0].packaging.as_deref(), Some("can"));
    }

    #[tokio::test]
    async fn any_failed_fetch_fails_the_whole_load() {
        let service = CatalogService::new(Arc::new(FakeCatalog { fail_products: true }));
        let result = service.load().await;
        assert!(matches!(result, Err(PromoboardError::Network(_))));
    }
}
