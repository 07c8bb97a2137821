//! Catalog entities: brands, sub-brands, products
//!
//! Simple parent/child records; the catalog service assembles them into a
//! tree for the picker UI.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Brand {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SubBrand {
    pub id: String,
    pub name: String,
    pub brand_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sub_brand_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
}

/// A sub-brand with its products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubBrandNode {
    #[serde(flatten)]
    pub sub_brand: SubBrand,
    pub products: Vec<Product>,
}

/// A brand with its sub-brand subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandNode {
    #[serde(flatten)]
    pub brand: Brand,
    pub sub_brands: Vec<SubBrandNode>,
}

/// The assembled catalog tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Catalog {
    pub brands: Vec<BrandNode>,
}
