//! Catalog: brands, sub-brands, products

pub mod ports;
pub mod service;

pub use service::CatalogService;
