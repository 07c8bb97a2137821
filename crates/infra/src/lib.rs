//! # Promoboard Infra
//!
//! Infrastructure adapters behind the core's port traits.
//!
//! This crate contains:
//! - A retrying HTTP client (reqwest)
//! - The remote-store REST client and repository implementations
//! - The file-backed selection store
//! - The configuration loader

pub mod config;
pub mod errors;
pub mod http;
pub mod remote;
pub mod store;

pub use errors::InfraError;
pub use http::HttpClient;
pub use remote::auth::{AccessTokenProvider, EnvTokenProvider, StaticTokenProvider};
pub use remote::client::{RestClient, RestClientConfig};
pub use remote::{CatalogStore, DisplayTableStore, PromotionStore};
pub use store::FileSelectionStore;
