//! # Promoboard App
//!
//! HTTP boundary - routes and application context.
//!
//! This crate contains:
//! - Route handlers (browser front end → services bridge)
//! - Application context (dependency injection)
//! - Main entry point and setup
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Converts every failure into a user-visible message at the handler
//!   boundary

pub mod context;
pub mod error;
pub mod routes;

// Re-export for convenience
pub use context::AppContext;
pub use error::AppError;
pub use routes::router;
