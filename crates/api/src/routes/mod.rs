//! Route wiring

pub mod catalog;
pub mod health;
pub mod plan;
pub mod promotions;
pub mod selections;
pub mod tables;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::context::AppContext;

/// Build the application router.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/plan", get(plan::plan_view))
        .route(
            "/api/promotions",
            get(promotions::list_promotions).post(promotions::create_promotion),
        )
        .route(
            "/api/promotions/{id}",
            get(promotions::get_promotion)
                .patch(promotions::update_promotion)
                .delete(promotions::delete_promotion),
        )
        .route("/api/catalog", get(catalog::catalog_tree))
        .route("/api/tables", get(tables::list_tables))
        .route(
            "/api/selections",
            get(selections::load_selections).put(selections::save_selections),
        )
        .with_state(ctx)
}
