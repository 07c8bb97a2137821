//! Catalog route

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use promoboard_domain::Catalog;

use crate::context::AppContext;
use crate::error::AppError;

pub async fn catalog_tree(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Catalog>, AppError> {
    let catalog = ctx.catalog.load().await?;
    Ok(Json(catalog))
}
