//! Saved modal filter selections routes

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use promoboard_domain::SavedSelections;
use tracing::debug;

use crate::context::AppContext;
use crate::error::AppError;

pub async fn load_selections(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<SavedSelections>, AppError> {
    let selections = ctx.selections.load().await?.unwrap_or_default();
    Ok(Json(selections))
}

pub async fn save_selections(
    State(ctx): State<Arc<AppContext>>,
    Json(selections): Json<SavedSelections>,
) -> Result<StatusCode, AppError> {
    ctx.selections.save(&selections).await?;
    debug!("modal filter selections saved");
    Ok(StatusCode::NO_CONTENT)
}
