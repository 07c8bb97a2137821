//! Promotion CRUD routes
//!
//! Form validation runs before any network call; a failing field never
//! reaches the remote store.

use std::sync::Arc;

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::Json;
use promoboard_common::validation::{RangeValidator, StringValidator, ValidationErrors};
use promoboard_core::display::sort_for_display;
use promoboard_core::filter::FilterState;
use promoboard_core::normalize::normalize_promotion;
use promoboard_domain::{Promotion, PromotionDraft, PromoboardError};
use tracing::info;

use crate::context::AppContext;
use crate::error::AppError;

pub async fn list_promotions(
    State(ctx): State<Arc<AppContext>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Promotion>>, AppError> {
    let filter = FilterState::from_query_string(query.as_deref().unwrap_or(""));
    let raw = ctx.promotions.list(&filter.to_query(None)).await?;

    let mut promotions: Vec<Promotion> = raw.into_iter().map(normalize_promotion).collect();
    sort_for_display(&mut promotions);
    Ok(Json(promotions))
}

pub async fn get_promotion(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Promotion>, AppError> {
    let raw = ctx.promotions.get(&id).await?;
    Ok(Json(normalize_promotion(raw)))
}

pub async fn create_promotion(
    State(ctx): State<Arc<AppContext>>,
    Json(draft): Json<PromotionDraft>,
) -> Result<(StatusCode, Json<Promotion>), AppError> {
    validate_draft(&draft, true)?;

    let raw = ctx.promotions.create(&draft).await?;
    let promotion = normalize_promotion(raw);
    info!(id = %promotion.id, "promotion created");
    Ok((StatusCode::CREATED, Json(promotion)))
}

pub async fn update_promotion(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(draft): Json<PromotionDraft>,
) -> Result<Json<Promotion>, AppError> {
    validate_draft(&draft, false)?;

    let raw = ctx.promotions.update(&id, &draft).await?;
    info!(id = %id, "promotion updated");
    Ok(Json(normalize_promotion(raw)))
}

pub async fn delete_promotion(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    ctx.promotions.delete(&id).await?;
    info!(id = %id, "promotion deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Validate a draft before it goes anywhere near the store.
///
/// `require_name` distinguishes creation (name mandatory) from a partial
/// patch, which only validates the fields it carries.
fn validate_draft(draft: &PromotionDraft, require_name: bool) -> Result<(), AppError> {
    let mut errors = ValidationErrors::new();
    let name_rule = StringValidator::new().not_empty().max_length(120);

    match &draft.name {
        Some(name) => errors.check("name", name, &name_rule),
        None if require_name => errors.add("name", "Value cannot be empty"),
        None => {}
    }

    if let (Some(start), Some(end)) = (draft.start_date, draft.end_date) {
        if end < start {
            errors.add("end_date", "End date must not precede the start date");
        }
    }

    if let Some(link) = draft.link.as_deref() {
        if !link.is_empty() && url::Url::parse(link).is_err() {
            errors.add("link", "Link must be a valid URL");
        }
    }

    if let Some(budget) = &draft.budget {
        let amount_rule = RangeValidator::new().min(0.0);
        for amount in budget {
            errors.check("budget", amount, &amount_rule);
        }
    }

    if let (Some(budget), Some(types)) = (&draft.budget, &draft.promo_budget_type) {
        if types.len() > budget.len() {
            errors.add("promo_budget_type", "More budget types than budget amounts");
        }
    }

    match errors.into_message() {
        None => Ok(()),
        Some(message) => Err(AppError(PromoboardError::InvalidInput(message))),
    }
}
