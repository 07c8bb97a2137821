//! Planning view route
//!
//! The quick-filter state travels in the query string exactly as the front
//! end persists it in the URL; the response carries the display-sorted
//! promotions plus the aggregated matrices, with budget row totals already
//! formatted for the summary column.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::Json;
use promoboard_common::format::format_currency;
use promoboard_core::aggregate::CalendarYear;
use promoboard_core::filter::FilterState;
use promoboard_domain::Promotion;
use serde::Serialize;
use tracing::info;

use crate::context::AppContext;
use crate::error::AppError;

#[derive(Serialize)]
pub struct PlanYearView {
    #[serde(flatten)]
    pub calendar: CalendarYear,
    /// Per-row totals, currency-formatted
    pub budget_totals: BTreeMap<String, String>,
}

#[derive(Serialize)]
pub struct PlanView {
    pub filter: FilterState,
    pub promotions: Vec<Promotion>,
    pub years: Vec<PlanYearView>,
}

pub async fn plan_view(
    State(ctx): State<Arc<AppContext>>,
    RawQuery(query): RawQuery,
) -> Result<Json<PlanView>, AppError> {
    let filter = FilterState::from_query_string(query.as_deref().unwrap_or(""));
    info!(filter = %filter.to_query_string(), "building plan view");

    let snapshot = ctx.planning.refresh(&filter).await?;

    let years = snapshot
        .years
        .iter()
        .map(|calendar| PlanYearView {
            budget_totals: calendar
                .budgets
                .rows
                .keys()
                .map(|row| (row.clone(), format_currency(calendar.budgets.row_total(row))))
                .collect(),
            calendar: calendar.clone(),
        })
        .collect();

    Ok(Json(PlanView {
        filter: snapshot.filter.clone(),
        promotions: snapshot.promotions.clone(),
        years,
    }))
}
