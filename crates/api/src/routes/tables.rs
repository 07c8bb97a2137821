//! Display-table routes

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use promoboard_core::tables::table_rows;
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct TableQuery {
    /// Comma-separated table ids
    #[serde(default)]
    pub ids: String,
}

/// A table with its body already reshaped for rendering
#[derive(Serialize)]
pub struct TableView {
    pub id: String,
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub async fn list_tables(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<TableQuery>,
) -> Result<Json<Vec<TableView>>, AppError> {
    let ids: Vec<String> = query
        .ids
        .split(',')
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    let tables = ctx.tables.list(&ids).await?;
    let views = tables
        .into_iter()
        .map(|table| TableView {
            rows: table_rows(&table),
            id: table.id,
            title: table.title,
            header: table.header,
        })
        .collect();
    Ok(Json(views))
}
