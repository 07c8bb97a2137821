//! Promotion repository backed by the remote store
//!
//! Translates [`PromotionQuery`] into PostgREST filter parameters:
//! `in.(...)` for inclusion filters, `ov.{...}` ("overlaps") for
//! array-contains-any, start-date bounds for the year filter, and an
//! `or=(...)` disjunction for the "mine" pseudo-filter. Everything else
//! composes by conjunction.

use std::sync::Arc;

use async_trait::async_trait;
use promoboard_core::planning::ports::{PromotionQuery, PromotionRepository};
use promoboard_domain::{PromoboardError, PromotionDraft, RawPromotion, Result};
use tracing::debug;

use super::client::RestClient;
use super::errors::RemoteError;

const PROMOTIONS_PATH: &str = "/promotions";

/// Remote-store promotion repository
pub struct PromotionStore {
    client: Arc<RestClient>,
}

impl PromotionStore {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PromotionRepository for PromotionStore {
    async fn list(&self, query: &PromotionQuery) -> Result<Vec<RawPromotion>> {
        let params = filter_params(query);
        debug!(?params, "listing promotions");
        let rows: Vec<RawPromotion> =
            self.client.select(PROMOTIONS_PATH, &params).await.map_err(PromoboardError::from)?;
        Ok(rows)
    }

    async fn get(&self, id: &str) -> Result<RawPromotion> {
        let params = vec![
            ("select".to_string(), "*".to_string()),
            ("id".to_string(), format!("eq.{id}")),
            ("limit".to_string(), "1".to_string()),
        ];
        let mut rows: Vec<RawPromotion> =
            self.client.select(PROMOTIONS_PATH, &params).await.map_err(PromoboardError::from)?;
        // Rows hidden by row-level access come back as an empty set, which
        // is indistinguishable from - and treated as - not found
        rows.pop().ok_or_else(|| RemoteError::NotFound(format!("promotion {id}")).into())
    }

    async fn create(&self, draft: &PromotionDraft) -> Result<RawPromotion> {
        let mut rows: Vec<RawPromotion> =
            self.client.insert(PROMOTIONS_PATH, draft).await.map_err(PromoboardError::from)?;
        rows.pop()
            .ok_or_else(|| RemoteError::Server("insert returned no representation".to_string()).into())
    }

    async fn update(&self, id: &str, draft: &PromotionDraft) -> Result<RawPromotion> {
        let params = vec![("id".to_string(), format!("eq.{id}"))];
        let mut rows: Vec<RawPromotion> = self
            .client
            .update_where(PROMOTIONS_PATH, &params, draft)
            .await
            .map_err(PromoboardError::from)?;
        rows.pop().ok_or_else(|| RemoteError::NotFound(format!("promotion {id}")).into())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let params = vec![("id".to_string(), format!("eq.{id}"))];
        self.client.delete_where(PROMOTIONS_PATH, &params).await.map_err(PromoboardError::from)
    }
}

fn filter_params(query: &PromotionQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];

    push_in(&mut params, "status", &query.statuses);
    push_in(&mut params, "promo_type", &query.promo_types);
    push_in(&mut params, "country", &query.countries);
    push_in(&mut params, "author", &query.authors);
    push_in(&mut params, "owner", &query.owners);

    if !query.budget_type_any.is_empty() {
        params.push((
            "promo_budget_type".to_string(),
            format!("ov.{}", set_literal(&query.budget_type_any)),
        ));
    }

    // "mine" is a disjunction with the concrete channel filters; on its own
    // it collapses to a plain owner filter
    match (&query.owned_by, query.channel_any.is_empty()) {
        (Some(user), false) => params.push((
            "or".to_string(),
            format!("(owner.eq.{user},channel_tags.ov.{})", set_literal(&query.channel_any)),
        )),
        (Some(user), true) => params.push(("owner".to_string(), format!("eq.{user}"))),
        (None, false) => params.push((
            "channel_tags".to_string(),
            format!("ov.{}", set_literal(&query.channel_any)),
        )),
        (None, true) => {}
    }

    // Year filter becomes start-date bounds; non-contiguous year sets are
    // over-fetched and refined client-side
    if let (Some(min), Some(max)) = (query.years.iter().min(), query.years.iter().max()) {
        params.push(("start_date".to_string(), format!("gte.{min}-01-01")));
        params.push(("start_date".to_string(), format!("lte.{max}-12-31")));
    }

    params
}

fn push_in(params: &mut Vec<(String, String)>, column: &str, values: &[String]) {
    if !values.is_empty() {
        params.push((column.to_string(), format!("in.({})", values.join(","))));
    }
}

fn set_literal(values: &[String]) -> String {
    format!("{{{}}}", values.join(","))
}
