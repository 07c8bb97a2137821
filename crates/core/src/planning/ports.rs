//! Port interfaces for promotion and display-table access
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use promoboard_domain::{DisplayTable, PromotionDraft, RawPromotion, Result, SavedSelections};
use serde::Serialize;

/// A composed remote query: conjunction across dimensions, with the single
/// documented exception that `owned_by` is OR-combined with `channel_any`
/// (the "mine" pseudo-filter).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PromotionQuery {
    pub statuses: Vec<String>,
    pub promo_types: Vec<String>,
    pub countries: Vec<String>,
    pub authors: Vec<String>,
    pub owners: Vec<String>,
    /// Promotions whose channel tags overlap any of these
    pub channel_any: Vec<String>,
    /// Promotions whose budget types overlap any of these
    pub budget_type_any: Vec<String>,
    /// Translated to start-date bounds by the adapter
    pub years: Vec<i32>,
    /// "mine": promotions owned by this user, OR-combined with `channel_any`
    pub owned_by: Option<String>,
}

impl PromotionQuery {
    /// True when no dimension restricts the result set
    pub fn is_unrestricted(&self) -> bool {
        self.statuses.is_empty()
            && self.promo_types.is_empty()
            && self.countries.is_empty()
            && self.authors.is_empty()
            && self.owners.is_empty()
            && self.channel_any.is_empty()
            && self.budget_type_any.is_empty()
            && self.years.is_empty()
            && self.owned_by.is_none()
    }
}

/// The modal filter dialog queries on its own dimension set.
impl From<&SavedSelections> for PromotionQuery {
    fn from(selections: &SavedSelections) -> Self {
        Self {
            statuses: selections.status.clone(),
            promo_types: selections.promo_type.clone(),
            countries: selections.country.clone(),
            authors: selections.author.clone(),
            owners: selections.owner.clone(),
            channel_any: selections.channel_tags.clone(),
            budget_type_any: selections.budget_type.clone(),
            years: selections.year.iter().filter_map(|year| year.parse().ok()).collect(),
            owned_by: None,
        }
    }
}

/// Trait for reading and writing promotion records
#[async_trait]
pub trait PromotionRepository: Send + Sync {
    /// List promotions matching a composed query
    async fn list(&self, query: &PromotionQuery) -> Result<Vec<RawPromotion>>;

    /// Fetch one promotion; rows hidden by row-level access read as NotFound
    async fn get(&self, id: &str) -> Result<RawPromotion>;

    /// Create a promotion, returning the stored row
    async fn create(&self, draft: &PromotionDraft) -> Result<RawPromotion>;

    /// Patch a promotion, returning the stored row
    async fn update(&self, id: &str, draft: &PromotionDraft) -> Result<RawPromotion>;

    /// Delete a promotion
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Trait for fetching display tables
#[async_trait]
pub trait DisplayTableRepository: Send + Sync {
    /// Fetch the tables with the given ids (missing ids are simply absent)
    async fn list(&self, ids: &[String]) -> Result<Vec<DisplayTable>>;

    /// Fetch one table
    async fn get(&self, id: &str) -> Result<DisplayTable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selections_translate_dimension_for_dimension() {
        let selections = SavedSelections {
            status: vec!["public".to_string()],
            channel_tags: vec!["Web".to_string(), "App".to_string()],
            year: vec!["2026".to_string(), "not-a-year".to_string()],
            ..SavedSelections::default()
        };

        let query = PromotionQuery::from(&selections);
        assert_eq!(query.statuses, vec!["public".to_string()]);
        assert_eq!(query.channel_any.len(), 2);
        assert_eq!(query.years, vec![2026]);
        assert!(query.owned_by.is_none());
    }

    #[test]
    fn empty_selections_are_unrestricted() {
        let query = PromotionQuery::from(&SavedSelections::default());
        assert!(query.is_unrestricted());
    }
}
