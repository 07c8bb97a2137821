//! Planning service - drives the fetch-then-aggregate cycle
//!
//! Each refresh fully replaces the cached snapshot. Responses are keyed by a
//! generation counter so a slow stale fetch can never overwrite the result
//! of a newer one.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use promoboard_domain::{DisplayTable, Promotion, Result};
use serde::Serialize;
use tracing::{debug, info};

use super::ports::{DisplayTableRepository, PromotionRepository};
use crate::aggregate::{aggregate_years, CalendarYear};
use crate::display::sort_for_display;
use crate::filter::FilterState;
use crate::normalize::normalize_promotion;

/// One fully-built planning view
#[derive(Debug, Clone, Serialize)]
pub struct PlanSnapshot {
    /// Refresh generation that produced this snapshot
    pub generation: u64,
    pub filter: FilterState,
    /// Normalized promotions in display order
    pub promotions: Vec<Promotion>,
    /// Aggregated matrices, one entry per rendered year
    pub years: Vec<CalendarYear>,
}

/// Planning view service
pub struct PlanningService {
    promotions: Arc<dyn PromotionRepository>,
    tables: Arc<dyn DisplayTableRepository>,
    current_user: Option<String>,
    generation: AtomicU64,
    snapshot: RwLock<Option<Arc<PlanSnapshot>>>,
}

impl PlanningService {
    /// Create a new planning service
    pub fn new(
        promotions: Arc<dyn PromotionRepository>,
        tables: Arc<dyn DisplayTableRepository>,
    ) -> Self {
        Self {
            promotions,
            tables,
            current_user: None,
            generation: AtomicU64::new(0),
            snapshot: RwLock::new(None),
        }
    }

    /// Set the current user for the "mine" pseudo-filter
    pub fn with_current_user(mut self, user: impl Into<String>) -> Self {
        self.current_user = Some(user.into());
        self
    }

    /// Fetch, normalize, sort, and aggregate under the given filter.
    ///
    /// The returned snapshot is the freshest one available: if a newer
    /// refresh finished while this one was in flight, the newer result is
    /// kept and returned instead.
    pub async fn refresh(&self, filter: &FilterState) -> Result<Arc<PlanSnapshot>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "planning refresh started");

        let query = filter.to_query(self.current_user.as_deref());
        let raw = self.promotions.list(&query).await?;

        let mut promotions: Vec<Promotion> =
            raw.into_iter().map(normalize_promotion).collect();
        sort_for_display(&mut promotions);

        let years = render_years(filter, &promotions);
        let snapshot = Arc::new(PlanSnapshot {
            generation,
            filter: filter.clone(),
            years: aggregate_years(&promotions, &years),
            promotions,
        });

        let mut installed = self.snapshot.write();
        match installed.as_ref() {
            Some(current) if current.generation > generation => {
                debug!(
                    generation,
                    installed = current.generation,
                    "discarding stale planning refresh"
                );
                Ok(Arc::clone(current))
            }
            _ => {
                info!(
                    generation,
                    promotions = snapshot.promotions.len(),
                    years = snapshot.years.len(),
                    "planning snapshot installed"
                );
                *installed = Some(Arc::clone(&snapshot));
                Ok(snapshot)
            }
        }
    }

    /// The most recently installed snapshot, if any
    pub fn current(&self) -> Option<Arc<PlanSnapshot>> {
        self.snapshot.read().clone()
    }

    /// Fetch the display tables referenced by the given promotions
    pub async fn tables_for(&self, promotions: &[Promotion]) -> Result<Vec<DisplayTable>> {
        let ids: Vec<String> = promotions
            .iter()
            .flat_map(|promo| promo.display_table_ids.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.tables.list(&ids).await
    }
}

/// The years to aggregate: explicit filter years, else whatever years the
/// fetched data actually covers.
fn render_years(filter: &FilterState, promotions: &[Promotion]) -> BTreeSet<i32> {
    let explicit: BTreeSet<i32> =
        filter.years.iter().filter_map(|year| year.parse().ok()).collect();
    if !explicit.is_empty() {
        return explicit;
    }
    promotions.iter().filter_map(|promo| promo.year).collect()
}
