//! Normalization of raw store records
//!
//! A total, pure transform: whatever shape the store hands back, the result
//! is a canonical [`Promotion`]. Nothing here returns an error - defaults
//! substitute for anything missing or malformed, and unparsable dates are
//! logged so silent data loss stays observable.

use chrono::{Datelike, NaiveDate};
use promoboard_domain::constants::MAX_BACKGROUND_COLORS;
use promoboard_domain::types::raw::{into_list, RawPromotion};
use promoboard_domain::utils::dates::parse_date;
use promoboard_domain::{Promotion, Roi};
use serde_json::Value;
use tracing::warn;

/// Convert a raw store row into the canonical promotion shape.
///
/// Idempotent: normalizing the raw projection of an already-canonical
/// record yields the same record.
pub fn normalize_promotion(raw: RawPromotion) -> Promotion {
    let start_date = parse_date_field(&raw.id, "start_date", raw.start_date.as_deref());
    let end_date = parse_date_field(&raw.id, "end_date", raw.end_date.as_deref());

    let mut background_colors: Vec<String> = into_list(raw.background_colors)
        .into_iter()
        .map(|color| color.trim().to_string())
        .filter(|color| !color.is_empty())
        .collect();
    background_colors.truncate(MAX_BACKGROUND_COLORS);

    Promotion {
        year: start_date.map(|date| date.year()),
        start_date,
        end_date,
        id: raw.id,
        name: raw.name.unwrap_or_default(),
        promo_type: raw.promo_type.unwrap_or_default(),
        status: raw.status.unwrap_or_default(),
        channel_tags: into_list(raw.channel_tags),
        promo_details: into_list(raw.promo_details),
        budget: into_list(raw.budget).into_iter().map(coerce_amount).collect(),
        budget_type: into_list(raw.promo_budget_type),
        uplift_volume: coerce_metric(raw.uplift_volume),
        uplift_units: coerce_metric(raw.uplift_units),
        margin_contribution: coerce_metric(raw.margin_contribution),
        roi: coerce_roi(raw.roi),
        icon: raw.icon.unwrap_or_default(),
        link: raw.link,
        border_color: raw.border_color,
        background_colors,
        text_color: raw.text_color,
        author: raw.author,
        owner: raw.owner,
        user_id: raw.user_id,
        country: raw.country,
        display_table_ids: into_list(raw.display_tables),
    }
}

fn parse_date_field(id: &str, field: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let value = raw?;
    let parsed = parse_date(value);
    if parsed.is_none() {
        warn!(record = id, field, value, "unparsable date, no attribution for this field");
    }
    parsed
}

/// Budget amounts: non-numeric input becomes NaN, never an error.
/// Callers (the aggregation engine) skip non-finite amounts.
fn coerce_amount(value: Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => text.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Uplift metrics: anything non-numeric contributes zero.
fn coerce_metric(value: Option<Value>) -> f64 {
    match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// ROI keeps its sentinel ("TBC" and friends) when it does not parse.
fn coerce_roi(value: Option<Value>) -> Option<Roi> {
    match value? {
        Value::Number(number) => number.as_f64().map(Roi::Figure),
        Value::String(text) => match text.trim().parse::<f64>() {
            Ok(figure) => Some(Roi::Figure(figure)),
            Err(_) => Some(Roi::Sentinel(text)),
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use promoboard_domain::types::raw::OneOrMany;
    use serde_json::json;

    use super::*;

    fn raw_from_json(value: serde_json::Value) -> RawPromotion {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn scalars_become_singleton_lists() {
        let promo = normalize_promotion(raw_from_json(json!({
            "id": "p1",
            "channel_tags": "Web",
            "budget": 1000,
            "promo_budget_type": "Media"
        })));

        assert_eq!(promo.channel_tags, vec!["Web"]);
        assert_eq!(promo.budget, vec![1000.0]);
        assert_eq!(promo.budget_type, vec!["Media"]);
    }

    #[test]
    fn nulls_become_empty_lists() {
        let promo = normalize_promotion(raw_from_json(json!({
            "id": "p2",
            "channel_tags": null,
            "budget": null
        })));

        assert!(promo.channel_tags.is_empty());
        assert!(promo.budget.is_empty());
        assert!(promo.promo_details.is_empty());
    }

    #[test]
    fn non_numeric_budget_becomes_nan_not_dropped() {
        let promo = normalize_promotion(raw_from_json(json!({
            "id": "p3",
            "budget": [1000, "250.5", "n/a"]
        })));

        assert_eq!(promo.budget.len(), 3);
        assert_eq!(promo.budget[0], 1000.0);
        assert_eq!(promo.budget[1], 250.5);
        assert!(promo.budget[2].is_nan());
    }

    #[test]
    fn year_is_derived_from_start_date() {
        let promo = normalize_promotion(raw_from_json(json!({
            "id": "p4",
            "start_date": "2026-01-15"
        })));

        assert_eq!(promo.year, Some(2026));
    }

    #[test]
    fn malformed_dates_yield_none_without_panicking() {
        let promo = normalize_promotion(raw_from_json(json!({
            "id": "p5",
            "start_date": "soon",
            "end_date": "2026-02-30"
        })));

        assert_eq!(promo.start_date, None);
        assert_eq!(promo.end_date, None);
        assert_eq!(promo.year, None);
    }

    #[test]
    fn background_colors_clamp_to_two() {
        let promo = normalize_promotion(raw_from_json(json!({
            "id": "p6",
            "background_colors": ["#111111", "#222222", "#333333"]
        })));

        assert_eq!(promo.background_colors, vec!["#111111", "#222222"]);
    }

    #[test]
    fn roi_keeps_sentinel_when_unparsable() {
        let tbc = normalize_promotion(raw_from_json(json!({"id": "p7", "roi": "TBC"})));
        assert_eq!(tbc.roi, Some(Roi::Sentinel("TBC".to_string())));

        let figure = normalize_promotion(raw_from_json(json!({"id": "p8", "roi": "2.4"})));
        assert_eq!(figure.roi, Some(Roi::Figure(2.4)));
    }

    #[test]
    fn uplift_metrics_default_to_zero() {
        let promo = normalize_promotion(raw_from_json(json!({
            "id": "p9",
            "uplift_volume": "1500",
            "uplift_units": "many"
        })));

        assert_eq!(promo.uplift_volume, 1500.0);
        assert_eq!(promo.uplift_units, 0.0);
        assert_eq!(promo.margin_contribution, 0.0);
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize_promotion(raw_from_json(json!({
            "id": "p10",
            "name": "Summer splash",
            "promo_type": "Promo",
            "start_date": "2026-01-15",
            "end_date": "2026-03-10",
            "status": "public",
            "channel_tags": ["Web", "App"],
            "budget": [1000, 250.5],
            "promo_budget_type": ["Media", "Trade"],
            "uplift_volume": 12.5,
            "roi": "TBC",
            "icon": "🎯",
            "background_colors": "#aabbcc"
        })));

        let again = normalize_promotion(RawPromotion::from(first.clone()));
        assert_eq!(first, again);
    }

    #[test]
    fn raw_projection_round_trips_scalar_fields() {
        let promo = normalize_promotion(raw_from_json(json!({
            "id": "p11",
            "channel_tags": "Retail"
        })));
        let raw = RawPromotion::from(promo);

        assert_eq!(raw.channel_tags, Some(OneOrMany::Many(vec!["Retail".to_string()])));
    }
}
