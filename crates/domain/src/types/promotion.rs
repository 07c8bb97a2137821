//! Canonical promotion records
//!
//! [`Promotion`] is the shape every layer above normalization works with:
//! list fields are always lists, numbers are numbers, dates are parsed (or
//! `None` when the raw value was absent or malformed).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::raw::{OneOrMany, RawPromotion};

/// Return on investment: a parsed figure, or the store's original sentinel
/// string (e.g. "TBC") when the value is not numeric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Roi {
    Figure(f64),
    Sentinel(String),
}

/// A promotion in canonical in-memory form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Promotion {
    pub id: String,
    pub name: String,
    pub promo_type: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// 4-digit calendar year of `start_date`
    pub year: Option<i32>,
    pub status: String,
    pub channel_tags: Vec<String>,
    pub promo_details: Vec<String>,
    /// Amounts; may contain NaN for non-numeric raw input
    pub budget: Vec<f64>,
    /// Positionally paired with `budget`; may be shorter
    pub budget_type: Vec<String>,
    pub uplift_volume: f64,
    pub uplift_units: f64,
    pub margin_contribution: f64,
    pub roi: Option<Roi>,
    pub icon: String,
    pub link: Option<String>,
    pub border_color: Option<String>,
    /// 0, 1 (solid), or 2 (gradient) colors
    pub background_colors: Vec<String>,
    pub text_color: Option<String>,
    pub author: Option<String>,
    pub owner: Option<String>,
    pub user_id: Option<String>,
    pub country: Option<String>,
    pub display_table_ids: Vec<String>,
}

impl Promotion {
    /// Iterate budget amounts with their positional type labels.
    ///
    /// A missing label (shorter `budget_type`) yields `None`; the caller
    /// decides the fallback row.
    pub fn budget_lines(&self) -> impl Iterator<Item = (f64, Option<&str>)> + '_ {
        self.budget
            .iter()
            .enumerate()
            .map(|(i, amount)| (*amount, self.budget_type.get(i).map(String::as_str)))
    }
}

/// Project a canonical record back into the raw wire shape.
///
/// Used when echoing records to the store and to express normalization
/// idempotence: normalizing this projection reproduces the original.
impl From<Promotion> for RawPromotion {
    fn from(promo: Promotion) -> Self {
        let budget_values = promo
            .budget
            .into_iter()
            .map(|amount| {
                serde_json::Number::from_f64(amount)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String("NaN".to_string()))
            })
            .collect::<Vec<_>>();

        let roi = promo.roi.map(|roi| match roi {
            Roi::Figure(v) => serde_json::Number::from_f64(v)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String("NaN".to_string())),
            Roi::Sentinel(s) => Value::String(s),
        });

        Self {
            id: promo.id,
            name: Some(promo.name).filter(|s| !s.is_empty()),
            promo_type: Some(promo.promo_type).filter(|s| !s.is_empty()),
            start_date: promo.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            end_date: promo.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            status: Some(promo.status).filter(|s| !s.is_empty()),
            channel_tags: Some(OneOrMany::Many(promo.channel_tags)),
            promo_details: Some(OneOrMany::Many(promo.promo_details)),
            budget: Some(OneOrMany::Many(budget_values)),
            promo_budget_type: Some(OneOrMany::Many(promo.budget_type)),
            uplift_volume: serde_json::Number::from_f64(promo.uplift_volume).map(Value::Number),
            uplift_units: serde_json::Number::from_f64(promo.uplift_units).map(Value::Number),
            margin_contribution: serde_json::Number::from_f64(promo.margin_contribution)
                .map(Value::Number),
            roi,
            icon: Some(promo.icon).filter(|s| !s.is_empty()),
            link: promo.link,
            border_color: promo.border_color,
            background_colors: Some(OneOrMany::Many(promo.background_colors)),
            text_color: promo.text_color,
            author: promo.author,
            owner: promo.owner,
            user_id: promo.user_id,
            country: promo.country,
            display_tables: Some(OneOrMany::Many(promo.display_table_ids)),
        }
    }
}

/// Write shape for creating or patching a promotion
///
/// Absent fields are omitted from the serialized body so a PATCH only
/// touches what the form actually changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromotionDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_details: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_budget_type: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uplift_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uplift_units: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_contribution: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi: Option<Roi>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_tables: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_lines_pair_positionally_and_tolerate_short_labels() {
        let promo = Promotion {
            budget: vec![1000.0, 250.0],
            budget_type: vec!["Media".to_string()],
            ..Promotion::default()
        };

        let lines: Vec<_> = promo.budget_lines().collect();
        assert_eq!(lines[0], (1000.0, Some("Media")));
        assert_eq!(lines[1], (250.0, None));
    }

    #[test]
    fn draft_serialization_omits_absent_fields() {
        let draft = PromotionDraft {
            name: Some("Spring push".to_string()),
            budget: Some(vec![500.0]),
            ..PromotionDraft::default()
        };

        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["name"], "Spring push");
        assert!(body.get("status").is_none());
        assert!(body.get("channel_tags").is_none());
    }

    #[test]
    fn roi_round_trips_both_variants() {
        let figure: Roi = serde_json::from_str("2.5").unwrap();
        assert_eq!(figure, Roi::Figure(2.5));

        let sentinel: Roi = serde_json::from_str(r#""TBC""#).unwrap();
        assert_eq!(sentinel, Roi::Sentinel("TBC".to_string()));
    }
}
