//! Raw promotion records as fetched from the remote store
//!
//! The store tolerates sloppy writes: array columns may hold a scalar or
//! null, numeric columns may hold strings. [`RawPromotion`] deserializes all
//! of that without failing; the normalization layer produces the canonical
//! [`super::Promotion`] shape downstream code relies on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A field that may arrive as a single value or a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Collapse into a list; a scalar becomes a singleton
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(values) => values,
            Self::One(value) => vec![value],
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values)
    }
}

/// Collapse an optional scalar-or-list field into a plain list
pub fn into_list<T>(field: Option<OneOrMany<T>>) -> Vec<T> {
    field.map(OneOrMany::into_vec).unwrap_or_default()
}

/// A promotion row exactly as the remote store returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RawPromotion {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_tags: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_details: Option<OneOrMany<String>>,
    /// Amounts; numbers or number-like strings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<OneOrMany<Value>>,
    /// Positional labels for `budget`; column name kept from the store schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_budget_type: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uplift_volume: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uplift_units: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_contribution: Option<Value>,
    /// Number, numeric string, or a sentinel such as "TBC"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_colors: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_tables: Option<OneOrMany<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_and_list_fields_both_deserialize() {
        let row: RawPromotion = serde_json::from_str(
            r#"{
                "id": "p1",
                "channel_tags": "Web",
                "budget": [1000, "250.5", "n/a"],
                "promo_budget_type": ["Media"]
            }"#,
        )
        .unwrap();

        assert_eq!(into_list(row.channel_tags), vec!["Web".to_string()]);
        let budget = into_list(row.budget);
        assert_eq!(budget.len(), 3);
    }

    #[test]
    fn null_fields_deserialize_as_absent() {
        let row: RawPromotion = serde_json::from_str(
            r#"{"id": "p2", "channel_tags": null, "budget": null, "roi": null}"#,
        )
        .unwrap();

        assert!(row.channel_tags.is_none());
        assert!(row.budget.is_none());
        assert!(row.roi.is_none());
    }

    #[test]
    fn unknown_numeric_shapes_survive_deserialization() {
        let row: RawPromotion = serde_json::from_str(
            r#"{"id": "p3", "uplift_volume": "1500", "margin_contribution": 2.75, "roi": "TBC"}"#,
        )
        .unwrap();

        assert_eq!(row.uplift_volume, Some(Value::String("1500".to_string())));
        assert_eq!(row.roi, Some(Value::String("TBC".to_string())));
    }
}
