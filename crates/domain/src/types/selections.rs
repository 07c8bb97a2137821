//! Saved modal filter selections
//!
//! The modal filter dialog persists its own selection set, independent from
//! the quick-filter dimensions carried in the URL.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedSelections {
    #[serde(default)]
    pub promo_type: Vec<String>,
    #[serde(default)]
    pub channel_tags: Vec<String>,
    #[serde(default)]
    pub author: Vec<String>,
    #[serde(default)]
    pub owner: Vec<String>,
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default)]
    pub country: Vec<String>,
    #[serde(default)]
    pub budget_type: Vec<String>,
    #[serde(default)]
    pub year: Vec<String>,
}

impl SavedSelections {
    /// True when no dimension holds a selection
    pub fn is_empty(&self) -> bool {
        self.promo_type.is_empty()
            && self.channel_tags.is_empty()
            && self.author.is_empty()
            && self.owner.is_empty()
            && self.status.is_empty()
            && self.country.is_empty()
            && self.budget_type.is_empty()
            && self.year.is_empty()
    }
}
