//! Quick-filter state
//!
//! Three dimensions (years, channels, statuses), each a string set where the
//! sentinel `"all"` means "no restriction". The state round-trips through a
//! query string so filtered views survive a page reload; dimensions at their
//! default are omitted to keep default URLs clean.

use std::collections::BTreeSet;

use promoboard_domain::constants::{DEFAULT_STATUS_FILTER, FILTER_ALL, FILTER_MINE};
use promoboard_domain::Promotion;
use serde::{Deserialize, Serialize};

use crate::planning::ports::PromotionQuery;

/// The three quick-filter dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    Years,
    Channels,
    Statuses,
}

impl FilterDimension {
    /// The value a dimension reverts to when its last concrete selection is
    /// removed
    fn default_value(self) -> &'static str {
        match self {
            Self::Years | Self::Channels => FILTER_ALL,
            Self::Statuses => DEFAULT_STATUS_FILTER,
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Years => "years",
            Self::Channels => "channels",
            Self::Statuses => "statuses",
        }
    }
}

/// Current quick-filter selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub years: BTreeSet<String>,
    pub channels: BTreeSet<String>,
    pub statuses: BTreeSet<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            years: default_set(FilterDimension::Years),
            channels: default_set(FilterDimension::Channels),
            statuses: default_set(FilterDimension::Statuses),
        }
    }
}

fn default_set(dimension: FilterDimension) -> BTreeSet<String> {
    let mut set = BTreeSet::new();
    set.insert(dimension.default_value().to_string());
    set
}

impl FilterState {
    /// Toggle one value in one dimension, applying the selection rules:
    /// selecting `"all"` clears the dimension, selecting a concrete value
    /// clears `"all"`, and deselecting the last concrete value restores the
    /// dimension default.
    pub fn toggle(&mut self, dimension: FilterDimension, value: &str) {
        let set = self.set_mut(dimension);

        if set.contains(value) {
            set.remove(value);
            if set.is_empty() {
                set.insert(dimension.default_value().to_string());
            }
            return;
        }

        if value == FILTER_ALL {
            set.clear();
        } else {
            set.remove(FILTER_ALL);
        }
        set.insert(value.to_string());
    }

    fn set_mut(&mut self, dimension: FilterDimension) -> &mut BTreeSet<String> {
        match dimension {
            FilterDimension::Years => &mut self.years,
            FilterDimension::Channels => &mut self.channels,
            FilterDimension::Statuses => &mut self.statuses,
        }
    }

    fn set(&self, dimension: FilterDimension) -> &BTreeSet<String> {
        match dimension {
            FilterDimension::Years => &self.years,
            FilterDimension::Channels => &self.channels,
            FilterDimension::Statuses => &self.statuses,
        }
    }

    /// Serialize to a query string, omitting dimensions at their default.
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        for dimension in
            [FilterDimension::Years, FilterDimension::Channels, FilterDimension::Statuses]
        {
            let set = self.set(dimension);
            if *set == default_set(dimension) {
                continue;
            }
            let joined = set
                .iter()
                .map(|value| urlencoding::encode(value).into_owned())
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(format!("{}={joined}", dimension.key()));
        }
        pairs.join("&")
    }

    /// Parse a query string produced by [`Self::to_query_string`]. Unknown
    /// keys are ignored; absent dimensions take their default.
    pub fn from_query_string(query: &str) -> Self {
        let mut state = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, raw_values)) = pair.split_once('=') else {
                continue;
            };
            let values: BTreeSet<String> = raw_values
                .split(',')
                .filter(|value| !value.is_empty())
                .map(|value| {
                    urlencoding::decode(value)
                        .map(|decoded| decoded.into_owned())
                        .unwrap_or_else(|_| value.to_string())
                })
                .collect();
            if values.is_empty() {
                continue;
            }
            match key {
                "years" => state.years = values,
                "channels" => state.channels = values,
                "statuses" => state.statuses = values,
                _ => {}
            }
        }
        state
    }

    /// Client-side predicate for refiltering an already-fetched list.
    pub fn matches(&self, promo: &Promotion, current_user: Option<&str>) -> bool {
        self.matches_year(promo) && self.matches_channel(promo, current_user) && self.matches_status(promo)
    }

    fn matches_year(&self, promo: &Promotion) -> bool {
        if self.years.contains(FILTER_ALL) {
            return true;
        }
        promo.year.is_some_and(|year| self.years.contains(&year.to_string()))
    }

    fn matches_channel(&self, promo: &Promotion, current_user: Option<&str>) -> bool {
        if self.channels.contains(FILTER_ALL) {
            return true;
        }
        // "mine" is OR-combined with the concrete channel selections
        if self.channels.contains(FILTER_MINE) {
            let owned = match (promo.owner.as_deref(), current_user) {
                (Some(owner), Some(user)) => owner == user,
                _ => false,
            };
            if owned {
                return true;
            }
        }
        promo.channel_tags.iter().any(|tag| self.channels.contains(tag))
    }

    fn matches_status(&self, promo: &Promotion) -> bool {
        if self.statuses.contains(FILTER_ALL) {
            return true;
        }
        self.statuses.contains(&promo.status)
    }

    /// Translate the state into a remote-store query.
    pub fn to_query(&self, current_user: Option<&str>) -> PromotionQuery {
        let mut query = PromotionQuery::default();

        if !self.years.contains(FILTER_ALL) {
            query.years =
                self.years.iter().filter_map(|year| year.parse::<i32>().ok()).collect();
        }

        if !self.channels.contains(FILTER_ALL) {
            for channel in &self.channels {
                if channel == FILTER_MINE {
                    query.owned_by = current_user.map(str::to_string);
                } else {
                    query.channel_any.push(channel.clone());
                }
            }
        }

        if !self.statuses.contains(FILTER_ALL) {
            query.statuses = self.statuses.iter().cloned().collect();
        }

        query
    }
}
