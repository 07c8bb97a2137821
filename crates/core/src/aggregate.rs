//! Calendar aggregation engine
//!
//! Builds the three per-year matrices behind the calendar view: which icons
//! appear in which channel/month cell, how much budget lands in each
//! budget-type/month cell, and the uplift figures per month.
//!
//! Attribution rule:
//! - "Loyalty Program" promotions attribute icons, budget, and uplift
//!   entirely to the end-date's month.
//! - Every other promotion attributes icons to every month its
//!   `[start_date, end_date]` interval touches, but budget and uplift only
//!   to the start-date's month.
//!
//! The asymmetry is a business rule, not an accident; the tests below pin
//! it down.

use std::collections::{BTreeMap, BTreeSet};

use promoboard_domain::constants::{LOYALTY_PROGRAM_TYPE, MONTHS_PER_YEAR, UNKNOWN_BUDGET_TYPE};
use promoboard_domain::utils::dates::{month_span, YearMonth};
use promoboard_domain::Promotion;
use serde::Serialize;
use tracing::debug;

/// Distinct icons per channel row and month column
///
/// Row keys iterate lexicographically (`BTreeMap`), which is the render
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IconMatrix {
    pub rows: BTreeMap<String, [BTreeSet<String>; MONTHS_PER_YEAR]>,
}

/// Summed budget amounts per budget-type row and month column
///
/// The synthetic "Loyalty Program" row is always present, even when empty,
/// so the rendered table keeps a stable shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BudgetMatrix {
    pub rows: BTreeMap<String, [f64; MONTHS_PER_YEAR]>,
}

impl BudgetMatrix {
    /// Sum of one row across all month columns
    pub fn row_total(&self, row: &str) -> f64 {
        self.rows.get(row).map(|cells| cells.iter().sum()).unwrap_or(0.0)
    }
}

/// Uplift figures per month: three fixed rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpliftMatrix {
    pub volume_uplift: [f64; MONTHS_PER_YEAR],
    pub margin_contribution: [f64; MONTHS_PER_YEAR],
    pub unit_uplift: [f64; MONTHS_PER_YEAR],
}

/// All three matrices for one calendar year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarYear {
    pub year: i32,
    pub icons: IconMatrix,
    pub budgets: BudgetMatrix,
    pub uplift: UpliftMatrix,
}

impl CalendarYear {
    fn new(year: i32) -> Self {
        let mut budgets = BudgetMatrix::default();
        budgets.rows.insert(LOYALTY_PROGRAM_TYPE.to_string(), [0.0; MONTHS_PER_YEAR]);
        Self { year, icons: IconMatrix::default(), budgets, uplift: UpliftMatrix::default() }
    }
}

/// Aggregate the given promotions over each year in the render set.
///
/// Years aggregate independently; a promotion spanning a year boundary
/// contributes to each year only for the months falling inside it.
pub fn aggregate_years(promotions: &[Promotion], years: &BTreeSet<i32>) -> Vec<CalendarYear> {
    years.iter().map(|&year| aggregate_year(promotions, year)).collect()
}

/// Aggregate a single calendar year.
pub fn aggregate_year(promotions: &[Promotion], year: i32) -> CalendarYear {
    let mut calendar = CalendarYear::new(year);

    for promo in promotions {
        add_icons(&mut calendar, promo);
        add_money(&mut calendar, promo);
    }

    calendar
}

/// The month a promotion's budget and uplift land in.
///
/// Loyalty Program promotions pin to the end date; everything else to the
/// start date. A missing date means no attribution (already logged at
/// normalization time).
fn money_month(promo: &Promotion) -> Option<YearMonth> {
    if promo.promo_type == LOYALTY_PROGRAM_TYPE {
        promo.end_date.map(YearMonth::from_date)
    } else {
        promo.start_date.map(YearMonth::from_date)
    }
}

fn add_icons(calendar: &mut CalendarYear, promo: &Promotion) {
    if promo.icon.is_empty() || promo.channel_tags.is_empty() {
        return;
    }

    let months: Vec<YearMonth> = if promo.promo_type == LOYALTY_PROGRAM_TYPE {
        money_month(promo).into_iter().collect()
    } else {
        match (promo.start_date, promo.end_date) {
            (Some(start), Some(end)) => month_span(start, end).collect(),
            _ => Vec::new(),
        }
    };

    for month in months {
        if month.year != calendar.year {
            continue;
        }
        for channel in &promo.channel_tags {
            let row = calendar.icons.rows.entry(channel.clone()).or_default();
            row[month.column()].insert(promo.icon.clone());
        }
    }
}

fn add_money(calendar: &mut CalendarYear, promo: &Promotion) {
    let Some(month) = money_month(promo) else {
        return;
    };
    if month.year != calendar.year {
        return;
    }
    let column = month.column();
    let loyalty = promo.promo_type == LOYALTY_PROGRAM_TYPE;

    for (amount, label) in promo.budget_lines() {
        if !amount.is_finite() {
            debug!(record = %promo.id, "skipping non-finite budget amount");
            continue;
        }
        let row = match label.filter(|label| !label.is_empty()) {
            Some(label) => label,
            None if loyalty => LOYALTY_PROGRAM_TYPE,
            None => UNKNOWN_BUDGET_TYPE,
        };
        let cells =
            calendar.budgets.rows.entry(row.to_string()).or_insert([0.0; MONTHS_PER_YEAR]);
        cells[column] += amount;
    }

    calendar.uplift.volume_uplift[column] += promo.uplift_volume;
    calendar.uplift.margin_contribution[column] += promo.margin_contribution;
    calendar.uplift.unit_uplift[column] += promo.uplift_units;
}
