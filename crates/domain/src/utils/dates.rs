//! Tolerant calendar date handling
//!
//! Remote records carry dates as strings in a handful of formats; parsing is
//! total (a bad string is `None`, never an error) because malformed records
//! must not abort processing of the rest.

use chrono::{DateTime, Datelike, NaiveDate};

/// Parse a raw date string from the remote store.
///
/// Accepts ISO dates (`2026-03-10`), ISO datetimes (RFC 3339, the store's
/// timestamp columns), and legacy `DD/MM/YYYY` values.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Some(date);
    }

    None
}

/// A calendar month within a specific year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    /// The following calendar month
    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// Zero-based column index within a year row
    pub fn column(self) -> usize {
        (self.month - 1) as usize
    }
}

/// Iterate every calendar month touched by `[start, end]`, inclusive.
///
/// Day-of-month is irrelevant: a promotion running Jan 31 – Feb 1 touches
/// two months. An inverted interval yields nothing.
pub fn month_span(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = YearMonth> {
    let first = YearMonth::from_date(start);
    let last = YearMonth::from_date(end);

    let mut cursor = Some(first).filter(|_| first <= last);
    std::iter::from_fn(move || {
        let current = cursor?;
        cursor = Some(current.succ()).filter(|next| *next <= last);
        Some(current)
    })
}
