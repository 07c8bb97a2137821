//! Display ordering contract
//!
//! The timeline renders promotions ascending by attribution date: Loyalty
//! Program promotions sort by end date (where all their aggregation lands),
//! everything else by start date. Undated records sort last; id breaks ties
//! so the order is stable across refreshes.

use chrono::NaiveDate;
use promoboard_domain::constants::LOYALTY_PROGRAM_TYPE;
use promoboard_domain::Promotion;

/// The date a promotion's aggregation is anchored to.
pub fn attribution_date(promo: &Promotion) -> Option<NaiveDate> {
    if promo.promo_type == LOYALTY_PROGRAM_TYPE {
        promo.end_date
    } else {
        promo.start_date
    }
}

/// Sort promotions into display order.
pub fn sort_for_display(promotions: &mut [Promotion]) {
    promotions.sort_by(|a, b| {
        let key_a = (attribution_date(a).is_none(), attribution_date(a), &a.id);
        let key_b = (attribution_date(b).is_none(), attribution_date(b), &b.id);
        key_a.cmp(&key_b)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn promo(id: &str, promo_type: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Promotion {
        Promotion {
            id: id.to_string(),
            promo_type: promo_type.to_string(),
            start_date: start,
            end_date: end,
            ..Promotion::default()
        }
    }

    #[test]
    fn loyalty_sorts_by_end_date_others_by_start() {
        let mut promotions = vec![
            promo("later", "Promo", Some(date(2026, 5, 1)), Some(date(2026, 6, 1))),
            // Starts first but its loyalty attribution is the June end date
            promo("loyalty", LOYALTY_PROGRAM_TYPE, Some(date(2026, 1, 1)), Some(date(2026, 6, 15))),
            promo("early", "Promo", Some(date(2026, 2, 1)), Some(date(2026, 2, 28))),
        ];

        sort_for_display(&mut promotions);
        let order: Vec<_> = promotions.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["early", "later", "loyalty"]);
    }

    #[test]
    fn undated_promotions_sort_last_with_stable_tiebreak() {
        let mut promotions = vec![
            promo("b-undated", "Promo", None, None),
            promo("dated", "Promo", Some(date(2026, 3, 1)), None),
            promo("a-undated", "Promo", None, None),
        ];

        sort_for_display(&mut promotions);
        let order: Vec<_> = promotions.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["dated", "a-undated", "b-undated"]);
    }
}
