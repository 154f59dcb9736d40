//! Property-based checks for the classification and windowing invariants.

use chrono::{Duration, NaiveDate};
use invai_api::models::SaleRecord;
use invai_api::services::expiry::ExpiryStatus;
use invai_api::services::metrics::{self, period_change_percent};
use invai_api::services::stock::StockStatus;
use invai_api::store::DataSnapshot;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

proptest! {
    /// The four expiry bands partition the date axis: every offset lands in
    /// exactly the band its boundaries dictate.
    #[test]
    fn expiry_bands_partition_the_axis(offset in -2000i64..2000i64) {
        let today = base_date();
        let expiry = today + Duration::days(offset);
        let status = ExpiryStatus::classify(Some(expiry), today);

        let expected = if offset < 0 {
            ExpiryStatus::Expired
        } else if offset <= 7 {
            ExpiryStatus::ExpiringSoon
        } else if offset <= 30 {
            ExpiryStatus::NearingExpiry { days_left: offset }
        } else {
            ExpiryStatus::Good
        };
        prop_assert_eq!(status, expected);
    }

    /// Stock bands partition the quantity axis at 0 and 20.
    #[test]
    fn stock_bands_partition_quantities(quantity in -1000i64..10_000i64) {
        let status = StockStatus::classify(quantity);
        let expected = if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity <= 20 {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        };
        prop_assert_eq!(status, expected);
    }

    /// Zero-baseline rules: dead-then-alive reads +100, dead-then-dead
    /// reads 0, and a live baseline uses the exact ratio.
    #[test]
    fn period_change_respects_zero_baseline_rules(
        previous in 0.0f64..1e9,
        current in 0.0f64..1e9,
    ) {
        let pct = period_change_percent(previous, current);
        if previous > 0.0 {
            let expected = (current - previous) / previous * 100.0;
            prop_assert!((pct - expected).abs() < 1e-6);
        } else if current > 0.0 {
            prop_assert_eq!(pct, 100.0);
        } else {
            prop_assert_eq!(pct, 0.0);
        }
    }

    /// The sales chart never exceeds five buckets, stays in ascending month
    /// order, and keeps the axis contiguous (no skipped months).
    #[test]
    fn sales_series_is_short_sorted_and_contiguous(
        day_offsets in proptest::collection::vec(0i64..720, 1..40),
    ) {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let sales: Vec<SaleRecord> = day_offsets
            .iter()
            .map(|&offset| SaleRecord {
                product_id: "P".to_string(),
                sale_date: start + Duration::days(offset),
                quantity: 1,
                total_price: Decimal::ONE,
            })
            .collect();
        let snapshot = DataSnapshot { sales, ..Default::default() };

        let series = metrics::monthly_sales_series(&snapshot);
        prop_assert!(!series.is_empty());
        prop_assert!(series.len() <= 5);
        for pair in series.windows(2) {
            prop_assert!(pair[0].month_start < pair[1].month_start);
            let next = pair[0]
                .month_start
                .checked_add_months(chrono::Months::new(1))
                .unwrap();
            prop_assert_eq!(next, pair[1].month_start);
        }
    }

    /// The waste chart has exactly the requested number of buckets whenever
    /// any waste exists, regardless of how sparse the data is.
    #[test]
    fn waste_series_has_requested_length(
        months in 1usize..12,
        expired_offset in 1i64..200,
    ) {
        let today = base_date();
        let product: invai_api::models::Product =
            serde_json::from_value(serde_json::json!({
                "product_id": "P1",
                "product_name": "Item",
                "quantity": 1,
                "expiry_date": (today - Duration::days(expired_offset)).to_string(),
            }))
            .unwrap();
        let snapshot = DataSnapshot { products: vec![product], ..Default::default() };

        let series = metrics::monthly_waste_series(&snapshot, today, months);
        prop_assert_eq!(series.len(), months);
        prop_assert!(series.iter().all(|p| p.kilograms >= 0.0));
    }
}
