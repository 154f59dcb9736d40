//! End-to-end engine scenarios over a shared dataset fixture.
//!
//! All scenarios pin the reference date to 2025-06-15 so window boundaries
//! are deterministic.

mod common;

use chrono::NaiveDate;
use invai_api::config::Baselines;
use invai_api::services::{expiry, metrics, notifications, stock};
use invai_api::store::DataSnapshot;
use rust_decimal_macros::dec;

fn snapshot() -> DataSnapshot {
    common::sample_payload().into_snapshot()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

#[test]
fn realtime_metrics_derive_from_movements_and_expiry() {
    let snap = snapshot();
    let result = metrics::realtime_metrics(&snap, today(), &Baselines::default());

    // IN 200 minus OUT 65.
    assert_eq!(result.items_in_stock, "135");
    // Only P1 expires inside the next 30 days; P3 is already expired.
    assert_eq!(result.expiring_items, "1");
    assert_eq!(result.reorder_recommendations, "15");
    // More expiring items is bad news, so a drop reads as positive.
    assert_eq!(
        result.expiring_change.direction,
        metrics::ChangeDirection::Positive
    );
}

#[test]
fn monthly_sales_axis_is_contiguous_and_zero_filled() {
    let snap = snapshot();
    let series = metrics::monthly_sales_series(&snap);

    // Sales span Mar..Jun 2025: four buckets, April empty but present.
    assert_eq!(series.len(), 4);
    assert_eq!(series[0].label, "Mar 2025");
    assert_eq!(series[1].label, "Apr 2025");
    assert_eq!(series[1].total, dec!(0));
    assert_eq!(series[2].total, dec!(90.0));
    assert_eq!(series[3].total, dec!(49.0));
}

#[test]
fn empty_sales_degrade_to_zero_summary() {
    let snap = DataSnapshot::empty();
    let summary = metrics::trailing_sales_comparison(&snap, today());
    assert_eq!(summary.recent_total, "0");
    assert_eq!(summary.change, "0%");
    assert!(metrics::monthly_sales_series(&snap).is_empty());
}

#[test]
fn dead_previous_period_reads_plus_hundred() {
    let snap = snapshot();
    let summary = metrics::trailing_sales_comparison(&snap, today());
    // All sales fall in the trailing five months; the prior five are empty.
    assert_eq!(summary.recent_total, "175");
    assert_eq!(summary.change, "+100%");
}

#[test]
fn profit_ranking_joins_left_and_keeps_unjoinable_rows() {
    let snap = snapshot();
    let breakdown = metrics::top_categories_by_profit(&snap, today(), 5);

    // Window starts 2025-03-17, so the March 2nd sale is out.
    // Grains: 90 - 5*10 = 40; Produce: 40 - 10*2 = 20; the GHOST sale has
    // no product row and lands in Unknown with zero cost.
    assert_eq!(breakdown.total_profit, dec!(69.0));
    let names: Vec<&str> = breakdown
        .categories
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    assert_eq!(names, vec!["Grains", "Produce", "Unknown"]);
    assert!((breakdown.categories[0].bar_fill_percent - 100.0).abs() < 1e-9);
    assert!((breakdown.categories[1].bar_fill_percent - 50.0).abs() < 1e-9);
}

#[test]
fn profit_ranking_drops_non_positive_but_totals_them() {
    let mut payload = common::sample_payload();
    // A deeply unprofitable sale: revenue 1 against cost 10*10.
    payload.sales.push(
        serde_json::from_value(serde_json::json!({
            "product_id": "P2",
            "sale_date": "2025-06-12",
            "quantity": 10,
            "total_price": "1.0"
        }))
        .unwrap(),
    );
    let snap = payload.into_snapshot();
    let breakdown = metrics::top_categories_by_profit(&snap, today(), 5);

    // Grains is now 40 - 99 = -59 and drops out of the ranking, but the
    // headline total still includes it: 69 - 99 = -30.
    assert_eq!(breakdown.total_profit, dec!(-30.0));
    assert!(breakdown
        .categories
        .iter()
        .all(|c| c.category != "Grains"));
}

#[test]
fn waste_series_covers_exactly_the_requested_months() {
    let snap = snapshot();
    let series = metrics::monthly_waste_series(&snap, today(), 3);

    assert_eq!(series.len(), 3);
    let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Apr", "May", "Jun"]);
    // P3 (1 kg) expired May 20th; the other months are zero-filled.
    assert!((series[1].kilograms - 1.0).abs() < 1e-9);
    assert_eq!(series[0].kilograms, 0.0);
}

#[test]
fn quarterly_waste_compares_calendar_quarters() {
    let snap = snapshot();
    let summary = metrics::quarterly_waste_comparison(&snap, today());
    // 1 kg this quarter, nothing the quarter before.
    assert_eq!(summary.total_waste, "1 kgs");
    assert_eq!(summary.change, "+100%");
}

#[test]
fn quarterly_waste_with_no_expired_products_is_flat_zero() {
    let mut payload = common::sample_payload();
    for product in &mut payload.products {
        product.expiry_date = NaiveDate::from_ymd_opt(2030, 1, 1);
    }
    let summary = metrics::quarterly_waste_comparison(&payload.into_snapshot(), today());
    assert_eq!(summary.total_waste, "0 kgs");
    assert_eq!(summary.change, "0%");
}

#[test]
fn notification_feed_leads_with_dynamic_alerts() {
    let snap = snapshot();
    let feed = notifications::notifications(&snap, today());

    // One product (P1) expires inside seven days; the fixed entries follow.
    assert_eq!(feed.len(), 5);
    assert_eq!(feed[0].text, "Item Fresh Tomatoes expiring in 3 days!");
    assert!(feed[1].text.contains("Tech Solutions Inc."));
}

#[test]
fn expiry_views_filter_and_overview_stays_unfiltered() {
    let snap = snapshot();

    let all = expiry::expiry_rows(&snap, today(), expiry::ExpiryView::All);
    assert_eq!(all.len(), 3);

    let expired = expiry::expiry_rows(&snap, today(), expiry::ExpiryView::Expired);
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].product_name, "Milk");
    assert_eq!(expired[0].status, "Expired");
    assert_eq!(expired[0].expiry_date, "20 May 2025");

    let overview = expiry::expiry_overview(&snap, today());
    assert_eq!(overview.expired.display, "1 item (0 units)");
    assert_eq!(overview.expiring_7_days.display, "1 item (15 units)");
    assert_eq!(overview.expiring_30_days.display, "1 item (15 units)");
}

#[test]
fn stock_table_classifies_and_filters() {
    let snap = snapshot();

    let all = stock::stock_rows(&snap, &stock::StockFilter::default());
    assert_eq!(all.len(), 3);
    let by_id = |id: &str| all.iter().find(|r| r.stock_id == id).unwrap();
    assert_eq!(by_id("P1").status, stock::StockStatus::LowStock);
    assert_eq!(by_id("P2").status, stock::StockStatus::InStock);
    assert_eq!(by_id("P3").status, stock::StockStatus::OutOfStock);
    assert_eq!(by_id("P2").quantity, "120 kg");

    let filter = stock::StockFilter {
        category: Some("Produce".to_string()),
        status: Some("Low Stock".to_string()),
        ..Default::default()
    };
    let rows = stock::stock_rows(&snap, &filter);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].item_name, "Fresh Tomatoes");
}

#[test]
fn product_detail_profitability() {
    let snap = snapshot();
    let detail = stock::product_detail(&snap, "P1").expect("P1 exists");
    assert_eq!(detail.profit_margin.as_deref(), Some("50.00%"));
    assert_eq!(detail.total_cost_value, Some(dec!(30.0)));
    assert_eq!(detail.expected_revenue, Some(dec!(60.0)));
    assert_eq!(detail.estimated_profit, Some(dec!(30.0)));
}
