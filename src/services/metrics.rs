//! The metrics engine: pure derivations over a [`DataSnapshot`].
//!
//! Every function here takes the snapshot plus an explicit reference date
//! and returns plain values; none of them touches shared state, so they can
//! be evaluated in any order (or concurrently) against the same snapshot.

use std::collections::HashMap;

use chrono::{Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::config::Baselines;
use crate::models::MovementType;
use crate::services::timewindow::{
    month_buckets, month_floor, months_back, previous_waste_quarter_bounds, profit_window_start,
    waste_quarter_bounds,
};
use crate::store::DataSnapshot;

/// Reorder recommendations are an unimplemented extension point; the count
/// shown on the dashboard is this placeholder, not a derived figure.
pub const REORDER_RECOMMENDATIONS_PLACEHOLDER: i64 = 15;

/// Days ahead that count as "expiring" on the real-time counter.
pub const EXPIRING_WINDOW_DAYS: i64 = 30;

/// Number of buckets the monthly sales chart keeps.
pub const SALES_SERIES_MONTHS: usize = 5;

/// Calendar-month lookback for the trailing sales comparison.
pub const TRAILING_SALES_MONTHS: u32 = 5;

/// Default month count for the waste chart.
pub const DEFAULT_WASTE_MONTHS: usize = 3;

/// Default size of the profit ranking.
pub const DEFAULT_TOP_CATEGORIES: usize = 5;

/// Sentiment attached to a change figure, so the adapter can color it
/// without re-deriving the sign convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChangeIndicator {
    /// Signed whole-percent figure, e.g. `"+7%"`.
    pub value: String,
    pub direction: ChangeDirection,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RealtimeMetrics {
    /// Net stock from movements (IN minus OUT), thousands-separated.
    pub items_in_stock: String,
    pub stock_change: ChangeIndicator,
    pub reorder_recommendations: String,
    pub reorder_change: ChangeIndicator,
    /// Products with an expiry date within the next 30 days.
    pub expiring_items: String,
    pub expiring_change: ChangeIndicator,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalesPoint {
    pub month_start: NaiveDate,
    /// Abbreviated month plus year, e.g. `"Mar 2025"`.
    pub label: String,
    pub total: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalesSummary {
    /// Total over the trailing five calendar months, thousands-separated.
    pub recent_total: String,
    /// Signed percent change against the five months before that.
    pub change: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryProfit {
    pub category: String,
    pub profit: Decimal,
    /// Bar width relative to the top-ranked category, 0..=100.
    pub bar_fill_percent: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfitBreakdown {
    /// Headline figure: all categories in the window, including the ones
    /// the ranked list drops.
    pub total_profit: Decimal,
    pub total_profit_display: String,
    pub categories: Vec<CategoryProfit>,
}

impl ProfitBreakdown {
    fn empty() -> Self {
        Self {
            total_profit: Decimal::ZERO,
            total_profit_display: "0".to_string(),
            categories: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WastePoint {
    /// Abbreviated month, e.g. `"Jun"`.
    pub label: String,
    pub kilograms: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WasteSummary {
    /// e.g. `"128 kgs"` for the current calendar quarter.
    pub total_waste: String,
    pub change: String,
}

/// Percent change against a period baseline. The zero-baseline cases are
/// defined, not caught: a dead previous period with activity now reads as
/// +100%, and two dead periods read as 0%.
pub fn period_change_percent(previous: f64, current: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else if current > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Percent change against a configured baseline; a zero baseline reads 0%.
fn baseline_change_percent(baseline: f64, current: f64) -> f64 {
    if baseline != 0.0 {
        (current - baseline) / baseline * 100.0
    } else {
        0.0
    }
}

fn signed_percent(value: f64) -> String {
    format!("{value:+.0}%")
}

/// `12345 -> "12,345"`.
fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn format_amount(value: Decimal) -> String {
    group_thousands(value.round().to_i64().unwrap_or(0))
}

fn rising_is_good(percent: f64) -> ChangeDirection {
    if percent >= 0.0 {
        ChangeDirection::Positive
    } else {
        ChangeDirection::Negative
    }
}

fn rising_is_bad(percent: f64) -> ChangeDirection {
    if percent >= 0.0 {
        ChangeDirection::Negative
    } else {
        ChangeDirection::Positive
    }
}

/// Real-time dashboard counters.
///
/// The "previous period" figures come from configuration rather than any
/// derived history; see the baselines discussion in DESIGN.md.
pub fn realtime_metrics(
    snapshot: &DataSnapshot,
    today: NaiveDate,
    baselines: &Baselines,
) -> RealtimeMetrics {
    let stock_in: i64 = snapshot
        .inventory
        .iter()
        .filter(|m| m.movement_type == MovementType::In)
        .map(|m| m.quantity)
        .sum();
    let stock_out: i64 = snapshot
        .inventory
        .iter()
        .filter(|m| m.movement_type == MovementType::Out)
        .map(|m| m.quantity)
        .sum();
    let items_in_stock = stock_in - stock_out;

    let stock_pct =
        baseline_change_percent(baselines.prev_items_in_stock as f64, items_in_stock as f64);

    let reorder_pct = baseline_change_percent(
        baselines.prev_reorder_recommendations as f64,
        REORDER_RECOMMENDATIONS_PLACEHOLDER as f64,
    );

    let horizon = today + chrono::Days::new(EXPIRING_WINDOW_DAYS as u64);
    let expiring_items = snapshot
        .products
        .iter()
        .filter(|p| {
            p.expiry_date
                .map(|d| d >= today && d <= horizon)
                .unwrap_or(false)
        })
        .count() as i64;

    let expiring_pct = baseline_change_percent(baselines.prev_expiring_items, expiring_items as f64);

    RealtimeMetrics {
        items_in_stock: group_thousands(items_in_stock),
        stock_change: ChangeIndicator {
            value: signed_percent(stock_pct),
            direction: rising_is_good(stock_pct),
        },
        reorder_recommendations: REORDER_RECOMMENDATIONS_PLACEHOLDER.to_string(),
        reorder_change: ChangeIndicator {
            value: signed_percent(reorder_pct),
            direction: rising_is_good(reorder_pct),
        },
        expiring_items: expiring_items.to_string(),
        expiring_change: ChangeIndicator {
            value: signed_percent(expiring_pct),
            direction: rising_is_bad(expiring_pct),
        },
    }
}

/// Monthly sales chart series: a contiguous month axis from the first to
/// the last sale, zero-filled, trimmed to the final five buckets.
pub fn monthly_sales_series(snapshot: &DataSnapshot) -> Vec<SalesPoint> {
    if snapshot.sales.is_empty() {
        return Vec::new();
    }

    let mut by_month: HashMap<NaiveDate, Decimal> = HashMap::new();
    let mut first = NaiveDate::MAX;
    let mut last = NaiveDate::MIN;
    for sale in &snapshot.sales {
        let bucket = month_floor(sale.sale_date);
        *by_month.entry(bucket).or_insert(Decimal::ZERO) += sale.total_price;
        first = first.min(bucket);
        last = last.max(bucket);
    }

    let mut series = Vec::new();
    let mut month = first;
    while month <= last {
        series.push(SalesPoint {
            month_start: month,
            label: month.format("%b %Y").to_string(),
            total: by_month.get(&month).copied().unwrap_or(Decimal::ZERO),
        });
        month = match month.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    if series.len() > SALES_SERIES_MONTHS {
        series.split_off(series.len() - SALES_SERIES_MONTHS)
    } else {
        series
    }
}

/// Trailing five-month sales total and its change against the five months
/// before that. Empty sales degrade to `("0", "0%")`.
pub fn trailing_sales_comparison(snapshot: &DataSnapshot, today: NaiveDate) -> SalesSummary {
    if snapshot.sales.is_empty() {
        return SalesSummary {
            recent_total: "0".to_string(),
            change: "0%".to_string(),
        };
    }

    let recent_start = months_back(today, TRAILING_SALES_MONTHS);
    let previous_start = months_back(today, TRAILING_SALES_MONTHS * 2);

    let mut recent = Decimal::ZERO;
    let mut previous = Decimal::ZERO;
    for sale in &snapshot.sales {
        if sale.sale_date >= recent_start && sale.sale_date <= today {
            recent += sale.total_price;
        } else if sale.sale_date >= previous_start && sale.sale_date < recent_start {
            previous += sale.total_price;
        }
    }

    let pct = period_change_percent(
        previous.to_f64().unwrap_or(0.0),
        recent.to_f64().unwrap_or(0.0),
    );

    SalesSummary {
        recent_total: format_amount(recent),
        change: signed_percent(pct),
    }
}

/// Profit attribution over the fixed 90-day window.
///
/// Sales left-join onto products by id; unjoinable sales fall into the
/// "Unknown" category with zero cost. The ranked list is the top N by
/// profit with non-positive categories dropped, while the headline total
/// covers every category in the window.
pub fn top_categories_by_profit(
    snapshot: &DataSnapshot,
    today: NaiveDate,
    top_n: usize,
) -> ProfitBreakdown {
    if snapshot.sales.is_empty() || snapshot.products.is_empty() {
        return ProfitBreakdown::empty();
    }

    let product_index: HashMap<&str, (Option<&str>, Decimal)> = snapshot
        .products
        .iter()
        .map(|p| {
            (
                p.product_id.as_str(),
                (p.category.as_deref(), p.cost.unwrap_or(Decimal::ZERO)),
            )
        })
        .collect();

    let window_start = profit_window_start(today);
    let mut total_profit = Decimal::ZERO;
    let mut by_category: HashMap<String, Decimal> = HashMap::new();
    let mut rows_in_window = 0usize;

    for sale in &snapshot.sales {
        if sale.sale_date < window_start {
            continue;
        }
        rows_in_window += 1;
        let (category, cost) = product_index
            .get(sale.product_id.as_str())
            .map(|(cat, cost)| (cat.unwrap_or("Unknown"), *cost))
            .unwrap_or(("Unknown", Decimal::ZERO));

        let profit = sale.total_price - Decimal::from(sale.quantity) * cost;
        total_profit += profit;
        *by_category.entry(category.to_string()).or_insert(Decimal::ZERO) += profit;
    }

    if rows_in_window == 0 {
        debug!(window_start = %window_start, "no sales inside the profit window");
        return ProfitBreakdown::empty();
    }

    let mut ranked: Vec<(String, Decimal)> = by_category.into_iter().collect();
    // Profit descending, category name as the tiebreak for stable output.
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top_n);
    ranked.retain(|(_, profit)| *profit > Decimal::ZERO);

    let max_profit = ranked
        .first()
        .map(|(_, profit)| *profit)
        .filter(|p| *p > Decimal::ZERO)
        .unwrap_or(Decimal::ONE);

    let categories = ranked
        .into_iter()
        .map(|(category, profit)| CategoryProfit {
            bar_fill_percent: (profit / max_profit * Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or(0.0),
            category,
            profit,
        })
        .collect();

    ProfitBreakdown {
        total_profit,
        total_profit_display: format_amount(total_profit),
        categories,
    }
}

/// Monthly waste chart: expired weight bucketed by expiry month.
///
/// The axis is built at double width (2×N months ending now) and then
/// trimmed to the last N, so the displayed window always has a full
/// left-context bucket and sparse data never leaves gaps.
pub fn monthly_waste_series(
    snapshot: &DataSnapshot,
    today: NaiveDate,
    num_months: usize,
) -> Vec<WastePoint> {
    if snapshot.products.is_empty() || num_months == 0 {
        return Vec::new();
    }

    let mut waste_by_month: HashMap<NaiveDate, f64> = HashMap::new();
    for product in &snapshot.products {
        if let Some(expiry) = product.expiry_date {
            if expiry < today {
                *waste_by_month.entry(month_floor(expiry)).or_insert(0.0) += product.weight_kg;
            }
        }
    }
    if waste_by_month.is_empty() {
        return Vec::new();
    }

    let axis = month_buckets(today, num_months * 2);
    axis.into_iter()
        .skip(num_months)
        .map(|month| WastePoint {
            label: month.format("%b").to_string(),
            kilograms: waste_by_month.get(&month).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Quarter-over-quarter waste comparison, calendar-month convention.
pub fn quarterly_waste_comparison(snapshot: &DataSnapshot, today: NaiveDate) -> WasteSummary {
    let zero = WasteSummary {
        total_waste: "0 kgs".to_string(),
        change: "0%".to_string(),
    };
    if snapshot.products.is_empty() {
        return zero;
    }

    let (current_start, current_end) = waste_quarter_bounds(today);
    let (previous_start, previous_end) = previous_waste_quarter_bounds(today);

    let mut current = 0.0f64;
    let mut previous = 0.0f64;
    let mut any_expired = false;
    for product in &snapshot.products {
        let Some(expiry) = product.expiry_date else {
            continue;
        };
        if expiry >= today {
            continue;
        }
        any_expired = true;
        if expiry >= current_start && expiry < current_end {
            current += product.weight_kg;
        } else if expiry >= previous_start && expiry < previous_end {
            previous += product.weight_kg;
        }
    }
    if !any_expired {
        return zero;
    }

    let pct = period_change_percent(previous, current);
    WasteSummary {
        total_waste: format!("{} kgs", group_thousands(current.round() as i64)),
        change: signed_percent(pct),
    }
}
