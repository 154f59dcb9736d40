//! Expiry classification and the expiry-management table.
//!
//! Classification applies ordered, mutually-refining predicates: a row
//! claimed by an earlier rule is never reconsidered by a later one. The
//! four bands partition the date axis with boundaries at `today`,
//! `today + 7`, and `today + 30`.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::DataSnapshot;

/// Inclusive upper bound (days from today) of the "Expiring Soon" band.
pub const EXPIRING_SOON_DAYS: i64 = 7;

/// Inclusive upper bound (days from today) of the "Nearing Expiry" band.
pub const EXPIRY_HORIZON_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    /// Between 8 and 30 days out; carries the exact day count.
    NearingExpiry {
        days_left: i64,
    },
    Good,
}

impl ExpiryStatus {
    /// Ordered predicates: Expired, then Expiring Soon, then Nearing
    /// Expiry, then Good (which also covers "no expiry date").
    pub fn classify(expiry_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(expiry) = expiry_date else {
            return ExpiryStatus::Good;
        };
        if expiry < today {
            return ExpiryStatus::Expired;
        }
        let days_left = (expiry - today).num_days();
        if days_left <= EXPIRING_SOON_DAYS {
            ExpiryStatus::ExpiringSoon
        } else if days_left <= EXPIRY_HORIZON_DAYS {
            ExpiryStatus::NearingExpiry { days_left }
        } else {
            ExpiryStatus::Good
        }
    }

    pub fn label(&self) -> String {
        match self {
            ExpiryStatus::Expired => "Expired".to_string(),
            ExpiryStatus::ExpiringSoon => "Expiring Soon".to_string(),
            ExpiryStatus::NearingExpiry { days_left } => {
                format!("Nearing Expiry ({days_left} Days)")
            }
            ExpiryStatus::Good => "Good".to_string(),
        }
    }

    fn is_nearing(&self) -> bool {
        matches!(self, ExpiryStatus::NearingExpiry { .. })
    }

    /// Expiring Soon or Nearing Expiry: the "within 30 days" union.
    fn is_within_horizon(&self) -> bool {
        matches!(self, ExpiryStatus::ExpiringSoon) || self.is_nearing()
    }
}

/// View modes for the expiry table. Unrecognized values fall back to `All`
/// rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryView {
    #[default]
    All,
    Expired,
    /// Expiring Soon plus every Nearing Expiry row.
    ExpiringSoon,
    /// Nearing Expiry rows only.
    ExpiringIn30Days,
}

impl ExpiryView {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Expired" => ExpiryView::Expired,
            "Expiring Soon" => ExpiryView::ExpiringSoon,
            "Expiring in 30 Days" => ExpiryView::ExpiringIn30Days,
            // "All", "All Items", and anything else: no filtering.
            _ => ExpiryView::All,
        }
    }

    fn matches(&self, status: ExpiryStatus) -> bool {
        match self {
            ExpiryView::All => true,
            ExpiryView::Expired => status == ExpiryStatus::Expired,
            ExpiryView::ExpiringSoon => status.is_within_horizon(),
            ExpiryView::ExpiringIn30Days => status.is_nearing(),
        }
    }
}

/// Row-level intents the adapter may render as buttons. The engine only
/// names them; no mutation is wired up behind either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, strum::Display)]
pub enum RowAction {
    Discount,
    Dispose,
    View,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExpiryRow {
    pub product_name: String,
    pub stock_id: String,
    pub quantity: i64,
    /// `"%d %b %Y"`, or `"N/A"` for products without an expiry date.
    pub expiry_date: String,
    pub status: String,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExpiryBand {
    /// Pluralized display string, e.g. `"1 item (12 units)"`.
    pub display: String,
    pub count: usize,
    pub units: i64,
}

impl ExpiryBand {
    fn new(count: usize, units: i64) -> Self {
        let plural = if count == 1 { "" } else { "s" };
        Self {
            display: format!("{count} item{plural} ({units} units)"),
            count,
            units,
        }
    }
}

/// Counters for the expiry overview card. Always computed over the full
/// unfiltered product table, regardless of the active view.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExpiryOverview {
    pub expired: ExpiryBand,
    pub expiring_7_days: ExpiryBand,
    pub expiring_30_days: ExpiryBand,
}

/// Display rows for the expiry table under the given view.
pub fn expiry_rows(snapshot: &DataSnapshot, today: NaiveDate, view: ExpiryView) -> Vec<ExpiryRow> {
    snapshot
        .products
        .iter()
        .filter_map(|product| {
            let status = ExpiryStatus::classify(product.expiry_date, today);
            if !view.matches(status) {
                return None;
            }
            Some(ExpiryRow {
                product_name: product.product_name.clone(),
                stock_id: product.product_id.clone(),
                quantity: product.quantity.unwrap_or(0),
                expiry_date: product
                    .expiry_date
                    .map(|d| d.format("%d %b %Y").to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                status: status.label(),
                actions: vec![RowAction::Discount, RowAction::Dispose],
            })
        })
        .collect()
}

pub fn expiry_overview(snapshot: &DataSnapshot, today: NaiveDate) -> ExpiryOverview {
    let mut expired = (0usize, 0i64);
    let mut soon = (0usize, 0i64);
    let mut horizon = (0usize, 0i64);

    for product in &snapshot.products {
        let status = ExpiryStatus::classify(product.expiry_date, today);
        let units = product.quantity.unwrap_or(0);
        if status == ExpiryStatus::Expired {
            expired.0 += 1;
            expired.1 += units;
        }
        if status == ExpiryStatus::ExpiringSoon {
            soon.0 += 1;
            soon.1 += units;
        }
        if status.is_within_horizon() {
            horizon.0 += 1;
            horizon.1 += units;
        }
    }

    ExpiryOverview {
        expired: ExpiryBand::new(expired.0, expired.1),
        expiring_7_days: ExpiryBand::new(soon.0, soon.1),
        expiring_30_days: ExpiryBand::new(horizon.0, horizon.1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const TODAY: (i32, u32, u32) = (2025, 6, 15);

    fn today() -> NaiveDate {
        date(TODAY.0, TODAY.1, TODAY.2)
    }

    #[test_case(-1 => ExpiryStatus::Expired; "yesterday is expired")]
    #[test_case(0 => ExpiryStatus::ExpiringSoon; "today itself is expiring soon")]
    #[test_case(7 => ExpiryStatus::ExpiringSoon; "day seven boundary is inclusive")]
    #[test_case(8 => ExpiryStatus::NearingExpiry { days_left: 8 }; "day eight starts nearing")]
    #[test_case(30 => ExpiryStatus::NearingExpiry { days_left: 30 }; "day thirty still nearing")]
    #[test_case(31 => ExpiryStatus::Good; "day thirty one is good")]
    fn classification_boundaries(offset: i64) -> ExpiryStatus {
        let expiry = today() + chrono::Duration::days(offset);
        ExpiryStatus::classify(Some(expiry), today())
    }

    #[test]
    fn no_expiry_date_is_good() {
        assert_eq!(ExpiryStatus::classify(None, today()), ExpiryStatus::Good);
    }

    #[test]
    fn nearing_label_carries_exact_days() {
        let status = ExpiryStatus::classify(Some(today() + chrono::Duration::days(12)), today());
        assert_eq!(status.label(), "Nearing Expiry (12 Days)");
    }

    #[test]
    fn unrecognized_view_falls_back_to_all() {
        assert_eq!(ExpiryView::parse("whatever"), ExpiryView::All);
        assert_eq!(ExpiryView::parse("All Items"), ExpiryView::All);
        assert_eq!(ExpiryView::parse("Expiring Soon"), ExpiryView::ExpiringSoon);
    }

    #[test]
    fn expiring_soon_view_includes_nearing_rows() {
        assert!(ExpiryView::ExpiringSoon.matches(ExpiryStatus::ExpiringSoon));
        assert!(ExpiryView::ExpiringSoon.matches(ExpiryStatus::NearingExpiry { days_left: 20 }));
        assert!(!ExpiryView::ExpiringSoon.matches(ExpiryStatus::Expired));
        assert!(!ExpiryView::ExpiringIn30Days.matches(ExpiryStatus::ExpiringSoon));
    }

    #[test]
    fn band_pluralization() {
        assert_eq!(ExpiryBand::new(1, 3).display, "1 item (3 units)");
        assert_eq!(ExpiryBand::new(2, 10).display, "2 items (10 units)");
        assert_eq!(ExpiryBand::new(0, 0).display, "0 items (0 units)");
    }
}
