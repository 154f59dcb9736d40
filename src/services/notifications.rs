//! Notification feed for the dashboard panel.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::DataSnapshot;

/// At most this many dynamic expiring-item alerts are surfaced, to keep the
/// panel from drowning in them.
pub const MAX_EXPIRY_ALERTS: usize = 2;

/// Days ahead that trigger an expiring-item alert.
pub const ALERT_WINDOW_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Expiring,
    NewSupplier,
    Waste,
    LowStock,
    PendingInvoice,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
    pub time: String,
}

// Fixed placeholder entries. These are demo content, not derived from data;
// consumers must not read meaning into them.
static PLACEHOLDER_FEED: Lazy<Vec<Notification>> = Lazy::new(|| {
    vec![
        Notification {
            kind: NotificationKind::NewSupplier,
            text: "New supplier 'Tech Solutions Inc.' onboarding required.".to_string(),
            time: "6 hours ago".to_string(),
        },
        Notification {
            kind: NotificationKind::Waste,
            text: "Waste report for Q1 needs review.".to_string(),
            time: "1 day ago".to_string(),
        },
        Notification {
            kind: NotificationKind::LowStock,
            text: "Item XYZ is low in stock: 10 units left!".to_string(),
            time: "3m ago".to_string(),
        },
        Notification {
            kind: NotificationKind::PendingInvoice,
            text: "New supplier ABC has pending invoice.".to_string(),
            time: "1h ago".to_string(),
        },
    ]
});

/// Dynamic expiring-item alerts (capped, source-table order — no sort key
/// is applied, so ordering follows the loaded table) followed by the fixed
/// placeholder entries.
pub fn notifications(snapshot: &DataSnapshot, today: NaiveDate) -> Vec<Notification> {
    let horizon = today + chrono::Days::new(ALERT_WINDOW_DAYS);

    let mut feed: Vec<Notification> = snapshot
        .products
        .iter()
        .filter_map(|product| {
            let expiry = product.expiry_date?;
            if expiry < today || expiry > horizon {
                return None;
            }
            let days_left = (expiry - today).num_days();
            Some(Notification {
                kind: NotificationKind::Expiring,
                text: format!(
                    "Item {} expiring in {} days!",
                    product.product_name, days_left
                ),
                time: format!("{days_left} days left"),
            })
        })
        .take(MAX_EXPIRY_ALERTS)
        .collect();

    feed.extend(PLACEHOLDER_FEED.iter().cloned());
    feed
}
