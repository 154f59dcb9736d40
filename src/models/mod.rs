//! Typed records for the seven input tables.
//!
//! Records arrive already parsed (JSON via the dataset endpoint or the
//! bootstrap file); the engine never sees raw bytes. Dates that fail to
//! parse deserialize to `None` where the field is optional, matching the
//! "unparseable date becomes no value" policy.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Per-unit waste proxy applied when a product row carries no weight.
pub const DEFAULT_WEIGHT_KG: f64 = 0.5;

fn default_weight() -> f64 {
    DEFAULT_WEIGHT_KG
}

/// Accepts `"2024-03-01"`, an ISO datetime, or null; anything else
/// coerces to `None` instead of failing the whole table.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Some(date);
    }
    raw.parse::<chrono::DateTime<chrono::Utc>>()
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .map(|dt| dt.date())
                .ok()
        })
}

/// Strict variant for tables where a row without a date is meaningless
/// (sales, inventory movements). Accepts the same formats.
fn strict_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("unparseable date: {raw}")))
}

/// A product/supplier row from the combined products table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Quantity on hand; absent values coerce to 0 in derivations.
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub unit_of_measure: Option<String>,
    #[serde(default)]
    pub reorder_point: Option<i64>,
    /// Per-unit weight in kilograms, used as the waste proxy.
    #[serde(default = "default_weight")]
    pub weight_kg: f64,
    /// `None` means "no expiry" (absent or unparseable).
    #[serde(default, deserialize_with = "lenient_date")]
    pub expiry_date: Option<NaiveDate>,
}

/// One sale line. `product_id` may not join to any product row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaleRecord {
    pub product_id: String,
    #[serde(deserialize_with = "strict_date")]
    pub sale_date: NaiveDate,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub total_price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MovementType {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
    /// Movement types we do not recognize; ignored by derivations.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InventoryMovement {
    pub movement_type: MovementType,
    #[serde(default)]
    pub quantity: i64,
    #[serde(deserialize_with = "strict_date")]
    pub movement_date: NaiveDate,
}

// Reference tables below are loaded and surfaced in /health counts but not
// yet consumed by any derivation; they are reserved extension points.

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub location_id: String,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Holiday {
    pub name: String,
    #[serde(deserialize_with = "strict_date")]
    pub holiday_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Promotion {
    pub name: String,
    #[serde(deserialize_with = "strict_date")]
    pub promotion_start_date: NaiveDate,
    #[serde(deserialize_with = "strict_date")]
    pub promotion_end_date: NaiveDate,
    #[serde(default)]
    pub discount_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeatherObservation {
    #[serde(deserialize_with = "strict_date")]
    pub weather_date: NaiveDate,
    #[serde(default)]
    pub temperature_c: Option<f64>,
    #[serde(default)]
    pub condition: Option<String>,
}
