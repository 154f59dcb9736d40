//! Stock classification, the stock-management table, and product detail.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::models::Product;
use crate::services::expiry::RowAction;
use crate::store::DataSnapshot;

/// Quantities at or below this are out of stock.
pub const OUT_OF_STOCK_THRESHOLD: i64 = 0;

/// Quantities above [`OUT_OF_STOCK_THRESHOLD`] up to and including this are
/// low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 20;

/// Filter value meaning "no restriction" for a dimension.
pub const ALL_SENTINEL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, strum::Display)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    #[strum(serialize = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    #[strum(serialize = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    #[strum(serialize = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn classify(quantity: i64) -> Self {
        if quantity <= OUT_OF_STOCK_THRESHOLD {
            StockStatus::OutOfStock
        } else if quantity <= LOW_STOCK_THRESHOLD {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// Caller-supplied view parameters for the stock table. `None` and the
/// `"all"` sentinel both mean "no restriction".
#[derive(Debug, Default, Clone)]
pub struct StockFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub status: Option<String>,
}

fn restriction(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL_SENTINEL)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockRow {
    pub stock_id: String,
    pub item_name: String,
    /// `"{quantity} {unit}"` when a unit of measure is present, else the
    /// bare quantity.
    pub quantity: String,
    pub supplier: String,
    pub category: String,
    pub status: StockStatus,
    pub actions: Vec<RowAction>,
}

/// Distinct values for the filter dropdowns, sentinel first, then
/// first-seen order from the product table.
#[derive(Debug, Serialize, ToSchema)]
pub struct StockFacets {
    pub categories: Vec<String>,
    pub suppliers: Vec<String>,
}

/// Detail card for a single product (the stock table's View action).
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub stock_id: String,
    pub item_name: String,
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub quantity: i64,
    pub unit_of_measure: Option<String>,
    pub cost: Option<Decimal>,
    pub price: Option<Decimal>,
    /// `(price - cost) / price`, formatted to two decimals; absent when
    /// either side is missing or the price is zero.
    pub profit_margin: Option<String>,
    pub total_cost_value: Option<Decimal>,
    pub expected_revenue: Option<Decimal>,
    pub estimated_profit: Option<Decimal>,
    pub reorder_point: Option<i64>,
}

fn display_quantity(product: &Product, quantity: i64) -> String {
    match &product.unit_of_measure {
        Some(unit) => format!("{quantity} {unit}"),
        None => quantity.to_string(),
    }
}

fn matches_search(product: &Product, term: &str) -> bool {
    let needle = term.to_lowercase();
    product.product_name.to_lowercase().contains(&needle)
        || product.product_id.to_lowercase().contains(&needle)
        || product
            .supplier
            .as_deref()
            .map(|s| s.to_lowercase().contains(&needle))
            .unwrap_or(false)
}

/// The stock table: free-text search (name, id, supplier — any match),
/// then AND-composed exact filters for category, supplier, and status.
///
/// A non-empty product table with no supplier data at all is treated as a
/// missing column and degrades to an empty row set, never an error.
pub fn stock_rows(snapshot: &DataSnapshot, filter: &StockFilter) -> Vec<StockRow> {
    if snapshot.products.is_empty() {
        return Vec::new();
    }
    if snapshot.products.iter().all(|p| p.supplier.is_none()) {
        warn!("products table carries no supplier values; returning empty stock table");
        return Vec::new();
    }

    let search = restriction(&filter.search);
    let category = restriction(&filter.category);
    let supplier = restriction(&filter.supplier);
    let status = restriction(&filter.status);

    snapshot
        .products
        .iter()
        .filter_map(|product| {
            let quantity = product.quantity.unwrap_or(0);
            let stock_status = StockStatus::classify(quantity);

            if let Some(term) = search {
                if !matches_search(product, term) {
                    return None;
                }
            }
            if let Some(wanted) = category {
                if product.category.as_deref() != Some(wanted) {
                    return None;
                }
            }
            if let Some(wanted) = supplier {
                if product.supplier.as_deref() != Some(wanted) {
                    return None;
                }
            }
            if let Some(wanted) = status {
                if stock_status.to_string() != wanted {
                    return None;
                }
            }

            Some(StockRow {
                stock_id: product.product_id.clone(),
                item_name: product.product_name.clone(),
                quantity: display_quantity(product, quantity),
                supplier: product
                    .supplier
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                category: product
                    .category
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                status: stock_status,
                actions: vec![RowAction::View],
            })
        })
        .collect()
}

pub fn stock_facets(snapshot: &DataSnapshot) -> StockFacets {
    let mut categories = vec![ALL_SENTINEL.to_string()];
    let mut suppliers = vec![ALL_SENTINEL.to_string()];

    for product in &snapshot.products {
        if let Some(category) = &product.category {
            if !categories.iter().any(|c| c == category) {
                categories.push(category.clone());
            }
        }
        if let Some(supplier) = &product.supplier {
            if !suppliers.iter().any(|s| s == supplier) {
                suppliers.push(supplier.clone());
            }
        }
    }

    StockFacets {
        categories,
        suppliers,
    }
}

pub fn product_detail(snapshot: &DataSnapshot, product_id: &str) -> Option<ProductDetail> {
    let product = snapshot
        .products
        .iter()
        .find(|p| p.product_id == product_id)?;

    let quantity = product.quantity.unwrap_or(0);
    let qty = Decimal::from(quantity);

    let (profit_margin, total_cost_value, expected_revenue, estimated_profit) =
        match (product.cost, product.price) {
            (Some(cost), Some(price)) => {
                let margin = if !price.is_zero() {
                    ((price - cost) / price * Decimal::ONE_HUNDRED)
                        .to_f64()
                        .map(|m| format!("{m:.2}%"))
                } else {
                    None
                };
                (
                    margin,
                    Some(cost * qty),
                    Some(price * qty),
                    Some((price - cost) * qty),
                )
            }
            _ => (None, None, None, None),
        };

    Some(ProductDetail {
        stock_id: product.product_id.clone(),
        item_name: product.product_name.clone(),
        category: product.category.clone(),
        supplier: product.supplier.clone(),
        quantity,
        unit_of_measure: product.unit_of_measure.clone(),
        cost: product.cost,
        price: product.price,
        profit_margin,
        total_cost_value,
        expected_revenue,
        estimated_profit,
        reorder_point: product.reorder_point,
    })
}
