//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use axum::Router;
use invai_api::{
    config::AppConfig,
    store::{DatasetPayload, SnapshotStore},
    AppState,
};
use serde_json::{json, Value};

/// A small dataset exercising every table the engine reads. Reference date
/// for scenarios built on it: 2025-06-15.
pub fn sample_dataset() -> Value {
    json!({
        "products": [
            {
                "product_id": "P1",
                "product_name": "Fresh Tomatoes",
                "category": "Produce",
                "supplier": "GreenFarm",
                "cost": "2.0",
                "price": "4.0",
                "quantity": 15,
                "unit_of_measure": "kg",
                "weight_kg": 1.0,
                "expiry_date": "2025-06-18"
            },
            {
                "product_id": "P2",
                "product_name": "Basmati Rice",
                "category": "Grains",
                "supplier": "AgriCo",
                "cost": "10.0",
                "price": "18.0",
                "quantity": 120,
                "unit_of_measure": "kg",
                "weight_kg": 5.0,
                "expiry_date": "2026-01-01"
            },
            {
                "product_id": "P3",
                "product_name": "Milk",
                "category": "Dairy",
                "supplier": "DairyBest",
                "cost": "1.0",
                "price": "1.5",
                "quantity": 0,
                "unit_of_measure": "l",
                "weight_kg": 1.0,
                "expiry_date": "2025-05-20"
            }
        ],
        "sales": [
            { "product_id": "P1", "sale_date": "2025-06-01", "quantity": 10, "total_price": "40.0" },
            { "product_id": "P2", "sale_date": "2025-05-10", "quantity": 5, "total_price": "90.0" },
            { "product_id": "P2", "sale_date": "2025-03-02", "quantity": 2, "total_price": "36.0" },
            { "product_id": "GHOST", "sale_date": "2025-06-10", "quantity": 1, "total_price": "9.0" }
        ],
        "inventory": [
            { "movement_type": "IN", "quantity": 200, "movement_date": "2025-05-01" },
            { "movement_type": "OUT", "quantity": 65, "movement_date": "2025-06-01" }
        ],
        "locations": [
            { "location_id": "L1", "name": "Central Warehouse", "region": "North" }
        ],
        "holidays": [
            { "name": "New Year", "holiday_date": "2025-01-01" }
        ],
        "promotions": [
            {
                "name": "Summer Sale",
                "promotion_start_date": "2025-06-01",
                "promotion_end_date": "2025-06-30",
                "discount_percent": "10"
            }
        ],
        "weather": [
            { "weather_date": "2025-06-14", "temperature_c": 24.5, "condition": "Sunny" }
        ]
    })
}

pub fn sample_payload() -> DatasetPayload {
    serde_json::from_value(sample_dataset()).expect("fixture deserializes")
}

/// A fully-wired v1 router over the sample dataset.
pub fn app() -> Router {
    app_with(sample_payload())
}

pub fn app_with(payload: DatasetPayload) -> Router {
    let state = AppState {
        config: AppConfig::default(),
        snapshots: SnapshotStore::new(payload.into_snapshot()),
    };
    Router::new()
        .nest("/api/v1", invai_api::api_v1_routes())
        .with_state(state)
}
