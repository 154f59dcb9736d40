//! The Tabular Store: an immutable snapshot of all input tables plus a
//! handle that swaps snapshots atomically on reload.
//!
//! Every engine function takes `&DataSnapshot` and a reference date; nothing
//! ever writes back into a snapshot. Reload builds a fresh snapshot and
//! replaces the shared `Arc` in one step, so readers either see the old
//! tables or the new ones, never a mix.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    Holiday, InventoryMovement, Location, Product, Promotion, SaleRecord, WeatherObservation,
};

/// One immutable, fully-typed load of the seven input tables.
#[derive(Debug, Default, Clone)]
pub struct DataSnapshot {
    pub products: Vec<Product>,
    pub sales: Vec<SaleRecord>,
    pub inventory: Vec<InventoryMovement>,
    pub locations: Vec<Location>,
    pub holidays: Vec<Holiday>,
    pub promotions: Vec<Promotion>,
    pub weather: Vec<WeatherObservation>,
}

impl DataSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn table_counts(&self) -> TableCounts {
        TableCounts {
            products: self.products.len(),
            sales: self.sales.len(),
            inventory: self.inventory.len(),
            locations: self.locations.len(),
            holidays: self.holidays.len(),
            promotions: self.promotions.len(),
            weather: self.weather.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.sales.is_empty() && self.inventory.is_empty()
    }
}

/// Row counts per table, for `/health` and the dataset summary endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TableCounts {
    pub products: usize,
    pub sales: usize,
    pub inventory: usize,
    pub locations: usize,
    pub holidays: usize,
    pub promotions: usize,
    pub weather: usize,
}

/// Full-table replacement payload for `PUT /api/v1/datasets`.
///
/// Tables left out of the payload load as empty; partial updates are not a
/// thing, by design — the store only ever swaps whole snapshots.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DatasetPayload {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
    #[serde(default)]
    pub inventory: Vec<InventoryMovement>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub promotions: Vec<Promotion>,
    #[serde(default)]
    pub weather: Vec<WeatherObservation>,
}

impl DatasetPayload {
    pub fn into_snapshot(self) -> DataSnapshot {
        DataSnapshot {
            products: self.products,
            sales: self.sales,
            inventory: self.inventory,
            locations: self.locations,
            holidays: self.holidays,
            promotions: self.promotions,
            weather: self.weather,
        }
    }
}

/// Shared handle to the current snapshot.
#[derive(Clone)]
pub struct SnapshotStore {
    inner: Arc<RwLock<Arc<DataSnapshot>>>,
}

impl SnapshotStore {
    pub fn new(snapshot: DataSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    pub fn empty() -> Self {
        Self::new(DataSnapshot::empty())
    }

    /// Cheap clone of the current snapshot handle; callers hold it for the
    /// duration of one derivation and see a consistent view throughout.
    pub fn load(&self) -> Arc<DataSnapshot> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Atomically replace the current snapshot.
    pub fn replace(&self, snapshot: DataSnapshot) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(snapshot);
    }
}
