//! Upsert engine: place first, then its inventory row, linked by the id the
//! storage layer hands back.

use crate::errors::PersistenceError;
use crate::models::candidate::InventoryHints;
use crate::models::inventory::{InventoryStatus, NewInventory};
use crate::models::place::{Coordinates, NewPlace};
use chrono::Local;

/// Storage seam consumed by the engine.
///
/// Both operations must be single atomic merges at the storage layer
/// (conditional write, never read-then-write).
pub trait Storage {
    /// Insert or merge the place keyed by name. Returns its id.
    fn upsert_place(&mut self, place: &NewPlace) -> Result<i64, PersistenceError>;

    /// Insert or merge the inventory row keyed by place id. Returns its id.
    fn upsert_inventory(&mut self, inventory: &NewInventory) -> Result<i64, PersistenceError>;

    fn backend_name(&self) -> &'static str;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn upsert_place(&mut self, place: &NewPlace) -> Result<i64, PersistenceError> {
        (**self).upsert_place(place)
    }

    fn upsert_inventory(&mut self, inventory: &NewInventory) -> Result<i64, PersistenceError> {
        (**self).upsert_inventory(inventory)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

/// Ids written for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistedIds {
    pub place_id: i64,
    pub inventory_id: i64,
}

pub struct UpsertEngine<S: Storage> {
    storage: S,
}

impl<S: Storage> UpsertEngine<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Merge a place keyed by name. `(0.0, 0.0)` is accepted and stored with
    /// the location flag cleared.
    pub fn upsert_place(
        &mut self,
        name: &str,
        lat: f64,
        lng: f64,
        address: &str,
    ) -> Result<i64, PersistenceError> {
        let place = NewPlace::new(name, Coordinates::new(lat, lng), address);
        self.storage.upsert_place(&place)
    }

    /// Merge the inventory row of `place_id` with an explicit price and status.
    pub fn upsert_inventory(
        &mut self,
        place_id: i64,
        price: i64,
        status: InventoryStatus,
    ) -> Result<i64, PersistenceError> {
        let inventory = NewInventory {
            price: Some(price),
            status: Some(status),
            ..NewInventory::for_place(place_id)
        };
        self.storage.upsert_inventory(&inventory)
    }

    /// Place then inventory. Without hints the inventory row is only created
    /// (price 0, UNKNOWN) and an existing row keeps its values.
    pub fn persist(
        &mut self,
        place: &NewPlace,
        hints: &InventoryHints,
    ) -> Result<PersistedIds, PersistenceError> {
        let place_id = self.storage.upsert_place(place)?;

        let mut inventory = NewInventory::for_place(place_id);
        if !hints.is_empty() {
            inventory.price = hints.price;
            inventory.status = hints.status;
            inventory.stock_count = hints.stock_count;
            inventory.last_checked_at = Some(Local::now().to_rfc3339());
        }
        let inventory_id = self.storage.upsert_inventory(&inventory)?;

        Ok(PersistedIds {
            place_id,
            inventory_id,
        })
    }
}
