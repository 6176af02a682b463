//! SQLite implementation of the storage seam.

use crate::core::upsert::Storage;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppResult, PersistenceError, StorageOp};
use crate::models::inventory::NewInventory;
use crate::models::place::{ADDRESS_UNKNOWN, NewPlace};
use chrono::Local;
use rusqlite::{Connection, params};
use serde::Serialize;

// A weaker write (sentinel coordinates or address) never replaces a stored value.
const UPSERT_PLACE: &str = "
    INSERT INTO places (name, lat, lng, address, is_open, location_resolved, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
    ON CONFLICT(name) DO UPDATE SET
        lat = CASE WHEN excluded.location_resolved = 1 THEN excluded.lat ELSE places.lat END,
        lng = CASE WHEN excluded.location_resolved = 1 THEN excluded.lng ELSE places.lng END,
        location_resolved = MAX(places.location_resolved, excluded.location_resolved),
        address = CASE WHEN excluded.address = ?8 THEN places.address ELSE excluded.address END,
        is_open = excluded.is_open,
        updated_at = excluded.updated_at
    RETURNING id";

const UPSERT_INVENTORY: &str = "
    INSERT INTO inventory (place_id, price, status, stock_count, last_checked_at, owner_id, updated_at)
    VALUES (?1, COALESCE(?2, 0), COALESCE(?3, 'UNKNOWN'), ?4, ?5, ?6, ?7)
    ON CONFLICT(place_id) DO UPDATE SET
        price = COALESCE(?2, inventory.price),
        status = COALESCE(?3, inventory.status),
        stock_count = COALESCE(?4, inventory.stock_count),
        last_checked_at = COALESCE(?5, inventory.last_checked_at),
        owner_id = COALESCE(?6, inventory.owner_id),
        updated_at = ?7
    RETURNING id";

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open (creating if needed) and migrate the database at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?)
    }

    fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}

fn payload<T: Serialize + std::fmt::Debug>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}

impl Storage for SqliteStore {
    fn upsert_place(&mut self, place: &NewPlace) -> Result<i64, PersistenceError> {
        let now = Local::now().to_rfc3339();
        self.pool
            .conn
            .query_row(
                UPSERT_PLACE,
                params![
                    place.name,
                    place.lat,
                    place.lng,
                    place.address,
                    place.is_open,
                    place.location_resolved,
                    now,
                    ADDRESS_UNKNOWN,
                ],
                |row| row.get(0),
            )
            .map_err(|e| PersistenceError::new(StorageOp::UpsertPlace, payload(place), e))
    }

    fn upsert_inventory(&mut self, inventory: &NewInventory) -> Result<i64, PersistenceError> {
        let now = Local::now().to_rfc3339();
        self.pool
            .conn
            .query_row(
                UPSERT_INVENTORY,
                params![
                    inventory.place_id,
                    inventory.price,
                    inventory.status.map(|s| s.to_db_str()),
                    inventory.stock_count,
                    inventory.last_checked_at,
                    inventory.owner_id,
                    now,
                ],
                |row| row.get(0),
            )
            .map_err(|e| PersistenceError::new(StorageOp::UpsertInventory, payload(inventory), e))
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
