use crate::errors::{AppError, AppResult};
use crate::models::inventory::{Inventory, InventoryStatus};
use crate::models::place::Place;
use rusqlite::{Connection, OptionalExtension, Result, Row};

pub fn map_place(row: &Row) -> Result<Place> {
    Ok(Place {
        id: row.get("id")?,
        name: row.get("name")?,
        lat: row.get("lat")?,
        lng: row.get("lng")?,
        address: row.get("address")?,
        is_open: row.get("is_open")?,
        location_resolved: row.get("location_resolved")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn map_inventory(row: &Row) -> Result<Inventory> {
    let status_str: String = row.get("status")?;
    let status = InventoryStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(Inventory {
        id: row.get("id")?,
        place_id: row.get("place_id")?,
        price: row.get("price")?,
        status,
        stock_count: row.get("stock_count")?,
        last_checked_at: row.get("last_checked_at")?,
        owner_id: row.get("owner_id")?,
    })
}

pub fn find_place_by_name(conn: &Connection, name: &str) -> AppResult<Option<Place>> {
    let place = conn
        .query_row("SELECT * FROM places WHERE name = ?1", [name], map_place)
        .optional()?;
    Ok(place)
}

pub fn inventory_for_place(conn: &Connection, place_id: i64) -> AppResult<Option<Inventory>> {
    let inv = conn
        .query_row(
            "SELECT * FROM inventory WHERE place_id = ?1",
            [place_id],
            map_inventory,
        )
        .optional()?;
    Ok(inv)
}

pub fn count_rows(conn: &Connection, table: &str) -> AppResult<i64> {
    let sql = match table {
        "places" => "SELECT COUNT(*) FROM places",
        "inventory" => "SELECT COUNT(*) FROM inventory",
        other => return Err(AppError::Other(format!("unknown table: {other}"))),
    };
    Ok(conn.query_row(sql, [], |row| row.get(0))?)
}

/// Every place with its inventory row (if any), ordered by id.
pub fn load_places_with_inventory(conn: &Connection) -> AppResult<Vec<(Place, Option<Inventory>)>> {
    let mut stmt = conn.prepare("SELECT * FROM places ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_place)?;

    let mut out = Vec::new();
    for r in rows {
        let place = r?;
        let inv = inventory_for_place(conn, place.id)?;
        out.push((place, inv));
    }
    Ok(out)
}
