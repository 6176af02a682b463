//! Persisted location entity ("store").

use serde::Serialize;

/// Stored when the address heuristic finds nothing.
pub const ADDRESS_UNKNOWN: &str = "주소 정보 없음";

/// WGS84 decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Sentinel persisted for places whose position could not be resolved.
    /// Consumers must read `(0, 0)` as "no location".
    pub const UNRESOLVED: Coordinates = Coordinates { lat: 0.0, lng: 0.0 };

    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_unresolved(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }
}

/// Write payload for `upsert_place`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPlace {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub is_open: bool,
    pub location_resolved: bool,
}

impl NewPlace {
    pub fn new(name: &str, coords: Coordinates, address: &str) -> Self {
        Self {
            name: name.to_string(),
            lat: coords.lat,
            lng: coords.lng,
            address: address.to_string(),
            is_open: true,
            location_resolved: !coords.is_unresolved(),
        }
    }
}

/// A `places` row.
#[derive(Debug, Clone, Serialize)]
pub struct Place {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub is_open: bool,
    pub location_resolved: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Place {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}
