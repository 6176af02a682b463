//! Coordinate resolver: raw positional fields → WGS84 decimal degrees.
//!
//! Never fails past this boundary. Anything that cannot be converted exactly
//! comes back as [`Resolution::Unresolved`] and the caller stores
//! [`Coordinates::UNRESOLVED`] with the record flagged.

use crate::models::place::Coordinates;
use crate::models::position::{DEGREE_SCALE, RawPosition};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Resolved(Coordinates),
    Unresolved(Unresolved),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    /// Projected grid (TM128) that needs a cartographic library.
    Projected,
    /// Non-numeric or non-finite input.
    Malformed,
    /// Numeric but outside the valid degree range.
    OutOfRange,
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::Projected => f.write_str("projected TM128 coordinates cannot be converted"),
            Unresolved::Malformed => f.write_str("malformed coordinates"),
            Unresolved::OutOfRange => f.write_str("coordinates out of range"),
        }
    }
}

impl Resolution {
    /// Coordinates to persist: the resolved pair, or the `(0, 0)` sentinel.
    pub fn coordinates(&self) -> Coordinates {
        match self {
            Resolution::Resolved(c) => *c,
            Resolution::Unresolved(_) => Coordinates::UNRESOLVED,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

pub fn resolve(raw: &RawPosition) -> Resolution {
    match raw {
        RawPosition::Degrees { lat, lng } => checked(*lat, *lng),
        // x carries longitude (~1.27e9 around Seoul), y latitude (~3.7e8)
        RawPosition::Scaled { x, y } => checked(*y as f64 / DEGREE_SCALE, *x as f64 / DEGREE_SCALE),
        RawPosition::Tm128 { .. } => Resolution::Unresolved(Unresolved::Projected),
        RawPosition::Text { x, y } => resolve_text(x.trim(), y.trim()),
    }
}

fn resolve_text(x: &str, y: &str) -> Resolution {
    if let (Ok(x), Ok(y)) = (x.parse::<i64>(), y.parse::<i64>()) {
        return resolve(&RawPosition::from_map_xy(x, y));
    }

    match (x.parse::<f64>(), y.parse::<f64>()) {
        (Ok(lng), Ok(lat)) => checked(lat, lng),
        _ => Resolution::Unresolved(Unresolved::Malformed),
    }
}

fn checked(lat: f64, lng: f64) -> Resolution {
    if !lat.is_finite() || !lng.is_finite() {
        return Resolution::Unresolved(Unresolved::Malformed);
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Resolution::Unresolved(Unresolved::OutOfRange);
    }
    Resolution::Resolved(Coordinates::new(lat, lng))
}
