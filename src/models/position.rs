use serde::{Deserialize, Serialize};

/// Scale factor of integer-encoded WGS84 degrees (`1271136432` → `127.1136432`).
pub const DEGREE_SCALE: f64 = 10_000_000.0;

/// Raw positional representation as yielded by a candidate source.
///
/// `x` is always the east/west axis (longitude-like) and `y` the north/south
/// axis (latitude-like), whatever the encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawPosition {
    /// Plain decimal degrees.
    Degrees { lat: f64, lng: f64 },
    /// Degrees multiplied by 10,000,000.
    Scaled { x: i64, y: i64 },
    /// Legacy Korean TM128 (KATECH) grid metres.
    Tm128 { x: i64, y: i64 },
    /// Untyped text pair straight from a response body.
    Text { x: String, y: String },
}

impl RawPosition {
    /// Classify an integer pair coming from the local search API.
    ///
    /// Scaled WGS84 values have at least seven digits of fraction, so anything
    /// whose magnitude stays below one scaled degree on both axes is a TM128
    /// grid reading (those are at most a few hundred thousand metres).
    pub fn from_map_xy(x: i64, y: i64) -> Self {
        let one_degree = DEGREE_SCALE as u64;
        if x.unsigned_abs() < one_degree && y.unsigned_abs() < one_degree {
            RawPosition::Tm128 { x, y }
        } else {
            RawPosition::Scaled { x, y }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RawPosition::Degrees { .. } => "degrees",
            RawPosition::Scaled { .. } => "scaled",
            RawPosition::Tm128 { .. } => "tm128",
            RawPosition::Text { .. } => "text",
        }
    }
}
