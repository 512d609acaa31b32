//! Geographic coordinates and the planar map projection.
//!
//! Stations are defined by latitude/longitude and projected once, at world
//! init, onto a planar `(x, y)` surface where one unit is
//! [`METRES_PER_UNIT`] metres.  Everything downstream (vehicle motion,
//! spatial picking, rendering) works in planar units.

/// Metres represented by one planar unit.
pub const METRES_PER_UNIT: f64 = 10.0;

/// Mean Earth radius used by the projection, in metres.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── Position ──────────────────────────────────────────────────────────────────

/// A point on the planar map.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in planar units.
    #[inline]
    pub fn distance(self, other: Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Euclidean distance converted to metres.
    #[inline]
    pub fn distance_m(self, other: Position) -> f64 {
        self.distance(other) * METRES_PER_UNIT
    }

    /// Point at fraction `t ∈ [0, 1]` of the way from `self` to `other`.
    #[inline]
    pub fn lerp(self, other: Position, t: f64) -> Position {
        let t = t.clamp(0.0, 1.0);
        Position {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

// ── MapProjection ─────────────────────────────────────────────────────────────

/// Maps geographic coordinates onto the planar map.
///
/// The scale is derived from the map's diagonal: `scale = diagonal_m / 10`,
/// then `x = (lon - start.lon) * scale` and `y = (start.lat - lat) * scale`,
/// so the start corner lands on the origin and latitude grows upward on
/// screen.  No attempt is made at geographic accuracy beyond city scale.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapProjection {
    pub start: GeoPoint,
    pub end:   GeoPoint,
    pub scale: f64,
}

impl MapProjection {
    /// Build the projection for a map spanning `start` to `end`.
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        let scale = start.distance_m(end) / METRES_PER_UNIT;
        Self { start, end, scale }
    }

    /// Project a geographic point to planar coordinates.
    #[inline]
    pub fn project(&self, p: GeoPoint) -> Position {
        Position {
            x: (p.lon - self.start.lon) * self.scale,
            y: (self.start.lat - p.lat) * self.scale,
        }
    }
}
