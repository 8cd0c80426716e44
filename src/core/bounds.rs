//! Axis-aligned lat/lon rectangles and the two gates that drive obstacle
//! synchronization: the change-significance test and the containment test.

use crate::core::model::LatLng;

/// Minimum per-edge coordinate delta for a bounds change to count.
/// 0.0003 degrees is roughly 30 m at mid-latitudes; anything smaller is
/// pan jitter that would only churn fetches and redraws.
pub const SIGNIFICANCE_THRESHOLD_DEG: f64 = 0.0003;

/// Axis-aligned bounding rectangle in degrees.
///
/// Invariant: `min_lat <= max_lat` and `min_lon <= max_lon`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Build bounds from a widget's reported southwest/northeast corners.
    pub fn from_corners(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            min_lat: south_west.lat,
            min_lon: south_west.lon,
            max_lat: north_east.lat,
            max_lon: north_east.lon,
        }
    }

    /// Smallest rectangle covering all of `points`; `None` when empty.
    /// Used to fit the viewport to a freshly drawn route.
    pub fn around(points: &[LatLng]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self::new(first.lat, first.lon, first.lat, first.lon);
        for p in &points[1..] {
            bounds.min_lat = bounds.min_lat.min(p.lat);
            bounds.min_lon = bounds.min_lon.min(p.lon);
            bounds.max_lat = bounds.max_lat.max(p.lat);
            bounds.max_lon = bounds.max_lon.max(p.lon);
        }
        Some(bounds)
    }

    /// True when these bounds differ from `prev` by more than the
    /// significance threshold on any edge, or when there is no `prev`.
    pub fn differs_significantly(&self, prev: Option<&GeoBounds>) -> bool {
        let Some(prev) = prev else {
            return true;
        };
        (self.min_lat - prev.min_lat).abs() > SIGNIFICANCE_THRESHOLD_DEG
            || (self.min_lon - prev.min_lon).abs() > SIGNIFICANCE_THRESHOLD_DEG
            || (self.max_lat - prev.max_lat).abs() > SIGNIFICANCE_THRESHOLD_DEG
            || (self.max_lon - prev.max_lon).abs() > SIGNIFICANCE_THRESHOLD_DEG
    }

    /// True when this rectangle lies fully inside `outer` (edges included).
    ///
    /// Fetches cover the visible area rather than matching it exactly, so a
    /// viewport still inside the last-fetched rectangle needs no refetch.
    pub fn is_within(&self, outer: &GeoBounds) -> bool {
        self.min_lat >= outer.min_lat
            && self.min_lon >= outer.min_lon
            && self.max_lat <= outer.max_lat
            && self.max_lon <= outer.max_lon
    }
}
