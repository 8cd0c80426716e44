//! Data model for routes, obstacles and point selection
//!
//! Wire types mirror the backend payloads (camelCase JSON); the handful of
//! helpers on top of them keep coordinate-order conversions in one place.

use serde::{Deserialize, Serialize};

/// A single latitude/longitude point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Requested mobility profile for a route search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MobilityType {
    Pedestrian,
    Wheelchair,
    Stroller,
    Elderly,
}

impl MobilityType {
    /// Barrier-free profiles are styled on full-route accessibility rather
    /// than on the mere presence of stairs.
    pub fn is_barrier_free(&self) -> bool {
        matches!(
            self,
            MobilityType::Wheelchair | MobilityType::Stroller | MobilityType::Elderly
        )
    }

    /// Display label for selection UIs.
    pub fn label(&self) -> &'static str {
        match self {
            MobilityType::Pedestrian => "Pedestrian",
            MobilityType::Wheelchair => "Wheelchair",
            MobilityType::Stroller => "Stroller",
            MobilityType::Elderly => "Elderly",
        }
    }
}

/// One edge of a computed route, in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEdge {
    /// 1-based position within the route, strictly increasing.
    pub seq: u32,
    #[serde(default)]
    pub edge_id: i64,
    #[serde(default)]
    pub highway: Option<String>,
    #[serde(default)]
    pub surface: Option<String>,
    pub length_meters: f64,
    pub stairs: bool,
    pub passable: bool,
    #[serde(default)]
    pub not_passable_reason: Option<String>,
}

/// Route geometry as returned by the backend: a GeoJSON LineString whose
/// coordinates are `[lon, lat]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<[f64; 2]>,
}

/// Full route lookup result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDetail {
    pub total_distance_meters: f64,
    pub route: RouteGeometry,
    pub edges: Vec<RouteEdge>,
    pub fully_accessible: bool,
    #[serde(default)]
    pub accessible_until_seq: Option<u32>,
    #[serde(default)]
    pub first_blocked_reason: Option<String>,
    pub requested_mobility_type: MobilityType,
}

impl RouteDetail {
    /// True when any edge of the route climbs stairs.
    pub fn has_stairs(&self) -> bool {
        self.edges.iter().any(|e| e.stairs)
    }

    /// Route geometry converted to lat/lon points in traversal order.
    pub fn line_points(&self) -> Vec<LatLng> {
        self.route
            .coordinates
            .iter()
            .map(|&[lon, lat]| LatLng::new(lat, lon))
            .collect()
    }
}

/// Known obstacle categories; anything the backend sends beyond these
/// deserializes to `Unknown` and renders with the fallback label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObstacleType {
    Construction,
    Tree,
    Rock,
    Furniture,
    Slope,
    Stairs,
    SidewalkBlocked,
    RoadBlocked,
    ElevatorOutage,
    OtherObstacle,
    #[serde(other)]
    Unknown,
}

impl ObstacleType {
    pub fn label(&self) -> &'static str {
        match self {
            ObstacleType::Construction => "Construction",
            ObstacleType::Tree => "Tree",
            ObstacleType::Rock => "Rock",
            ObstacleType::Furniture => "Furniture",
            ObstacleType::Slope => "Slope",
            ObstacleType::Stairs => "Stairs",
            ObstacleType::SidewalkBlocked => "Sidewalk blocked",
            ObstacleType::RoadBlocked => "Road blocked",
            ObstacleType::ElevatorOutage => "Elevator outage",
            ObstacleType::OtherObstacle | ObstacleType::Unknown => "Obstacle",
        }
    }
}

/// GeoJSON geometry of an obstacle feature. Only polygons are rendered;
/// other types are carried through so a fetch never fails on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    /// Rings of `[lon, lat]` pairs; the first ring is the outer boundary.
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleProperties {
    #[serde(default)]
    pub obstacle_id: Option<i64>,
    #[serde(rename = "type", default)]
    pub obstacle_type: Option<ObstacleType>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// One obstacle feature from the backend feature collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleFeature {
    #[serde(default)]
    pub id: Option<String>,
    pub geometry: ObstacleGeometry,
    #[serde(default)]
    pub properties: Option<ObstacleProperties>,
}

impl ObstacleFeature {
    /// Outer ring as lat/lon points, if this is a drawable polygon.
    ///
    /// Returns `None` for non-polygon geometry or rings with fewer than
    /// three vertices; such features are skipped, never an error.
    pub fn outer_ring(&self) -> Option<Vec<LatLng>> {
        if self.geometry.geometry_type != "Polygon" {
            return None;
        }
        let outer = self.geometry.coordinates.first()?;
        if outer.len() < 3 {
            return None;
        }
        Some(outer.iter().map(|&[lon, lat]| LatLng::new(lat, lon)).collect())
    }

    pub fn obstacle_type(&self) -> ObstacleType {
        self.properties
            .as_ref()
            .and_then(|p| p.obstacle_type)
            .unwrap_or(ObstacleType::Unknown)
    }
}

/// Obstacle lookup response: a GeoJSON feature collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleCollection {
    #[serde(rename = "type", default)]
    pub collection_type: String,
    #[serde(default)]
    pub features: Vec<ObstacleFeature>,
}

/// Which endpoint a map click should set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    Start,
    End,
}

/// Current start/end selection. The overlay treats these as the only
/// authoritative marker positions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PickSelection {
    pub start: Option<LatLng>,
    pub end: Option<LatLng>,
}

impl PickSelection {
    pub fn set(&mut self, target: PickTarget, point: LatLng) {
        match target {
            PickTarget::Start => self.start = Some(point),
            PickTarget::End => self.end = Some(point),
        }
    }

    /// Both endpoints picked, ready for a route search.
    pub fn endpoints(&self) -> Option<(LatLng, LatLng)> {
        Some((self.start?, self.end?))
    }
}
