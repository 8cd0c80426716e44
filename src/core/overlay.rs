//! Overlay renderer
//!
//! Owns the handles of everything currently drawn, split into three
//! categories: endpoint markers, the route polyline and obstacle polygons.
//! Every redraw fully clears its own category first, so stale and fresh
//! shapes of one category never coexist. Obstacle polygons keep popup
//! metadata so a later click can fill the shared popup surface.

use std::collections::HashMap;

use chrono::DateTime;

use crate::bridge::{FillStyle, LineStyle, MapBridge, ShapeHandle};
use crate::core::bounds::GeoBounds;
use crate::core::classify::RouteStyle;
use crate::core::model::{LatLng, ObstacleCollection, RouteDetail};

/// Obstacle polygon palette.
const OBSTACLE_COLOR: &str = "#e53e3e";

fn obstacle_style() -> FillStyle {
    FillStyle {
        stroke_color: OBSTACLE_COLOR.to_string(),
        stroke_weight: 2,
        stroke_opacity: 0.9,
        fill_color: OBSTACLE_COLOR.to_string(),
        fill_opacity: 0.22,
    }
}

/// Popup metadata attached to a drawn obstacle polygon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleInfo {
    pub label: &'static str,
    pub created_at_text: String,
}

impl ObstacleInfo {
    pub fn popup_content(&self) -> String {
        format!("{}\nRegistered: {}", self.label, self.created_at_text)
    }
}

/// Format a feature's creation timestamp for the popup.
/// Unparseable values pass through verbatim; absent ones become "N/A".
fn format_created_at(raw: Option<&str>) -> String {
    match raw {
        None => "N/A".to_string(),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| raw.to_string()),
    }
}

/// Tracks drawn shape handles per category.
#[derive(Default)]
pub struct Overlay {
    markers: Vec<ShapeHandle>,
    route_lines: Vec<ShapeHandle>,
    obstacle_shapes: Vec<ShapeHandle>,
    obstacle_info: HashMap<ShapeHandle, ObstacleInfo>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the obstacle layer with `collection`.
    ///
    /// Features that are not polygons or whose outer ring has fewer than
    /// three vertices are skipped; the rest still render. Returns the number
    /// of polygons drawn.
    pub fn draw_obstacles<B: MapBridge>(
        &mut self,
        bridge: &B,
        collection: &ObstacleCollection,
    ) -> usize {
        self.clear_obstacles(bridge);

        let style = obstacle_style();
        for feature in &collection.features {
            let Some(ring) = feature.outer_ring() else {
                continue;
            };
            let handle = bridge.add_polygon(&ring, &style);
            self.obstacle_info.insert(
                handle,
                ObstacleInfo {
                    label: feature.obstacle_type().label(),
                    created_at_text: format_created_at(
                        feature
                            .properties
                            .as_ref()
                            .and_then(|p| p.created_at.as_deref()),
                    ),
                },
            );
            self.obstacle_shapes.push(handle);
        }
        self.obstacle_shapes.len()
    }

    /// Replace the route polyline, styled per classification. Returns the
    /// route's bounding extent for the caller to fit the viewport to.
    pub fn draw_route<B: MapBridge>(
        &mut self,
        bridge: &B,
        route: &RouteDetail,
        style: &RouteStyle,
    ) -> Option<GeoBounds> {
        self.clear_route(bridge);

        let path = route.line_points();
        if path.len() < 2 {
            return None;
        }
        let handle = bridge.add_polyline(&path, &LineStyle::route(style.color));
        self.route_lines.push(handle);
        GeoBounds::around(&path)
    }

    /// Redraw the 0-2 endpoint markers.
    pub fn draw_markers<B: MapBridge>(
        &mut self,
        bridge: &B,
        start: Option<LatLng>,
        end: Option<LatLng>,
    ) {
        self.clear_markers(bridge);
        for point in [start, end].into_iter().flatten() {
            self.markers.push(bridge.add_marker(point));
        }
    }

    pub fn clear_obstacles<B: MapBridge>(&mut self, bridge: &B) {
        for handle in self.obstacle_shapes.drain(..) {
            bridge.remove_shape(handle);
        }
        self.obstacle_info.clear();
    }

    pub fn clear_route<B: MapBridge>(&mut self, bridge: &B) {
        for handle in self.route_lines.drain(..) {
            bridge.remove_shape(handle);
        }
    }

    pub fn clear_markers<B: MapBridge>(&mut self, bridge: &B) {
        for handle in self.markers.drain(..) {
            bridge.remove_shape(handle);
        }
    }

    /// Release every category; used on session teardown.
    pub fn clear_all<B: MapBridge>(&mut self, bridge: &B) {
        self.clear_obstacles(bridge);
        self.clear_route(bridge);
        self.clear_markers(bridge);
    }

    /// Popup text for a drawn obstacle polygon.
    pub fn popup_content(&self, handle: ShapeHandle) -> Option<String> {
        self.obstacle_info.get(&handle).map(ObstacleInfo::popup_content)
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacle_shapes.len()
    }

    pub fn has_route(&self) -> bool {
        !self.route_lines.is_empty()
    }
}
