//! Recording bridge for tests and widgetless embedders
//!
//! Keeps every live shape in memory and mimics the widget's auto-fit by
//! adopting fitted bounds as the new current bounds.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::bridge::{FillStyle, LineStyle, MapBridge, ShapeHandle};
use crate::core::bounds::GeoBounds;
use crate::core::model::LatLng;

/// A primitive currently drawn on the headless canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Marker {
        at: LatLng,
    },
    Polyline {
        path: Vec<LatLng>,
        color: String,
    },
    Polygon {
        ring: Vec<LatLng>,
    },
}

/// In-memory `MapBridge` implementation.
#[derive(Default)]
pub struct HeadlessBridge {
    bounds: Mutex<Option<GeoBounds>>,
    next_handle: AtomicU64,
    shapes: Mutex<HashMap<ShapeHandle, Shape>>,
    popup: Mutex<Option<(String, LatLng)>>,
    fitted: Mutex<Vec<GeoBounds>>,
}

impl HeadlessBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bridge already reporting `bounds` as visible.
    pub fn with_bounds(bounds: GeoBounds) -> Self {
        let bridge = Self::new();
        bridge.set_bounds(bounds);
        bridge
    }

    /// Simulate a pan/zoom: replace the reported viewport bounds.
    pub fn set_bounds(&self, bounds: GeoBounds) {
        *self.bounds.lock().expect("bounds lock") = Some(bounds);
    }

    /// Snapshot of a live shape, if the handle is still drawn.
    pub fn shape(&self, handle: ShapeHandle) -> Option<Shape> {
        self.shapes.lock().expect("shapes lock").get(&handle).cloned()
    }

    /// All live shapes, unordered.
    pub fn shapes(&self) -> Vec<Shape> {
        self.shapes
            .lock()
            .expect("shapes lock")
            .values()
            .cloned()
            .collect()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.lock().expect("shapes lock").len()
    }

    pub fn polyline_colors(&self) -> Vec<String> {
        self.shapes()
            .into_iter()
            .filter_map(|s| match s {
                Shape::Polyline { color, .. } => Some(color),
                _ => None,
            })
            .collect()
    }

    pub fn marker_positions(&self) -> Vec<LatLng> {
        self.shapes()
            .into_iter()
            .filter_map(|s| match s {
                Shape::Marker { at } => Some(at),
                _ => None,
            })
            .collect()
    }

    pub fn polygon_count(&self) -> usize {
        self.shapes()
            .iter()
            .filter(|s| matches!(s, Shape::Polygon { .. }))
            .count()
    }

    /// Content and position of the last opened popup.
    pub fn last_popup(&self) -> Option<(String, LatLng)> {
        self.popup.lock().expect("popup lock").clone()
    }

    /// Every `fit_bounds` call, oldest first.
    pub fn fitted_bounds(&self) -> Vec<GeoBounds> {
        self.fitted.lock().expect("fitted lock").clone()
    }

    fn insert(&self, shape: Shape) -> ShapeHandle {
        let handle = ShapeHandle::new(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.shapes.lock().expect("shapes lock").insert(handle, shape);
        handle
    }
}

impl MapBridge for HeadlessBridge {
    fn current_bounds(&self) -> Option<GeoBounds> {
        *self.bounds.lock().expect("bounds lock")
    }

    fn add_marker(&self, at: LatLng) -> ShapeHandle {
        self.insert(Shape::Marker { at })
    }

    fn add_polyline(&self, path: &[LatLng], style: &LineStyle) -> ShapeHandle {
        self.insert(Shape::Polyline {
            path: path.to_vec(),
            color: style.color.clone(),
        })
    }

    fn add_polygon(&self, ring: &[LatLng], _style: &FillStyle) -> ShapeHandle {
        self.insert(Shape::Polygon {
            ring: ring.to_vec(),
        })
    }

    fn remove_shape(&self, handle: ShapeHandle) {
        self.shapes.lock().expect("shapes lock").remove(&handle);
    }

    fn fit_bounds(&self, bounds: GeoBounds) {
        self.fitted.lock().expect("fitted lock").push(bounds);
        // The real widget reports the fitted region as its new viewport.
        self.set_bounds(bounds);
    }

    fn show_popup(&self, content: &str, at: LatLng) {
        *self.popup.lock().expect("popup lock") = Some((content.to_string(), at));
    }
}
