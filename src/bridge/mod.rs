//! Viewport event bridge contract
//!
//! The map widget is an external collaborator. The engine only needs what
//! this trait describes: the current visible bounds, imperative draw/clear
//! primitives that return disposable handles, viewport fitting, and one
//! reusable popup surface. Widget SDK wrappers implement `MapBridge`;
//! [`headless::HeadlessBridge`] is a recording implementation for tests and
//! widgetless embedders.
//!
//! Event subscriptions flow the other way: the embedder forwards widget
//! callbacks (viewport settled, map clicked, shape clicked) to the matching
//! `MapSession` methods.

pub mod headless;

use crate::core::bounds::GeoBounds;
use crate::core::model::LatLng;

/// Opaque reference to a drawn primitive, assigned by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeHandle(u64);

impl ShapeHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Stroke style for polylines.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
}

impl LineStyle {
    /// Route polyline style with the classified color.
    pub fn route(color: &str) -> Self {
        Self {
            color: color.to_string(),
            weight: 5,
            opacity: 0.9,
        }
    }
}

/// Stroke + fill style for polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct FillStyle {
    pub stroke_color: String,
    pub stroke_weight: u32,
    pub stroke_opacity: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

/// Capabilities the map widget must expose to the engine.
///
/// Implementations are expected to use interior mutability; all methods take
/// `&self` so a bridge can be shared with spawned debounce tasks.
pub trait MapBridge {
    /// Current visible bounds, or `None` while the widget is not initialized.
    fn current_bounds(&self) -> Option<GeoBounds>;

    fn add_marker(&self, at: LatLng) -> ShapeHandle;

    fn add_polyline(&self, path: &[LatLng], style: &LineStyle) -> ShapeHandle;

    fn add_polygon(&self, ring: &[LatLng], style: &FillStyle) -> ShapeHandle;

    /// Release a drawn primitive. Unknown handles are a no-op.
    fn remove_shape(&self, handle: ShapeHandle);

    /// Reposition the viewport to cover `bounds`.
    fn fit_bounds(&self, bounds: GeoBounds);

    /// Fill and open the single shared popup surface at `at`.
    fn show_popup(&self, content: &str, at: LatLng);
}
