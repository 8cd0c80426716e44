//! Route-to-style classification
//!
//! Pure mapping from a route result and its requested mobility profile to a
//! display color and warning level. Barrier-free profiles (wheelchair,
//! stroller, elderly) key off full-route accessibility; the general
//! pedestrian profile keys off the presence of stairs only, since stairs do
//! not block a pedestrian.

use crate::core::model::RouteDetail;

/// Line color for routes needing caution or a detour.
pub const COLOR_WARNING: &str = "#dd6b20";
/// Line color for fully accessible barrier-free routes.
pub const COLOR_ACCESSIBLE: &str = "#2f855a";
/// Line color for ordinary pedestrian routes.
pub const COLOR_NEUTRAL: &str = "#3182ce";

/// Warning level of a classified route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Route is fine for the requested profile.
    Clear,
    /// Route needs attention (inaccessible stretch or stairs).
    Caution,
}

/// Display style computed for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteStyle {
    pub color: &'static str,
    pub severity: Severity,
}

/// Classify a route result into its rendering style.
pub fn classify(route: &RouteDetail) -> RouteStyle {
    if route.requested_mobility_type.is_barrier_free() {
        if route.fully_accessible {
            RouteStyle {
                color: COLOR_ACCESSIBLE,
                severity: Severity::Clear,
            }
        } else {
            RouteStyle {
                color: COLOR_WARNING,
                severity: Severity::Caution,
            }
        }
    } else if route.has_stairs() {
        RouteStyle {
            color: COLOR_WARNING,
            severity: Severity::Caution,
        }
    } else {
        RouteStyle {
            color: COLOR_NEUTRAL,
            severity: Severity::Clear,
        }
    }
}
