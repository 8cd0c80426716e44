//! Human-readable route summaries
//!
//! Distance formatting and the one-line status message shown under the map
//! after a search.

use crate::core::classify::{COLOR_ACCESSIBLE, COLOR_NEUTRAL, COLOR_WARNING};
use crate::core::model::RouteDetail;

/// Color routes for blocked routes in the summary panel.
pub const COLOR_BLOCKED: &str = "#e53e3e";

/// One-line summary of a route result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    pub distance_text: String,
    pub message: String,
    pub color: &'static str,
}

/// Format a distance in meters, switching to kilometers at 1000 m.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

/// Summarize a route result for display.
pub fn summarize(route: &RouteDetail) -> RouteSummary {
    let distance_text = format_distance(route.total_distance_meters);
    let profile = route.requested_mobility_type.label();

    if !route.fully_accessible {
        let mut message = format!("Not fully passable for the {profile} profile.");
        if let Some(reason) = &route.first_blocked_reason {
            message.push_str(&format!(" ({reason})"));
        }
        if let Some(seq) = route.accessible_until_seq {
            message.push_str(&format!(" Passable up to segment {seq}."));
        }
        return RouteSummary {
            distance_text,
            message,
            color: COLOR_BLOCKED,
        };
    }

    if route.requested_mobility_type.is_barrier_free() {
        RouteSummary {
            distance_text,
            message: format!("Obstacle-avoiding route for the {profile} profile."),
            color: COLOR_ACCESSIBLE,
        }
    } else if route.has_stairs() {
        RouteSummary {
            distance_text,
            message: "This route includes stair sections.".to_string(),
            color: COLOR_WARNING,
        }
    } else {
        RouteSummary {
            distance_text,
            message: "Ordinary walking route.".to_string(),
            color: COLOR_NEUTRAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{MobilityType, RouteEdge, RouteGeometry};

    fn route(mobility: MobilityType, fully_accessible: bool, stairs: bool) -> RouteDetail {
        RouteDetail {
            total_distance_meters: 1234.5,
            route: RouteGeometry {
                geometry_type: "LineString".to_string(),
                coordinates: vec![[127.0, 37.4], [127.01, 37.41]],
            },
            edges: vec![RouteEdge {
                seq: 1,
                edge_id: 0,
                highway: None,
                surface: None,
                length_meters: 1234.5,
                stairs,
                passable: true,
                not_passable_reason: None,
            }],
            fully_accessible,
            accessible_until_seq: None,
            first_blocked_reason: None,
            requested_mobility_type: mobility,
        }
    }

    #[test]
    fn test_format_distance_switches_at_one_km() {
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(1000.0), "1.00 km");
        assert_eq!(format_distance(1234.5), "1.23 km");
    }

    #[test]
    fn test_blocked_route_includes_reason_and_last_segment() {
        let mut blocked = route(MobilityType::Wheelchair, false, false);
        blocked.first_blocked_reason = Some("stairs".to_string());
        blocked.accessible_until_seq = Some(3);
        let summary = summarize(&blocked);
        assert_eq!(summary.color, COLOR_BLOCKED);
        assert!(summary.message.contains("stairs"));
        assert!(summary.message.contains("segment 3"));
    }

    #[test]
    fn test_summary_tones() {
        assert_eq!(
            summarize(&route(MobilityType::Wheelchair, true, false)).color,
            COLOR_ACCESSIBLE
        );
        assert_eq!(
            summarize(&route(MobilityType::Pedestrian, true, true)).color,
            COLOR_WARNING
        );
        assert_eq!(
            summarize(&route(MobilityType::Pedestrian, true, false)).color,
            COLOR_NEUTRAL
        );
    }
}
