//! Error types for stepfree-map
//!
//! Library code returns typed errors; route lookup failures carry the
//! backend's machine-readable code mapped to a distinct variant so callers
//! can show the right user-facing message.

use thiserror::Error;

/// Main error type for stepfree-map operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Backend reported `ROUTE_NOT_FOUND` for the requested endpoints.
    #[error("no route exists between the selected points")]
    RouteNotFound,

    /// Backend reported `ROUTE_NOT_SUITABLE_MOBILITY` for the profile.
    #[error("no passable route for the selected mobility profile")]
    RouteNotSuitable,

    /// Route lookup failed for any other reason (unknown code, bad payload).
    #[error("route lookup failed: {0}")]
    RouteLookup(String),

    /// Obstacle lookup returned a non-2xx status or an unreadable body.
    #[error("obstacle lookup failed: {0}")]
    ObstacleFetch(String),

    /// A route search was requested before both endpoints were picked.
    #[error("start and end points must be selected before searching")]
    EndpointsNotSet,

    /// Transport-level HTTP failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Short user-facing message for the three route failure classes.
    /// Unrecognized backend codes fall under the generic retry message.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::RouteNotFound => "There is no route between the selected start and end points.",
            Error::RouteNotSuitable => {
                "No route is passable for the selected mobility type. Try a different one."
            }
            Error::EndpointsNotSet => "Select a start and an end point on the map first.",
            _ => "Something went wrong. Please try again in a moment.",
        }
    }
}

/// Convenience result type for stepfree-map operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_distinct_per_class() {
        let not_found = Error::RouteNotFound.user_message();
        let not_suitable = Error::RouteNotSuitable.user_message();
        let generic = Error::RouteLookup("HTTP 500".to_string()).user_message();
        assert_ne!(not_found, not_suitable);
        assert_ne!(not_found, generic);
        assert_ne!(not_suitable, generic);
    }

    #[test]
    fn test_obstacle_failure_uses_generic_message() {
        let err = Error::ObstacleFetch("HTTP 503".to_string());
        assert_eq!(
            err.user_message(),
            Error::RouteLookup(String::new()).user_message()
        );
    }
}
