//! HTTP clients for the routing and point-service backends
//!
//! Thin typed wrappers: route lookup (POST), obstacle lookup by bounding box
//! (GET) and the ancillary badge-image lookup. The engine is agnostic to the
//! base URLs; they only have to be present before a session is built.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::bounds::GeoBounds;
use crate::core::error::{Error, Result};
use crate::core::model::{MobilityType, ObstacleCollection, RouteDetail};

/// Backend endpoints and transport settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the routing/obstacle backend.
    pub routing_base_url: String,
    /// Base URL of the point service (badge lookups).
    pub point_service_base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            routing_base_url: "http://localhost:8080".to_string(),
            point_service_base_url: "http://localhost:8081".to_string(),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// Route lookup request payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub start_latitude: f64,
    pub start_longitude: f64,
    pub end_latitude: f64,
    pub end_longitude: f64,
    pub mobility_type: MobilityType,
}

/// Error body the backend attaches to non-2xx route responses.
#[derive(Debug, Default, Deserialize)]
struct BackendFailure {
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BadgeResponse {
    img_url: Option<String>,
}

/// Typed HTTP client over the two backends.
pub struct ApiClient {
    config: ApiConfig,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { config, client })
    }

    /// Look up an accessibility-aware route between two points.
    ///
    /// Non-2xx responses are classified by the backend's machine-readable
    /// code; unrecognized codes map to the generic [`Error::RouteLookup`].
    pub async fn route_detail(&self, request: &RouteRequest) -> Result<RouteDetail> {
        let url = format!("{}/routes/detail", self.config.routing_base_url);
        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let failure: BackendFailure = response.json().await.unwrap_or_default();
            debug!(
                "route lookup rejected: status={status} code={:?}",
                failure.code
            );
            return Err(match failure.code.as_deref() {
                Some("ROUTE_NOT_FOUND") => Error::RouteNotFound,
                Some("ROUTE_NOT_SUITABLE_MOBILITY") => Error::RouteNotSuitable,
                _ => Error::RouteLookup(
                    failure
                        .message
                        .unwrap_or_else(|| format!("HTTP {status}")),
                ),
            });
        }

        Ok(response.json().await?)
    }

    /// Fetch the obstacle features inside `bounds`.
    /// Any non-2xx response is a hard failure for this fetch.
    pub async fn obstacles_in(&self, bounds: &GeoBounds) -> Result<ObstacleCollection> {
        let url = format!("{}/v1/map/obstacles", self.config.routing_base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("minLon", bounds.min_lon.to_string()),
                ("minLat", bounds.min_lat.to_string()),
                ("maxLon", bounds.max_lon.to_string()),
                ("maxLat", bounds.max_lat.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ObstacleFetch(format!("HTTP {status}")));
        }

        Ok(response.json().await?)
    }

    /// Badge image URL for a user, if any. Lookup failures yield `None`,
    /// never an error.
    ///
    /// The id goes into the path as a single percent-encoded segment, so
    /// ids containing `/` or spaces cannot break the request path.
    pub async fn user_badge_url(&self, user_id: &str) -> Option<String> {
        if user_id.is_empty() {
            return None;
        }
        let mut url = reqwest::Url::parse(&self.config.point_service_base_url).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["v1", "point", "badges", "image", user_id]);
        let response = self.client.get(url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.json::<BadgeResponse>().await.ok()?.img_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ApiConfig {
        ApiConfig {
            routing_base_url: server.uri(),
            point_service_base_url: server.uri(),
            request_timeout: Duration::from_secs(2),
        }
    }

    fn sample_request() -> RouteRequest {
        RouteRequest {
            start_latitude: 37.40,
            start_longitude: 127.00,
            end_latitude: 37.42,
            end_longitude: 127.02,
            mobility_type: MobilityType::Wheelchair,
        }
    }

    #[tokio::test]
    async fn test_route_detail_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/routes/detail"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalDistanceMeters": 532.4,
                "route": { "type": "LineString", "coordinates": [[127.0, 37.4], [127.01, 37.41]] },
                "edges": [{
                    "seq": 1, "edgeId": 10, "highway": "footway", "surface": "paved",
                    "lengthMeters": 532.4, "stairs": false, "passable": true,
                    "notPassableReason": null
                }],
                "fullyAccessible": true,
                "accessibleUntilSeq": null,
                "firstBlockedReason": null,
                "requestedMobilityType": "WHEELCHAIR"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(config_for(&server)).unwrap();
        let route = client.route_detail(&sample_request()).await.unwrap();
        assert!(route.fully_accessible);
        assert_eq!(route.requested_mobility_type, MobilityType::Wheelchair);
    }

    #[tokio::test]
    async fn test_route_error_codes_map_to_distinct_variants() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/routes/detail"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "code": "ROUTE_NOT_FOUND", "message": "no path" })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(config_for(&server)).unwrap();
        let err = client.route_detail(&sample_request()).await.unwrap_err();
        assert!(matches!(err, Error::RouteNotFound));
    }

    #[tokio::test]
    async fn test_route_unknown_code_maps_to_generic_lookup_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/routes/detail"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({ "code": "GRAPH_EXPLODED", "message": "boom" })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(config_for(&server)).unwrap();
        let err = client.route_detail(&sample_request()).await.unwrap_err();
        match err {
            Error::RouteLookup(msg) => assert_eq!(msg, "boom"),
            other => panic!("expected RouteLookup, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_route_unreadable_error_body_still_generic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/routes/detail"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = ApiClient::new(config_for(&server)).unwrap();
        let err = client.route_detail(&sample_request()).await.unwrap_err();
        assert!(matches!(err, Error::RouteLookup(_)));
    }

    #[tokio::test]
    async fn test_obstacles_sends_bbox_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/map/obstacles"))
            .and(query_param("minLon", "127"))
            .and(query_param("minLat", "37.4"))
            .and(query_param("maxLon", "127.02"))
            .and(query_param("maxLat", "37.42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "FeatureCollection",
                "features": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(config_for(&server)).unwrap();
        let bounds = GeoBounds::new(37.40, 127.0, 37.42, 127.02);
        let collection = client.obstacles_in(&bounds).await.unwrap();
        assert!(collection.features.is_empty());
    }

    #[tokio::test]
    async fn test_obstacles_non_2xx_is_hard_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/map/obstacles"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = ApiClient::new(config_for(&server)).unwrap();
        let bounds = GeoBounds::new(37.40, 127.0, 37.42, 127.02);
        let err = client.obstacles_in(&bounds).await.unwrap_err();
        assert!(matches!(err, Error::ObstacleFetch(_)));
    }

    #[tokio::test]
    async fn test_badge_lookup_never_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/point/badges/image/u-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "imgUrl": "https://x/b.png" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/point/badges/image/u-2"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = ApiClient::new(config_for(&server)).unwrap();
        assert_eq!(
            client.user_badge_url("u-1").await,
            Some("https://x/b.png".to_string())
        );
        assert_eq!(client.user_badge_url("u-2").await, None);
        assert_eq!(client.user_badge_url("").await, None);
    }

    #[tokio::test]
    async fn test_badge_user_id_is_escaped_into_one_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "imgUrl": "https://x/b.png" })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(config_for(&server)).unwrap();
        client.user_badge_url("team/7 a").await;

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url.path(),
            "/v1/point/badges/image/team%2F7%20a"
        );
    }
}
