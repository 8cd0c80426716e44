//! # stepfree-map
//!
//! Accessibility-aware map overlay engine: keeps obstacle polygons, a
//! computed walking route and endpoint markers in sync with a map widget's
//! viewport, while avoiding redundant backend fetches.
//!
//! The map widget itself stays external behind the [`MapBridge`] trait; the
//! engine decides *when* to fetch obstacle data (significance threshold +
//! bounding-box containment over the last fetch), coalesces viewport bursts
//! through a trailing debounce, and classifies routes into display styles
//! per mobility profile.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use stepfree_map::{
//!     ApiClient, ApiConfig, HeadlessBridge, LatLng, MapSession, MobilityType, PickTarget,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = ApiClient::new(ApiConfig::default())?;
//!     let session = MapSession::new(HeadlessBridge::new(), api);
//!     session.init().await;
//!
//!     // Forward widget events:
//!     session.on_viewport_settled().await;
//!     session
//!         .on_map_clicked(LatLng::new(37.4893, 127.03525), Some(PickTarget::Start))
//!         .await;
//!     session
//!         .on_map_clicked(LatLng::new(37.4922, 127.0301), Some(PickTarget::End))
//!         .await;
//!
//!     match session.search_route(MobilityType::Wheelchair).await {
//!         Ok(route) => println!("{}", stepfree_map::summarize(&route).message),
//!         Err(err) => eprintln!("{}", err.user_message()),
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bridge;
pub mod core;

pub use crate::api::{ApiClient, ApiConfig, RouteRequest};
pub use crate::bridge::headless::HeadlessBridge;
pub use crate::bridge::{FillStyle, LineStyle, MapBridge, ShapeHandle};
pub use crate::core::bounds::{GeoBounds, SIGNIFICANCE_THRESHOLD_DEG};
pub use crate::core::classify::{
    classify, RouteStyle, Severity, COLOR_ACCESSIBLE, COLOR_NEUTRAL, COLOR_WARNING,
};
pub use crate::core::debounce::{Debouncer, VIEWPORT_SETTLE_DELAY};
pub use crate::core::error::{Error, Result};
pub use crate::core::model::{
    LatLng, MobilityType, ObstacleCollection, ObstacleFeature, ObstacleType, PickSelection,
    PickTarget, RouteDetail, RouteEdge,
};
pub use crate::core::session::{MapSession, SyncState};
pub use crate::core::summary::{format_distance, summarize, RouteSummary};
