//! Map session: viewport-driven obstacle synchronization and route display
//!
//! `MapSession` is the explicit owner of everything the engine mutates: the
//! bounds cache (`SyncState`), the overlay handle collections, the pick
//! selection and the debounce timer, plus a handle to the map bridge and the
//! API client. Embedders construct it once, forward widget events to it and
//! tear it down explicitly.
//!
//! Concurrency model: all logic runs on event callbacks; suspension happens
//! only at network await points, and no lock is held across them. Overlapping
//! obstacle fetches are possible (an idle event racing a post-route-fit
//! re-trigger) and are deliberately not serialized or generation-tagged:
//! whichever response lands last wins both the overlay and `last_fetched`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, warn};
use tokio::sync::Mutex;

use crate::api::{ApiClient, RouteRequest};
use crate::bridge::{MapBridge, ShapeHandle};
use crate::core::bounds::GeoBounds;
use crate::core::classify::classify;
use crate::core::debounce::{Debouncer, VIEWPORT_SETTLE_DELAY};
use crate::core::error::{Error, Result};
use crate::core::model::{LatLng, MobilityType, PickSelection, PickTarget, RouteDetail};
use crate::core::overlay::Overlay;

/// Bounds cache driving the fetch-or-skip decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncState {
    /// Last bounds that passed the significance filter.
    pub last_evaluated: Option<GeoBounds>,
    /// Bounds of the last successful fetch. When set, the obstacle data
    /// currently drawn is the data fetched for exactly these bounds.
    pub last_fetched: Option<GeoBounds>,
}

struct SessionInner<B> {
    bridge: B,
    api: ApiClient,
    sync: Mutex<SyncState>,
    overlay: Mutex<Overlay>,
    debounce: Mutex<Debouncer>,
    picks: Mutex<PickSelection>,
    bridge_warned: AtomicBool,
}

/// One map session. Cheap to clone; clones share all state.
pub struct MapSession<B: MapBridge + Send + Sync + 'static> {
    inner: Arc<SessionInner<B>>,
}

impl<B: MapBridge + Send + Sync + 'static> Clone for MapSession<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: MapBridge + Send + Sync + 'static> MapSession<B> {
    pub fn new(bridge: B, api: ApiClient) -> Self {
        Self::with_debounce_delay(bridge, api, VIEWPORT_SETTLE_DELAY)
    }

    /// Build a session with a custom viewport-settle delay.
    pub fn with_debounce_delay(bridge: B, api: ApiClient, delay: Duration) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                bridge,
                api,
                sync: Mutex::new(SyncState::default()),
                overlay: Mutex::new(Overlay::new()),
                debounce: Mutex::new(Debouncer::new(delay)),
                picks: Mutex::new(PickSelection::default()),
                bridge_warned: AtomicBool::new(false),
            }),
        }
    }

    /// Run the initial obstacle evaluation. Call once after construction,
    /// when the widget is (or may be) ready.
    pub async fn init(&self) {
        self.refresh_obstacles().await;
    }

    /// Viewport-settled trigger: coalesced through the debouncer so a rapid
    /// pan/zoom burst yields a single evaluation with the final bounds.
    pub async fn on_viewport_settled(&self) {
        let session = self.clone();
        self.inner.debounce.lock().await.schedule(async move {
            session.refresh_obstacles().await;
        });
    }

    /// Evaluate the current viewport and fetch obstacles if warranted.
    ///
    /// Decision order: missing bounds is a no-op; an insignificant change
    /// (vs the last evaluated bounds) is a no-op; bounds still inside the
    /// last fetched rectangle reuse the drawn data; otherwise fetch, redraw
    /// and remember the fetched rectangle. A failed fetch keeps the previous
    /// overlay and cache untouched: stale data beats no data.
    pub async fn refresh_obstacles(&self) {
        let inner = &self.inner;

        let Some(current) = inner.bridge.current_bounds() else {
            if !inner.bridge_warned.swap(true, Ordering::Relaxed) {
                error!("map bridge reports no viewport bounds; is the widget initialized?");
            }
            return;
        };

        {
            let mut sync = inner.sync.lock().await;
            if !current.differs_significantly(sync.last_evaluated.as_ref()) {
                debug!("viewport change below significance threshold, skipping");
                return;
            }
            sync.last_evaluated = Some(current);

            if let Some(fetched) = &sync.last_fetched {
                if current.is_within(fetched) {
                    debug!("viewport still covered by last fetch, skipping");
                    return;
                }
            }
        } // lock released before the network await; see module docs on races

        match inner.api.obstacles_in(&current).await {
            Ok(collection) => {
                let drawn = inner
                    .overlay
                    .lock()
                    .await
                    .draw_obstacles(&inner.bridge, &collection);
                inner.sync.lock().await.last_fetched = Some(current);
                debug!("obstacle overlay updated: {drawn} polygons");
            }
            Err(err) => {
                // Keep the previous overlay and last_fetched as-is.
                warn!("obstacle fetch failed: {err}");
            }
        }
    }

    /// Map click with the pick mode supplied by the caller at dispatch time.
    /// Updates the selection and redraws the endpoint markers; clicks with
    /// no active mode are ignored.
    pub async fn on_map_clicked(&self, point: LatLng, mode: Option<PickTarget>) {
        let Some(target) = mode else {
            return;
        };
        let selection = {
            let mut picks = self.inner.picks.lock().await;
            picks.set(target, point);
            *picks
        };
        self.inner
            .overlay
            .lock()
            .await
            .draw_markers(&self.inner.bridge, selection.start, selection.end);
    }

    /// Obstacle polygon click: open the shared popup with the feature's
    /// metadata. Returns false for handles that are no longer drawn.
    pub async fn obstacle_clicked(&self, handle: ShapeHandle, at: LatLng) -> bool {
        let content = self.inner.overlay.lock().await.popup_content(handle);
        match content {
            Some(content) => {
                self.inner.bridge.show_popup(&content, at);
                true
            }
            None => false,
        }
    }

    /// Search a route between the picked endpoints and display it.
    /// On failure the route overlay is cleared and the error is returned for
    /// user-facing classification; the obstacle overlay is left alone.
    pub async fn search_route(&self, mobility: MobilityType) -> Result<RouteDetail> {
        let (start, end) = self
            .inner
            .picks
            .lock()
            .await
            .endpoints()
            .ok_or(Error::EndpointsNotSet)?;

        let request = RouteRequest {
            start_latitude: start.lat,
            start_longitude: start.lon,
            end_latitude: end.lat,
            end_longitude: end.lon,
            mobility_type: mobility,
        };

        match self.inner.api.route_detail(&request).await {
            Ok(route) => {
                self.apply_route(&route).await;
                Ok(route)
            }
            Err(err) => {
                self.clear_route().await;
                Err(err)
            }
        }
    }

    /// Display an externally obtained route: classify it, redraw the route
    /// polyline, fit the viewport to it and re-evaluate obstacles right away.
    /// The re-trigger skips the debounce delay (it is a programmatic move,
    /// not a gesture burst) but runs through the same decision logic.
    pub async fn apply_route(&self, route: &RouteDetail) {
        let style = classify(route);
        let extent = self
            .inner
            .overlay
            .lock()
            .await
            .draw_route(&self.inner.bridge, route, &style);

        if let Some(extent) = extent {
            self.inner.bridge.fit_bounds(extent);
        }

        self.refresh_obstacles().await;
    }

    /// Remove the drawn route, if any.
    pub async fn clear_route(&self) {
        self.inner
            .overlay
            .lock()
            .await
            .clear_route(&self.inner.bridge);
    }

    /// Current start/end selection.
    pub async fn selection(&self) -> PickSelection {
        *self.inner.picks.lock().await
    }

    /// Snapshot of the bounds cache.
    pub async fn sync_state(&self) -> SyncState {
        *self.inner.sync.lock().await
    }

    pub fn bridge(&self) -> &B {
        &self.inner.bridge
    }

    /// Badge image URL for a user; `None` on any lookup failure.
    pub async fn user_badge_url(&self, user_id: &str) -> Option<String> {
        self.inner.api.user_badge_url(user_id).await
    }

    /// Cancel any pending debounced evaluation and release every drawn
    /// shape. The session is inert afterwards but can be re-initialized.
    pub async fn teardown(&self) {
        self.inner.debounce.lock().await.cancel_pending();
        self.inner.overlay.lock().await.clear_all(&self.inner.bridge);
        *self.inner.sync.lock().await = SyncState::default();
        *self.inner.picks.lock().await = PickSelection::default();
    }
}
