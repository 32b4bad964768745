//! Marker clustering overlay
//!
//! [`MarkerClusterer`] is the orchestration core of the crate: it owns the
//! marker collection, decides on each draw pass whether the cluster cache is
//! still valid for the view's zoom level, delegates the actual grouping and
//! visuals to its [`ClusterStrategy`], and forwards touch input to cluster
//! markers in topmost-first order.
//!
//! Usage: put markers inside with [`MarkerClusterer::add`] and register the
//! overlay with the host view like any other drawable layer. Depending on
//! the zoom level, markers are then displayed separately or grouped behind a
//! single cluster marker.
//!
//! # Cache lifecycle
//!
//! The cluster list is valid only for the zoom level it was built at. It is
//! rebuilt during a draw pass when the recorded zoom differs from the
//! current one or a rebuild was forced with [`MarkerClusterer::invalidate`],
//! and only while the view is not mid-animation; intermediate frames of a
//! zoom gesture keep drawing the previous clusters.
//!
//! Note that mutating the marker collection does NOT invalidate the cache on
//! its own; call `invalidate()` after changing the overlay's content.

use std::sync::Arc;

use image::RgbaImage;

use crate::cluster::{ClusterContext, ClusterStrategy, StaticCluster};
use crate::coord::BoundingBox;
use crate::marker::{Marker, MarkerRef};
use crate::telemetry::OverlayMetrics;
use crate::view::{Canvas, MapView, TouchEvent};

/// The capability set a drawable, interactive map layer exposes to the host
/// view.
///
/// [`MarkerClusterer`] implements this so it registers exactly like any
/// other overlay. Input hooks return whether the event was consumed.
pub trait Overlay {
    /// Draw the layer. Called by the host on every frame.
    fn draw(&mut self, canvas: &mut dyn Canvas, view: &dyn MapView);

    /// The smallest geographic box enclosing the layer's content, if any.
    fn bounds(&self) -> Option<BoundingBox>;

    /// Route a confirmed single tap into the layer.
    fn on_single_tap_confirmed(&self, event: &TouchEvent, view: &dyn MapView) -> bool;

    /// Route a long press into the layer.
    fn on_long_press(&self, event: &TouchEvent, view: &dyn MapView) -> bool;

    /// Route a double tap into the layer.
    fn on_double_tap(&self, event: &TouchEvent, view: &dyn MapView) -> bool;

    /// Route a raw touch event into the layer.
    fn on_touch_event(&self, event: &TouchEvent, view: &dyn MapView) -> bool;
}

/// Validity of the cached cluster list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheState {
    /// Clusters must be rebuilt at the next non-animating draw pass.
    Stale,
    /// Clusters reflect the marker collection at this zoom level.
    Valid { zoom: u8 },
}

/// A marker-clustering overlay.
///
/// Holds markers in insertion order and a lazily rebuilt cluster list. The
/// grouping algorithm and cluster visuals come from the [`ClusterStrategy`]
/// passed at construction.
///
/// Single-owner-thread contract: the overlay shares markers through `Rc`
/// and must live on the thread that drives the host view's draw and input
/// callbacks (the type is deliberately not `Send`).
pub struct MarkerClusterer {
    items: Vec<MarkerRef>,
    clusters: Vec<StaticCluster>,
    cache: CacheState,
    strategy: Box<dyn ClusterStrategy>,
    name: Option<String>,
    description: Option<String>,
    icon: Option<RgbaImage>,
    metrics: Arc<OverlayMetrics>,
}

impl MarkerClusterer {
    /// Create an empty overlay around the given clustering strategy.
    ///
    /// The cluster cache starts out stale, so the first non-animating draw
    /// pass always builds clusters.
    pub fn new(strategy: Box<dyn ClusterStrategy>) -> Self {
        Self {
            items: Vec::new(),
            clusters: Vec::new(),
            cache: CacheState::Stale,
            strategy,
            name: None,
            description: None,
            icon: None,
            metrics: Arc::new(OverlayMetrics::new()),
        }
    }

    /// Append a marker to the overlay.
    ///
    /// Markers handed to a `MarkerClusterer` should not also be registered
    /// with the host view directly. Adding does NOT invalidate the cluster
    /// cache; call [`invalidate`] after changing the overlay's content.
    ///
    /// [`invalidate`]: MarkerClusterer::invalidate
    pub fn add(&mut self, marker: MarkerRef) {
        self.items.push(marker);
    }

    /// The marker at `index` (insertion order), or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&MarkerRef> {
        self.items.get(index)
    }

    /// The full marker collection, in insertion order.
    pub fn items(&self) -> &[MarkerRef] {
        &self.items
    }

    /// Mutable access to the marker collection.
    ///
    /// There is no dedicated removal operation; callers mutate the list
    /// directly and then call [`invalidate`].
    ///
    /// [`invalidate`]: MarkerClusterer::invalidate
    pub fn items_mut(&mut self) -> &mut Vec<MarkerRef> {
        &mut self.items
    }

    /// Force a cluster rebuild at the next draw pass, even without a zoom
    /// change.
    pub fn invalidate(&mut self) {
        self.cache = CacheState::Stale;
    }

    /// The clusters built by the last rebuild, in draw order.
    pub fn clusters(&self) -> &[StaticCluster] {
        &self.clusters
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Set the icon the strategy may use for cluster visuals when a cluster
    /// groups more than one marker.
    pub fn set_icon(&mut self, icon: RgbaImage) {
        self.icon = Some(icon);
    }

    pub fn icon(&self) -> Option<&RgbaImage> {
        self.icon.as_ref()
    }

    /// Shared handle to the overlay's telemetry counters.
    pub fn metrics(&self) -> Arc<OverlayMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Close every open info window across the full marker collection.
    ///
    /// Runs on the flat list, not just visible clusters, so windows of
    /// markers about to disappear into a cluster are closed too.
    fn hide_info_windows(&self) {
        for marker in &self.items {
            if marker.is_info_window_open() {
                marker.close_info_window();
            }
        }
    }

    /// Forward an event to cluster markers, topmost first.
    ///
    /// Iterates the cluster list in reverse draw order and stops at the
    /// first marker that consumes the event. Empty or marker-less clusters
    /// are skipped silently.
    fn dispatch<F>(&self, forward: F) -> bool
    where
        F: Fn(&dyn Marker) -> bool,
    {
        self.metrics.event_dispatched();
        for cluster in self.clusters.iter().rev() {
            if cluster.is_empty() {
                continue;
            }
            let Some(marker) = cluster.marker() else {
                continue;
            };
            if forward(marker.as_ref()) {
                self.metrics.event_handled();
                return true;
            }
        }
        false
    }
}

impl Overlay for MarkerClusterer {
    /// Draw the overlay's clusters, rebuilding them first if the cache is
    /// stale and the view is not animating.
    ///
    /// A rebuild closes all open info windows, asks the strategy for a new
    /// cluster list, lets the strategy materialize per-cluster visuals, and
    /// records the zoom level. The rebuild always completes before any
    /// cluster is drawn.
    fn draw(&mut self, canvas: &mut dyn Canvas, view: &dyn MapView) {
        self.metrics.draw_pass();

        let zoom = view.zoom_level();
        let stale = match self.cache {
            CacheState::Stale => true,
            CacheState::Valid { zoom: cached } => cached != zoom,
        };
        if stale {
            if view.is_animating() {
                // Mid-gesture frame; keep drawing the previous clusters.
                self.metrics.rebuild_deferred();
            } else {
                self.hide_info_windows();
                let ctx = ClusterContext {
                    items: &self.items,
                    icon: self.icon.as_ref(),
                    name: self.name.as_deref(),
                };
                let mut clusters = self.strategy.cluster(&ctx, view);
                self.strategy.render(&mut clusters, &ctx, canvas, view);
                self.clusters = clusters;
                self.cache = CacheState::Valid { zoom };
                self.metrics.rebuild_performed();
                tracing::debug!(
                    zoom,
                    markers = self.items.len(),
                    clusters = self.clusters.len(),
                    "rebuilt marker clusters"
                );
            }
        }

        for cluster in &self.clusters {
            if cluster.is_empty() {
                continue;
            }
            if let Some(marker) = cluster.marker() {
                marker.draw(canvas, view);
            }
        }
    }

    /// The smallest box containing every marker's position.
    ///
    /// Computed over the flat marker collection, not the clusters, so it is
    /// stable across zoom levels. `None` when the overlay holds no markers.
    fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.items.iter().map(|marker| marker.position()))
    }

    fn on_single_tap_confirmed(&self, event: &TouchEvent, view: &dyn MapView) -> bool {
        self.dispatch(|marker| marker.on_single_tap_confirmed(event, view))
    }

    fn on_long_press(&self, event: &TouchEvent, view: &dyn MapView) -> bool {
        self.dispatch(|marker| marker.on_long_press(event, view))
    }

    fn on_double_tap(&self, event: &TouchEvent, view: &dyn MapView) -> bool {
        self.dispatch(|marker| marker.on_double_tap(event, view))
    }

    fn on_touch_event(&self, event: &TouchEvent, view: &dyn MapView) -> bool {
        self.dispatch(|marker| marker.on_touch_event(event, view))
    }
}
