//! Clusters and the clustering capability set
//!
//! A [`StaticCluster`] is a group of markers stood in for by a single
//! representative marker when the map is zoomed out. How markers are grouped
//! and what the representative marker looks like is not decided here: both
//! are supplied by the embedding application through a [`ClusterStrategy`]
//! selected when the overlay is constructed.
//!
//! # Example
//!
//! A minimal strategy that leaves every marker in its own cluster, standing
//! for itself:
//!
//! ```
//! use std::rc::Rc;
//!
//! use markerlayer::{
//!     Canvas, ClusterContext, ClusterStrategy, MapView, Marker, MarkerClusterer,
//!     MarkerRef, StaticCluster,
//! };
//!
//! struct PassthroughStrategy;
//!
//! impl ClusterStrategy for PassthroughStrategy {
//!     fn cluster(&mut self, ctx: &ClusterContext<'_>, _view: &dyn MapView) -> Vec<StaticCluster> {
//!         ctx.items
//!             .iter()
//!             .map(|marker| {
//!                 let mut cluster = StaticCluster::new(marker.position());
//!                 cluster.add(Rc::clone(marker));
//!                 cluster
//!             })
//!             .collect()
//!     }
//!
//!     fn build_cluster_marker(
//!         &mut self,
//!         cluster: &StaticCluster,
//!         _ctx: &ClusterContext<'_>,
//!         _view: &dyn MapView,
//!     ) -> MarkerRef {
//!         Rc::clone(cluster.item(0).expect("one marker per cluster"))
//!     }
//!
//!     fn render(
//!         &mut self,
//!         clusters: &mut [StaticCluster],
//!         ctx: &ClusterContext<'_>,
//!         _canvas: &mut dyn Canvas,
//!         view: &dyn MapView,
//!     ) {
//!         for i in 0..clusters.len() {
//!             let marker = self.build_cluster_marker(&clusters[i], ctx, view);
//!             clusters[i].set_marker(marker);
//!         }
//!     }
//! }
//!
//! let overlay = MarkerClusterer::new(Box::new(PassthroughStrategy));
//! assert!(overlay.clusters().is_empty());
//! ```

use image::RgbaImage;

use crate::coord::{BoundingBox, GeoPoint};
use crate::marker::MarkerRef;
use crate::view::{Canvas, MapView};

/// A group of markers represented by one stand-in marker.
///
/// Produced by the clustering strategy, consumed by the overlay's draw and
/// input-dispatch cycles. The member list preserves the order markers were
/// added to the cluster. The representative marker starts out unset; the
/// strategy's render step is expected to populate it. Clusters that stay
/// empty or marker-less are silently skipped by the overlay.
#[derive(Clone)]
pub struct StaticCluster {
    center: GeoPoint,
    items: Vec<MarkerRef>,
    marker: Option<MarkerRef>,
}

impl StaticCluster {
    /// Create an empty cluster anchored at the given position.
    pub fn new(center: GeoPoint) -> Self {
        Self {
            center,
            items: Vec::new(),
            marker: None,
        }
    }

    /// The cluster's anchor position.
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    /// Append a marker to the cluster.
    pub fn add(&mut self, marker: MarkerRef) {
        self.items.push(marker);
    }

    /// The marker at `index`, or `None` if out of range.
    pub fn item(&self, index: usize) -> Option<&MarkerRef> {
        self.items.get(index)
    }

    /// The cluster's member markers, in insertion order.
    pub fn items(&self) -> &[MarkerRef] {
        &self.items
    }

    /// Number of markers in the cluster.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Whether the cluster holds no markers.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The representative marker, if the render step has set one.
    pub fn marker(&self) -> Option<&MarkerRef> {
        self.marker.as_ref()
    }

    /// Set the representative marker drawn in place of the members.
    pub fn set_marker(&mut self, marker: MarkerRef) {
        self.marker = Some(marker);
    }

    /// The smallest box containing every member marker's position.
    ///
    /// `None` for an empty cluster.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.items.iter().map(|marker| marker.position()))
    }
}

impl std::fmt::Debug for StaticCluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCluster")
            .field("center", &self.center)
            .field("size", &self.items.len())
            .field("has_marker", &self.marker.is_some())
            .finish()
    }
}

/// Borrowed overlay state handed to the strategy on each rebuild.
pub struct ClusterContext<'a> {
    /// The overlay's full marker collection, in insertion order.
    pub items: &'a [MarkerRef],
    /// The cluster icon configured on the overlay, if any.
    pub icon: Option<&'a RgbaImage>,
    /// The overlay's display name, if any.
    pub name: Option<&'a str>,
}

/// The clustering capability set.
///
/// Three operations the overlay cannot perform itself: grouping markers into
/// clusters for the current zoom level, building a cluster's representative
/// marker, and materializing per-cluster visuals before a draw pass.
/// Implementations are selected at overlay construction, not subclassed.
pub trait ClusterStrategy {
    /// Group the context's markers into an ordered list of clusters for the
    /// view's current zoom level.
    fn cluster(&mut self, ctx: &ClusterContext<'_>, view: &dyn MapView) -> Vec<StaticCluster>;

    /// Build the representative marker for one cluster.
    fn build_cluster_marker(
        &mut self,
        cluster: &StaticCluster,
        ctx: &ClusterContext<'_>,
        view: &dyn MapView,
    ) -> MarkerRef;

    /// Prepare per-cluster visuals for the upcoming draw pass.
    ///
    /// Expected to populate each cluster's representative marker, typically
    /// by calling [`build_cluster_marker`]. Runs after [`cluster`] and
    /// before any cluster is drawn.
    ///
    /// [`build_cluster_marker`]: ClusterStrategy::build_cluster_marker
    /// [`cluster`]: ClusterStrategy::cluster
    fn render(
        &mut self,
        clusters: &mut [StaticCluster],
        ctx: &ClusterContext<'_>,
        canvas: &mut dyn Canvas,
        view: &dyn MapView,
    );
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::marker::Marker;

    struct PinMarker {
        position: GeoPoint,
    }

    impl Marker for PinMarker {
        fn position(&self) -> GeoPoint {
            self.position
        }

        fn draw(&self, _canvas: &mut dyn Canvas, _view: &dyn MapView) {}
    }

    fn pin(lat: f64, lon: f64) -> MarkerRef {
        Rc::new(PinMarker {
            position: GeoPoint::new(lat, lon),
        })
    }

    #[test]
    fn test_new_cluster_is_empty_and_markerless() {
        let cluster = StaticCluster::new(GeoPoint::new(1.0, 2.0));
        assert_eq!(cluster.size(), 0);
        assert!(cluster.is_empty());
        assert!(cluster.marker().is_none());
        assert!(cluster.item(0).is_none());
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cluster = StaticCluster::new(GeoPoint::new(0.0, 0.0));
        cluster.add(pin(1.0, 1.0));
        cluster.add(pin(2.0, 2.0));
        cluster.add(pin(3.0, 3.0));

        assert_eq!(cluster.size(), 3);
        for (i, marker) in cluster.items().iter().enumerate() {
            let expected = (i + 1) as f64;
            assert_eq!(marker.position().lat, expected);
        }
    }

    #[test]
    fn test_item_out_of_range_is_none() {
        let mut cluster = StaticCluster::new(GeoPoint::new(0.0, 0.0));
        cluster.add(pin(1.0, 1.0));
        assert!(cluster.item(0).is_some());
        assert!(cluster.item(1).is_none());
    }

    #[test]
    fn test_set_marker_replaces_representative() {
        let mut cluster = StaticCluster::new(GeoPoint::new(0.0, 0.0));
        cluster.set_marker(pin(5.0, 5.0));
        assert_eq!(cluster.marker().unwrap().position().lat, 5.0);

        cluster.set_marker(pin(6.0, 6.0));
        assert_eq!(cluster.marker().unwrap().position().lat, 6.0);
    }

    #[test]
    fn test_bounding_box_over_members() {
        let mut cluster = StaticCluster::new(GeoPoint::new(0.0, 0.0));
        assert!(cluster.bounding_box().is_none());

        cluster.add(pin(0.0, 0.0));
        cluster.add(pin(10.0, -5.0));
        let bbox = cluster.bounding_box().unwrap();
        assert_eq!(bbox.lat_north, 10.0);
        assert_eq!(bbox.lat_south, 0.0);
        assert_eq!(bbox.lon_east, 0.0);
        assert_eq!(bbox.lon_west, -5.0);
    }
}
