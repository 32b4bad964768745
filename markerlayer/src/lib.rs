//! MarkerLayer - marker clustering overlay for pan/zoom map views
//!
//! This library provides the orchestration layer of a marker-clustering map
//! overlay: it owns an ordered collection of point markers, rebuilds
//! zoom-dependent clusters through a pluggable strategy, draws the resulting
//! cluster markers, and routes touch input to them in topmost-first order.
//!
//! The clustering algorithm itself and the cluster visuals are supplied by
//! the embedding application through [`cluster::ClusterStrategy`]; the host
//! map widget is reached through the capability traits in [`view`].

pub mod cluster;
pub mod coord;
pub mod marker;
pub mod overlay;
pub mod telemetry;
pub mod view;

pub use cluster::{ClusterContext, ClusterStrategy, StaticCluster};
pub use coord::{BoundingBox, CoordError, GeoPoint};
pub use marker::{Marker, MarkerRef};
pub use overlay::{MarkerClusterer, Overlay};
pub use telemetry::{OverlayMetrics, OverlaySnapshot};
pub use view::{Canvas, MapView, PixelPoint, TouchEvent};
