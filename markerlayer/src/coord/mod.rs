//! Geographic coordinate primitives
//!
//! Provides the latitude/longitude point and axis-aligned bounding box types
//! shared by markers, clusters, and the overlay. No projection math lives
//! here; converting geographic coordinates to screen pixels is a capability
//! of the host view (see [`crate::view::MapView`]).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Errors produced when validating geographic coordinates.
#[derive(Debug, Error, PartialEq)]
pub enum CoordError {
    /// Latitude outside [-90, 90] degrees (or NaN).
    #[error("Invalid latitude: {0} (must be within [-90, 90])")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] degrees (or NaN).
    #[error("Invalid longitude: {0} (must be within [-180, 180])")]
    InvalidLongitude(f64),
}

/// A geographic position in degrees.
///
/// The plain constructor performs no validation: marker positions are taken
/// as given, and a NaN coordinate will propagate through bounding-box folds
/// unchecked. Use [`GeoPoint::checked`] at trust boundaries where input
/// should be rejected instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (positive = north).
    pub lat: f64,
    /// Longitude in degrees (positive = east).
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point without validating the coordinate ranges.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create a point, rejecting coordinates outside the valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::InvalidLatitude`] or
    /// [`CoordError::InvalidLongitude`] for out-of-range or NaN inputs.
    pub fn checked(lat: f64, lon: f64) -> Result<Self, CoordError> {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(CoordError::InvalidLongitude(lon));
        }
        Ok(Self { lat, lon })
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// An axis-aligned latitude/longitude box.
///
/// Stored as the four edges, north/east/south/west, matching the order the
/// overlay reports them to the host view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Northern edge (maximum latitude).
    pub lat_north: f64,
    /// Eastern edge (maximum longitude).
    pub lon_east: f64,
    /// Southern edge (minimum latitude).
    pub lat_south: f64,
    /// Western edge (minimum longitude).
    pub lon_west: f64,
}

impl BoundingBox {
    /// Create a box from its four edges.
    pub fn new(lat_north: f64, lon_east: f64, lat_south: f64, lon_west: f64) -> Self {
        Self {
            lat_north,
            lon_east,
            lat_south,
            lon_west,
        }
    }

    /// Compute the smallest box containing every point in the iterator.
    ///
    /// The fold seeds with the widest representable extremes (`f64::MAX` /
    /// `-f64::MAX`) so any real coordinate updates them. NaN coordinates are
    /// not guarded against: a NaN latitude or longitude propagates into the
    /// corresponding edges of the result.
    ///
    /// # Returns
    ///
    /// `None` if the iterator yields no points; a degenerate box with
    /// min == max for a single point.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        // min/max folds that keep NaN once one appears.
        fn keep_min(current: f64, candidate: f64) -> f64 {
            if candidate < current || candidate.is_nan() {
                candidate
            } else {
                current
            }
        }
        fn keep_max(current: f64, candidate: f64) -> f64 {
            if candidate > current || candidate.is_nan() {
                candidate
            } else {
                current
            }
        }

        let mut empty = true;
        let mut min_lat = f64::MAX;
        let mut min_lon = f64::MAX;
        let mut max_lat = -f64::MAX;
        let mut max_lon = -f64::MAX;
        for point in points {
            empty = false;
            min_lat = keep_min(min_lat, point.lat);
            min_lon = keep_min(min_lon, point.lon);
            max_lat = keep_max(max_lat, point.lat);
            max_lon = keep_max(max_lon, point.lon);
        }
        if empty {
            return None;
        }
        Some(Self::new(max_lat, max_lon, min_lat, min_lon))
    }

    /// The midpoint of the box.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.lat_north + self.lat_south) / 2.0,
            (self.lon_east + self.lon_west) / 2.0,
        )
    }

    /// Whether the point lies within the box (edges inclusive).
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat <= self.lat_north
            && point.lat >= self.lat_south
            && point.lon <= self.lon_east
            && point.lon >= self.lon_west
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_accepts_valid_coordinates() {
        let point = GeoPoint::checked(48.8566, 2.3522);
        assert!(point.is_ok(), "Paris should be a valid coordinate");

        let point = point.unwrap();
        assert_eq!(point.lat, 48.8566);
        assert_eq!(point.lon, 2.3522);
    }

    #[test]
    fn test_checked_rejects_invalid_latitude() {
        let result = GeoPoint::checked(90.5, 0.0);
        assert_eq!(result.unwrap_err(), CoordError::InvalidLatitude(90.5));
    }

    #[test]
    fn test_checked_rejects_invalid_longitude() {
        let result = GeoPoint::checked(0.0, -180.01);
        assert_eq!(result.unwrap_err(), CoordError::InvalidLongitude(-180.01));
    }

    #[test]
    fn test_checked_rejects_nan() {
        assert!(GeoPoint::checked(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::checked(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_unchecked_constructor_takes_anything() {
        // Matches marker positions being taken as given.
        let point = GeoPoint::new(123.0, -456.0);
        assert_eq!(point.lat, 123.0);
        assert_eq!(point.lon, -456.0);
    }

    #[test]
    fn test_from_points_empty_is_none() {
        assert_eq!(BoundingBox::from_points(std::iter::empty()), None);
    }

    #[test]
    fn test_from_points_single_point_is_degenerate_box() {
        let bbox = BoundingBox::from_points([GeoPoint::new(10.0, 20.0)]).unwrap();
        assert_eq!(bbox.lat_north, 10.0);
        assert_eq!(bbox.lat_south, 10.0);
        assert_eq!(bbox.lon_east, 20.0);
        assert_eq!(bbox.lon_west, 20.0);
    }

    #[test]
    fn test_from_points_spans_min_and_max() {
        let bbox =
            BoundingBox::from_points([GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, -5.0)]).unwrap();
        assert_eq!(bbox.lat_south, 0.0);
        assert_eq!(bbox.lat_north, 10.0);
        assert_eq!(bbox.lon_west, -5.0);
        assert_eq!(bbox.lon_east, 0.0);
    }

    #[test]
    fn test_from_points_nan_coordinate_propagates() {
        let bbox = BoundingBox::from_points([
            GeoPoint::new(10.0, 20.0),
            GeoPoint::new(f64::NAN, 25.0),
            GeoPoint::new(5.0, 30.0),
        ])
        .unwrap();

        // A NaN latitude sticks to both latitude edges, even when real
        // coordinates follow; longitudes fold normally.
        assert!(bbox.lat_north.is_nan());
        assert!(bbox.lat_south.is_nan());
        assert_eq!(bbox.lon_east, 30.0);
        assert_eq!(bbox.lon_west, 20.0);
    }

    #[test]
    fn test_from_points_all_nan_does_not_leak_seeds() {
        let bbox = BoundingBox::from_points([GeoPoint::new(f64::NAN, f64::NAN)]).unwrap();
        assert!(bbox.lat_north.is_nan());
        assert!(bbox.lat_south.is_nan());
        assert!(bbox.lon_east.is_nan());
        assert!(bbox.lon_west.is_nan());
    }

    #[test]
    fn test_center_of_symmetric_box() {
        let bbox = BoundingBox::new(10.0, 30.0, -10.0, 10.0);
        let center = bbox.center();
        assert_eq!(center.lat, 0.0);
        assert_eq!(center.lon, 20.0);
    }

    #[test]
    fn test_contains_edges_inclusive() {
        let bbox = BoundingBox::new(10.0, 10.0, 0.0, 0.0);
        assert!(bbox.contains(&GeoPoint::new(10.0, 10.0)));
        assert!(bbox.contains(&GeoPoint::new(0.0, 0.0)));
        assert!(bbox.contains(&GeoPoint::new(5.0, 5.0)));
        assert!(!bbox.contains(&GeoPoint::new(10.1, 5.0)));
        assert!(!bbox.contains(&GeoPoint::new(5.0, -0.1)));
    }

    #[test]
    fn test_geopoint_serde_roundtrip() {
        let point = GeoPoint::new(51.5074, -0.1278);
        let json = serde_json::to_string(&point).unwrap();
        let back: GeoPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_from_points_contains_every_input(
                points in prop::collection::vec((-90.0..90.0_f64, -180.0..180.0_f64), 1..50)
            ) {
                let geo: Vec<GeoPoint> =
                    points.iter().map(|(lat, lon)| GeoPoint::new(*lat, *lon)).collect();
                let bbox = BoundingBox::from_points(geo.iter().copied()).unwrap();

                for point in &geo {
                    prop_assert!(
                        bbox.contains(point),
                        "Point {} outside computed box {:?}",
                        point,
                        bbox
                    );
                }
            }

            #[test]
            fn test_from_points_edges_are_input_coordinates(
                points in prop::collection::vec((-90.0..90.0_f64, -180.0..180.0_f64), 1..50)
            ) {
                let geo: Vec<GeoPoint> =
                    points.iter().map(|(lat, lon)| GeoPoint::new(*lat, *lon)).collect();
                let bbox = BoundingBox::from_points(geo.iter().copied()).unwrap();

                // Every edge must come from some input point, never a seed.
                prop_assert!(geo.iter().any(|p| p.lat == bbox.lat_north));
                prop_assert!(geo.iter().any(|p| p.lat == bbox.lat_south));
                prop_assert!(geo.iter().any(|p| p.lon == bbox.lon_east));
                prop_assert!(geo.iter().any(|p| p.lon == bbox.lon_west));
            }

            #[test]
            fn test_center_is_contained(
                lat_a in -90.0..90.0_f64,
                lat_b in -90.0..90.0_f64,
                lon_a in -180.0..180.0_f64,
                lon_b in -180.0..180.0_f64,
            ) {
                let bbox = BoundingBox::from_points([
                    GeoPoint::new(lat_a, lon_a),
                    GeoPoint::new(lat_b, lon_b),
                ]).unwrap();

                prop_assert!(bbox.contains(&bbox.center()));
            }

            #[test]
            fn test_checked_accepts_full_valid_range(
                lat in -90.0..=90.0_f64,
                lon in -180.0..=180.0_f64,
            ) {
                prop_assert!(GeoPoint::checked(lat, lon).is_ok());
            }
        }
    }
}
