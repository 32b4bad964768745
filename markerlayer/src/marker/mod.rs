//! Marker capability trait
//!
//! A marker is a single point-of-interest entity: it knows its geographic
//! position, draws itself, and may consume touch input or show an info
//! window. Markers are owned by the embedding application and shared with
//! the overlay by reference.
//!
//! # Thread affinity
//!
//! Markers are referenced through [`MarkerRef`] (`Rc`), which pins the whole
//! overlay to the single thread that drives the host view's draw and input
//! callbacks. All trait methods take `&self`; implementations that need
//! mutable state (an open info window, a pressed visual state) use interior
//! mutability.

use std::rc::Rc;

use crate::coord::GeoPoint;
use crate::view::{Canvas, MapView, TouchEvent};

/// Shared handle to a marker.
pub type MarkerRef = Rc<dyn Marker>;

/// A point marker on the map.
///
/// Input handlers return whether the event was consumed; the defaults
/// consume nothing, so a minimal marker only implements [`position`] and
/// [`draw`].
///
/// [`position`]: Marker::position
/// [`draw`]: Marker::draw
pub trait Marker {
    /// The marker's geographic position.
    fn position(&self) -> GeoPoint;

    /// Draw the marker onto the surface under the view's current projection.
    fn draw(&self, canvas: &mut dyn Canvas, view: &dyn MapView);

    /// Handle a confirmed single tap. Returns `true` if consumed.
    fn on_single_tap_confirmed(&self, _event: &TouchEvent, _view: &dyn MapView) -> bool {
        false
    }

    /// Handle a long press. Returns `true` if consumed.
    fn on_long_press(&self, _event: &TouchEvent, _view: &dyn MapView) -> bool {
        false
    }

    /// Handle a double tap. Returns `true` if consumed.
    fn on_double_tap(&self, _event: &TouchEvent, _view: &dyn MapView) -> bool {
        false
    }

    /// Handle a raw touch event. Returns `true` if consumed.
    fn on_touch_event(&self, _event: &TouchEvent, _view: &dyn MapView) -> bool {
        false
    }

    /// Whether this marker's info window is currently open.
    fn is_info_window_open(&self) -> bool {
        false
    }

    /// Close this marker's info window, if open.
    fn close_info_window(&self) {}
}
