//! Host view capabilities
//!
//! The overlay is driven by a pan/zoom map widget it does not own. This
//! module declares the narrow capability traits that widget must provide:
//! [`MapView`] for zoom/animation state and geographic-to-pixel projection,
//! and [`Canvas`] for the drawing surface handed to each draw pass. The
//! actual projection math and rasterization belong to the host.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::coord::GeoPoint;

/// A position on the drawing surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A touch input event at a screen position.
///
/// The event kind (tap, long-press, double-tap, raw touch) is carried by
/// which overlay hook receives it, not by the event itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub x: f32,
    pub y: f32,
}

impl TouchEvent {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Read-only view of the host map widget's current state.
///
/// Implemented by the embedding application over its map widget. The overlay
/// only ever queries it during draw and input dispatch, on the thread that
/// drives those callbacks.
pub trait MapView {
    /// The current discrete zoom level.
    fn zoom_level(&self) -> u8;

    /// Whether a pan/zoom animation is currently running.
    ///
    /// While this reports `true`, the overlay keeps drawing its previously
    /// built clusters instead of rebuilding on every intermediate frame.
    fn is_animating(&self) -> bool;

    /// Project a geographic position to surface pixels under the current
    /// viewport.
    fn to_pixels(&self, point: &GeoPoint) -> PixelPoint;
}

/// Drawing surface accepting draw calls from markers.
pub trait Canvas {
    /// Blit an image centered on the given surface position.
    fn draw_image(&mut self, image: &RgbaImage, center: PixelPoint);
}
