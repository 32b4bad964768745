//! Overlay telemetry for observability and tests.
//!
//! Lock-free atomic counters over the overlay's draw and input-dispatch
//! cycle, with a point-in-time snapshot for display or assertions.
//!
//! # Architecture
//!
//! ```text
//! Draw / dispatch hooks ─────► OverlayMetrics ─────► OverlaySnapshot
//!                              (atomic counters)    (point-in-time copy)
//! ```
//!
//! # Example
//!
//! ```ignore
//! let metrics = overlay.metrics();
//! // ... drive some draw passes ...
//! let snapshot = metrics.snapshot();
//! println!("rebuilds: {}", snapshot.rebuilds);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters recorded by the overlay as the host view drives it.
///
/// Atomics keep recording free of any locking; the overlay itself is
/// single-threaded, but snapshots may be handed to other observers.
#[derive(Debug, Default)]
pub struct OverlayMetrics {
    /// Cluster rebuilds actually performed.
    rebuilds: AtomicU64,
    /// Rebuilds skipped because the view was mid-animation.
    rebuilds_deferred: AtomicU64,
    /// Total draw passes, including pure cache hits.
    draw_passes: AtomicU64,
    /// Input events entering dispatch.
    events_dispatched: AtomicU64,
    /// Input events some cluster marker consumed.
    events_handled: AtomicU64,
}

impl OverlayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn rebuild_performed(&self) {
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn rebuild_deferred(&self) {
        self.rebuilds_deferred.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn draw_pass(&self) {
        self.draw_passes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn event_dispatched(&self) {
        self.events_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn event_handled(&self) {
        self.events_handled.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of all counters.
    pub fn snapshot(&self) -> OverlaySnapshot {
        OverlaySnapshot {
            rebuilds: self.rebuilds.load(Ordering::Relaxed),
            rebuilds_deferred: self.rebuilds_deferred.load(Ordering::Relaxed),
            draw_passes: self.draw_passes.load(Ordering::Relaxed),
            events_dispatched: self.events_dispatched.load(Ordering::Relaxed),
            events_handled: self.events_handled.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`OverlayMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverlaySnapshot {
    pub rebuilds: u64,
    pub rebuilds_deferred: u64,
    pub draw_passes: u64,
    pub events_dispatched: u64,
    pub events_handled: u64,
}

impl std::fmt::Display for OverlaySnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rebuilds: {} ({} deferred), draws: {}, input: {}/{} handled",
            self.rebuilds,
            self.rebuilds_deferred,
            self.draw_passes,
            self.events_handled,
            self.events_dispatched
        )
    }
}
