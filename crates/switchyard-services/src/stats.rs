//! Busy statistics — counts answers that arrived while the far side
//! reported overload.
//!
//! Lock-free; callable from any dispatch thread.

use std::sync::atomic::{AtomicU64, Ordering};

use switchyard_core::wire::SenderId;

/// Per-sender busy counters plus a running total.
#[derive(Debug, Default)]
pub struct BusyStats {
    media: AtomicU64,
    bearer: AtomicU64,
    other: AtomicU64,
    total: AtomicU64,
}

/// A point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusySnapshot {
    pub media: u64,
    pub bearer: u64,
    pub other: u64,
    pub total: u64,
}

impl BusyStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one busy answer from `sender`.
    pub fn record(&self, sender: SenderId) {
        match sender {
            SenderId::Media => self.media.fetch_add(1, Ordering::Relaxed),
            SenderId::Bearer => self.bearer.fetch_add(1, Ordering::Relaxed),
            _ => self.other.fetch_add(1, Ordering::Relaxed),
        };
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> BusySnapshot {
        BusySnapshot {
            media: self.media.load(Ordering::Relaxed),
            bearer: self.bearer.load(Ordering::Relaxed),
            other: self.other.load(Ordering::Relaxed),
            total: self.total.load(Ordering::Relaxed),
        }
    }
}
