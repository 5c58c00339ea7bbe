//! Correlation-id allocation for outbound request handling.
//!
//! Ids are non-zero u32s from a wrapping atomic counter. Zero means
//! "unassigned" on the wire, so the allocator never hands it out.

use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug)]
pub struct CorrelationAllocator {
    next: AtomicU32,
}

impl CorrelationAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU32::new(1),
        }
    }

    /// Allocate the next correlation id. Wraps past u32::MAX, skipping 0.
    pub fn allocate(&self) -> u32 {
        loop {
            let id = self.next.fetch_add(1, Ordering::Relaxed);
            if id != 0 {
                return id;
            }
        }
    }
}

impl Default for CorrelationAllocator {
    fn default() -> Self {
        Self::new()
    }
}
