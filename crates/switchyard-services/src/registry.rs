//! Origin-host registry.
//!
//! While a session-bearing message is being processed, the registry maps
//! its 16-bit subscriber key to where the message came from, so answers
//! produced during processing can be routed back. Entries live only for
//! the duration of one dispatch: insert before the process step, remove
//! after it.

use dashmap::DashMap;

/// Where a message under processing originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginEntry {
    /// Sending process id.
    pub sender: u32,
    /// Correlation id carried (or just allocated) by the message.
    pub correlation_id: u32,
}

/// Concurrent, capacity-bounded map from subscriber key to origin.
#[derive(Debug)]
pub struct OriginRegistry {
    entries: DashMap<u16, OriginEntry>,
    max_entries: usize,
}

impl OriginRegistry {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries,
        }
    }

    /// Insert an origin entry. Returns false when the registry is full;
    /// the caller treats that as ignorable and proceeds without routing
    /// state for this message.
    pub fn insert(&self, key: u16, entry: OriginEntry) -> bool {
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            tracing::warn!(key, max = self.max_entries, "origin registry full");
            return false;
        }
        self.entries.insert(key, entry);
        true
    }

    /// Remove an entry. Removing an absent key is a no-op.
    pub fn remove(&self, key: u16) -> Option<OriginEntry> {
        self.entries.remove(&key).map(|(_, entry)| entry)
    }

    pub fn get(&self, key: u16) -> Option<OriginEntry> {
        self.entries.get(&key).map(|r| *r.value())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
