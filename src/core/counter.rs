use std::sync::atomic::{AtomicU64, Ordering};

/// Accumulates contact points reported by the host between two samples.
///
/// Owned by the sweep driver and lent to the host each frame. Hosts whose
/// collision callbacks only receive `&self` (or run on worker threads) can
/// still report, since every operation takes `&self`.
#[derive(Debug, Default)]
pub struct ContactCounter {
    count: AtomicU64,
}

impl ContactCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the contact points of one colliding pair.
    pub fn add(&self, contact_points: u64) {
        self.count.fetch_add(contact_points, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }

    /// Returns the current value and resets it to zero.
    pub fn take(&self) -> u64 {
        self.count.swap(0, Ordering::Relaxed)
    }
}
