//! Whole-table publication of ladder snapshots.
//!
//! The ladder is recomputed by a single writer. Readers (renderers,
//! frame recorders) only ever see complete snapshots: the writer builds
//! a new `LadderSnapshot` and swaps the shared `Arc` under a short write
//! lock, so no reader can observe a half-updated `(bid, ask)` pair.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::ladder::LadderSnapshot;

/// Shared handle to the latest published snapshot. Cheap to clone.
#[derive(Debug, Clone)]
pub struct LadderPublisher {
    latest: Arc<RwLock<Arc<LadderSnapshot>>>,
    generation: Arc<AtomicU64>,
}

impl LadderPublisher {
    pub fn new(initial: LadderSnapshot) -> Self {
        Self {
            latest: Arc::new(RwLock::new(Arc::new(initial))),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Replace the published snapshot. Returns the new generation.
    pub fn publish(&self, snapshot: LadderSnapshot) -> u64 {
        let snapshot = Arc::new(snapshot);
        *self.latest.write() = snapshot;
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Latest complete snapshot.
    pub fn latest(&self) -> Arc<LadderSnapshot> {
        Arc::clone(&*self.latest.read())
    }

    /// Number of snapshots published since construction.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
