//! Owned store handle with atomic snapshot replacement.
//!
//! Uses `arc-swap` for lock-free reads and atomic replacement of the whole
//! snapshot, with a writer lock giving loads single-writer discipline.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ContentStore (ArcSwap)                      │
//! │                                                             │
//! │  ┌─────────────┐     ┌─────────────┐     ┌─────────────┐    │
//! │  │  Reader 1   │     │  Reader 2   │     │   Writer    │    │
//! │  └──────┬──────┘     └──────┬──────┘     └──────┬──────┘    │
//! │         │                   │                   │           │
//! │         ▼                   ▼                   ▼           │
//! │     snapshot()          snapshot()           load()         │
//! │    (lock-free)         (lock-free)      (atomic replace)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A reader always observes a complete snapshot: either the one before a
//! load or the one after it, never a mix. A failed load replaces nothing.

use crate::document::{Document, SourceText};
use crate::error::{LoadError, NotFoundError};
use crate::store::Snapshot;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Owned handle over the current snapshot.
///
/// Starts out holding an empty snapshot (version 0). Each successful
/// [`load`](Self::load) builds a fresh snapshot with the next version and
/// swaps it in wholesale; there is no in-place mutation and no deletion
/// API.
#[derive(Debug)]
pub struct ContentStore {
    current: ArcSwap<Snapshot>,
    /// Serializes load calls. Readers never touch it.
    writer: Mutex<u64>,
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore {
    /// Create a store holding an empty snapshot.
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(Snapshot::default()),
            writer: Mutex::new(0),
        }
    }

    /// Parse `sources` into a new snapshot and swap it in atomically.
    ///
    /// Concurrent loads serialize on the writer lock; the last completed
    /// load wins. Readers that already hold a snapshot keep it alive for
    /// as long as they need.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] naming every failing document. The previous
    /// snapshot stays in place, fully intact and readable.
    pub fn load<I>(&self, sources: I) -> Result<Arc<Snapshot>, LoadError>
    where
        I: IntoIterator<Item = SourceText>,
    {
        let mut next = self.writer.lock();
        let version = *next + 1;
        let snapshot = Arc::new(Snapshot::build(version, sources)?);
        *next = version;
        self.current.store(Arc::clone(&snapshot));
        debug!(version, documents = snapshot.len(), "snapshot swapped");
        Ok(snapshot)
    }

    /// Current snapshot. Lock-free and wait-free.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Look up a document in the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the identifier is absent.
    pub fn get(&self, id: &str) -> Result<Document, NotFoundError> {
        self.snapshot().get(id).cloned()
    }
}
