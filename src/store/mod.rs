//! Document storage as immutable, atomically replaced snapshots.
//!
//! # Architecture
//!
//! ```text
//! raw sources ──► Snapshot::build ──► Snapshot (immutable, versioned)
//!                  (parallel parse,         │
//!                   aggregate errors)       ▼
//!                                    ContentStore (ArcSwap)
//!                                     │            │
//!                                     ▼            ▼
//!                                  readers      Catalog
//!                               (lock-free)  (derived views)
//! ```
//!
//! [`Snapshot`] holds the parsed documents of one load; [`ContentStore`]
//! owns the current snapshot and replaces it atomically on each successful
//! load. A failing load reports every broken document at once and leaves
//! the previous snapshot untouched.

mod handle;
mod snapshot;

pub use handle::ContentStore;
pub use snapshot::Snapshot;
