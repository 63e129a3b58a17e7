//! Folio - a content core for front-matter blogs.
//!
//! Loads raw documents with front-matter headers, holds them as immutable
//! snapshots, and serves category- and date-ordered views to an external
//! renderer. Rendering, theming, and serving are deliberately out of
//! scope; this crate is the content layer a site generator builds on.
//!
//! # Architecture
//!
//! ```text
//! content dir ──► source::collect_sources ──► Vec<SourceText>
//!                                                  │
//!                                                  ▼
//!                                      ContentStore::load
//!                                       (parse all, aggregate
//!                                        errors, atomic swap)
//!                                                  │
//!                                                  ▼
//!                                          Arc<Snapshot>
//!                                           │          │
//!                                           ▼          ▼
//!                                     Snapshot::get  Catalog
//!                                     Snapshot::all  (by_category,
//!                                                     by_date, JSON)
//! ```
//!
//! # Example
//!
//! ```
//! use folio::{Catalog, ContentStore, SourceText};
//!
//! let store = ContentStore::new();
//! let post = "---\n\
//!             title: Deploying with Caddy\n\
//!             date: 2024-08-08\n\
//!             categories: deployment caddy\n\
//!             ---\n\
//!             Point Caddy at the upstream and let it fetch certificates.\n";
//! let snapshot = store.load([SourceText::new("deploying-with-caddy", post)])?;
//!
//! let catalog = Catalog::build(snapshot);
//! let titles: Vec<&str> = catalog
//!     .by_category("caddy")
//!     .map(|doc| doc.meta.title.as_str())
//!     .collect();
//! assert_eq!(titles, ["Deploying with Caddy"]);
//! # Ok::<(), folio::LoadError>(())
//! ```

mod catalog;
mod config;
mod document;
mod error;
pub mod frontmatter;
pub mod source;
mod store;

pub use catalog::Catalog;
pub use config::{ConfigError, ContentConfig};
pub use document::{Document, FrontMatter, SourceText};
pub use error::{LoadError, MalformedMetadata, MetadataError, NotFoundError};
pub use source::collect_sources;
pub use store::{ContentStore, Snapshot};
