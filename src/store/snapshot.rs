//! Immutable document snapshots.

use crate::document::{Document, SourceText};
use crate::error::{LoadError, MalformedMetadata, MetadataError, NotFoundError};
use crate::frontmatter;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

/// The complete set of parsed documents as of one successful load.
///
/// A snapshot is an immutable value: once built it never changes, so any
/// number of readers can share it without locking. Replacement happens at
/// the [`ContentStore`](crate::ContentStore) level by swapping whole
/// snapshots.
#[derive(Debug, Default)]
pub struct Snapshot {
    version: u64,
    documents: Vec<Document>,
    index: FxHashMap<String, usize>,
}

impl Snapshot {
    /// Parse every source and build a snapshot, or report every failure.
    ///
    /// Parsing runs in parallel; failures are collected rather than
    /// returned one at a time, so a writer fixing several posts sees all
    /// errors at once. Duplicate identifiers fail the load the same way.
    pub(crate) fn build<I>(version: u64, sources: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = SourceText>,
    {
        let sources: Vec<SourceText> = sources.into_iter().collect();

        let results: Vec<Result<Document, MalformedMetadata>> = sources
            .into_par_iter()
            .map(|source| match frontmatter::parse(&source.raw) {
                Ok((meta, body)) => Ok(Document {
                    id: source.id,
                    meta,
                    body,
                }),
                Err(cause) => Err(MalformedMetadata {
                    id: source.id,
                    cause,
                }),
            })
            .collect();

        let mut documents = Vec::with_capacity(results.len());
        let mut index = FxHashMap::default();
        let mut failures = Vec::new();

        for result in results {
            match result {
                Ok(document) => {
                    if index.contains_key(&document.id) {
                        failures.push(MalformedMetadata {
                            id: document.id,
                            cause: MetadataError::DuplicateId,
                        });
                    } else {
                        index.insert(document.id.clone(), documents.len());
                        documents.push(document);
                    }
                }
                Err(failure) => failures.push(failure),
            }
        }

        if !failures.is_empty() {
            return Err(LoadError { failures });
        }

        debug!(version, documents = documents.len(), "snapshot built");
        Ok(Self {
            version,
            documents,
            index,
        })
    }

    /// Look up a document by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the identifier is absent.
    pub fn get(&self, id: &str) -> Result<&Document, NotFoundError> {
        self.index
            .get(id)
            .map(|&i| &self.documents[i])
            .ok_or_else(|| NotFoundError { id: id.to_owned() })
    }

    /// Iterate over all documents.
    ///
    /// The order is unspecified; ordered views belong to
    /// [`Catalog`](crate::Catalog).
    pub fn all(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// Which load produced this snapshot. The initial empty snapshot is
    /// version 0.
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Number of documents.
    pub const fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the snapshot holds no documents.
    pub const fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents in storage order, for index construction.
    pub(crate) fn documents(&self) -> &[Document] {
        &self.documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(id: &str, title: &str, date: &str) -> SourceText {
        SourceText::new(id, format!("---\ntitle: {title}\ndate: {date}\n---\n"))
    }

    #[test]
    fn test_build_and_get() {
        let snapshot = Snapshot::build(
            1,
            vec![
                source("a", "Python Perf", "2024-01-25"),
                source("b", "Caddy", "2024-08-08"),
            ],
        )
        .unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.version(), 1);
        assert_eq!(snapshot.get("a").unwrap().meta.title, "Python Perf");
        assert_eq!(snapshot.get("b").unwrap().meta.title, "Caddy");
    }

    #[test]
    fn test_get_not_found() {
        let snapshot = Snapshot::build(1, vec![source("a", "A", "2024-01-01")]).unwrap();
        let err = snapshot.get("missing").unwrap_err();
        assert_eq!(err.id, "missing");
    }

    #[test]
    fn test_build_aggregates_all_failures() {
        let err = Snapshot::build(
            1,
            vec![
                source("good", "Fine", "2024-01-01"),
                SourceText::new("no-date", "---\ntitle: T\n---\n"),
                SourceText::new("no-header", "just a body"),
            ],
        )
        .unwrap_err();

        assert_eq!(err.failures.len(), 2);
        assert_eq!(err.ids().collect::<Vec<_>>(), vec!["no-date", "no-header"]);
        assert_eq!(err.failures[0].cause, MetadataError::MissingField("date"));
        assert_eq!(err.failures[1].cause, MetadataError::MissingHeader);
    }

    #[test]
    fn test_build_rejects_duplicate_ids() {
        let err = Snapshot::build(
            1,
            vec![
                source("a", "First", "2024-01-01"),
                source("a", "Second", "2024-02-02"),
            ],
        )
        .unwrap_err();

        assert_eq!(err.failures.len(), 1);
        assert_eq!(err.failures[0].id, "a");
        assert_eq!(err.failures[0].cause, MetadataError::DuplicateId);
    }

    #[test]
    fn test_build_empty() {
        let snapshot = Snapshot::build(1, vec![]).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.all().count(), 0);
    }

    #[test]
    fn test_all_yields_every_document() {
        let snapshot = Snapshot::build(
            1,
            vec![
                source("a", "A", "2024-01-01"),
                source("b", "B", "2024-02-02"),
                source("c", "C", "2024-03-03"),
            ],
        )
        .unwrap();

        let mut ids: Vec<_> = snapshot.all().map(|d| d.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_default_snapshot_is_empty_version_zero() {
        let snapshot = Snapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.version(), 0);
    }
}
