//! Derived, read-only indexes over one snapshot.
//!
//! A [`Catalog`] is a pure projection: it is rebuilt from a snapshot and
//! has no state transitions of its own. It provides the ordered views the
//! store deliberately does not (by category and by date), plus JSON
//! renderings of both for a downstream renderer.
//!
//! Ordering is a deterministic total order everywhere: publication date
//! descending, ties broken by identifier ascending, so output is
//! reproducible for any input set.

use crate::document::Document;
use crate::store::Snapshot;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Category- and date-ordered views over a snapshot.
#[derive(Debug)]
pub struct Catalog {
    snapshot: Arc<Snapshot>,
    /// Storage indices, newest first, ties by id ascending.
    by_date: Vec<usize>,
    /// Category name to storage indices, each bucket in `by_date` order.
    by_category: BTreeMap<String, Vec<usize>>,
}

/// Compare two documents: newest first, ties by id ascending.
fn newest_first(a: &Document, b: &Document) -> Ordering {
    b.published_at()
        .cmp(&a.published_at())
        .then_with(|| a.id.cmp(&b.id))
}

impl Catalog {
    /// Build the indexes for `snapshot`.
    pub fn build(snapshot: Arc<Snapshot>) -> Self {
        let documents = snapshot.documents();

        let mut by_date: Vec<usize> = (0..documents.len()).collect();
        by_date.sort_unstable_by(|&a, &b| newest_first(&documents[a], &documents[b]));

        let mut by_category: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for &index in &by_date {
            for category in &documents[index].meta.categories {
                by_category.entry(category.clone()).or_default().push(index);
            }
        }

        Self {
            snapshot,
            by_date,
            by_category,
        }
    }

    /// Documents in `category`, newest first, ties by id ascending.
    ///
    /// An unknown category yields an empty iterator; absence is a normal
    /// condition here, not an error.
    pub fn by_category(&self, category: &str) -> impl Iterator<Item = &Document> {
        self.by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|&i| &self.snapshot.documents()[i])
    }

    /// All documents ordered by publication date.
    pub fn by_date(&self, descending: bool) -> impl Iterator<Item = &Document> {
        let order: Box<dyn Iterator<Item = &usize> + '_> = if descending {
            Box::new(self.by_date.iter())
        } else {
            Box::new(self.by_date.iter().rev())
        };
        order.map(|&i| &self.snapshot.documents()[i])
    }

    /// Category names in ascending order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.by_category.keys().map(String::as_str)
    }

    /// The snapshot these indexes were built from.
    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    /// All documents as a JSON array, newest first.
    ///
    /// Metadata only; bodies are not included.
    pub fn documents_json(&self) -> String {
        let documents: Vec<&Document> = self.by_date(true).collect();
        serde_json::to_string_pretty(&documents).unwrap_or_else(|_| "[]".to_owned())
    }

    /// The category index as a JSON object, each bucket newest first.
    pub fn categories_json(&self) -> String {
        let index: BTreeMap<&str, Vec<CategoryEntry<'_>>> = self
            .by_category
            .iter()
            .map(|(category, indices)| {
                let entries = indices
                    .iter()
                    .map(|&i| CategoryEntry::from(&self.snapshot.documents()[i]))
                    .collect();
                (category.as_str(), entries)
            })
            .collect();
        serde_json::to_string_pretty(&index).unwrap_or_else(|_| "{}".to_owned())
    }
}

/// A document reference within the category index JSON.
#[derive(Debug, Serialize)]
struct CategoryEntry<'a> {
    id: &'a str,
    title: &'a str,
    date: NaiveDateTime,
}

impl<'a> From<&'a Document> for CategoryEntry<'a> {
    fn from(document: &'a Document) -> Self {
        Self {
            id: &document.id,
            title: &document.meta.title,
            date: document.published_at(),
        }
    }
}
