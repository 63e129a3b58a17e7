//! Core document types.
//!
//! A [`Document`] is one ingested source text: a stable identifier, the
//! parsed [`FrontMatter`] header, and the untouched body. Documents are
//! immutable once built; a fresh load replaces the whole snapshot instead
//! of mutating anything in place.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

/// Parsed front-matter header of a document.
///
/// Required fields are typed; anything the core does not interpret stays
/// verbatim in [`extras`](Self::extras), so downstream tools can read keys
/// this crate knows nothing about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    /// Display title.
    pub title: String,

    /// Publication date. Values carrying a UTC offset are normalized to UTC
    /// during parsing.
    #[serde(rename = "date")]
    pub published_at: NaiveDateTime,

    /// Category tags, possibly empty. Duplicates are dropped on parse,
    /// first occurrence wins.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    /// Template name for the external renderer. Opaque to this crate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    /// Unrecognized header keys, preserved as opaque strings.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
}

/// One ingested document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Unique stable identifier, derived from the source filename or slug.
    pub id: String,

    /// Parsed front-matter header.
    #[serde(flatten)]
    pub meta: FrontMatter,

    /// Raw body text after the header. Never interpreted here; empty is valid.
    #[serde(skip)]
    pub body: String,
}

impl Document {
    /// Publication date shorthand.
    #[inline]
    pub fn published_at(&self) -> NaiveDateTime {
        self.meta.published_at
    }

    /// Whether this document carries `category`.
    pub fn has_category(&self, category: &str) -> bool {
        self.meta.categories.iter().any(|c| c == category)
    }
}

/// A raw source text paired with the identifier it will be stored under.
///
/// Produced by the filesystem loader, or handed in directly by any host
/// that fetches documents some other way.
#[derive(Debug, Clone)]
pub struct SourceText {
    /// Identifier the parsed document will be stored under.
    pub id: String,
    /// Raw document text, front-matter header included.
    pub raw: String,
}

impl SourceText {
    /// Pair an identifier with raw document text.
    pub fn new(id: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw: raw.into(),
        }
    }
}
