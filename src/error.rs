//! Error types for parsing, loading, and lookup.

use std::fmt;
use thiserror::Error;

/// Why a single document failed ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// The document does not open with a `---` delimiter line.
    #[error("missing front-matter delimiter")]
    MissingHeader,

    /// The opening `---` was never closed.
    #[error("unterminated front-matter header")]
    UnterminatedHeader,

    /// A header line has no `key: value` shape. Carries the 1-based line
    /// number within the document.
    #[error("malformed header line {0}")]
    InvalidLine(usize),

    /// A required field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The `date` field does not parse as a calendar date.
    #[error("invalid value for field `date`: `{0}`")]
    InvalidDate(String),

    /// Another document in the same load already claimed this identifier.
    /// Detected by the store, not the parser.
    #[error("duplicate document id")]
    DuplicateId,
}

impl MetadataError {
    /// The field this error concerns, when it names one.
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(field) => Some(field),
            Self::InvalidDate(_) => Some("date"),
            _ => None,
        }
    }
}

/// An ingestion failure bound to the offending document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("document `{id}`: {cause}")]
pub struct MalformedMetadata {
    /// Identifier of the failing document.
    pub id: String,
    /// What went wrong.
    #[source]
    pub cause: MetadataError,
}

/// Aggregated failures from a single load.
///
/// A load never partially succeeds: every failing document is collected so
/// a writer fixing several posts sees all errors at once, and the previous
/// snapshot stays intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    /// Every document that failed, in input order.
    pub failures: Vec<MalformedMetadata>,
}

impl LoadError {
    /// Identifiers of all failing documents, in input order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.id.as_str())
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load failed for {} document(s)", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadError {}

/// The requested identifier is absent from the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no document with id `{id}` in the current snapshot")]
pub struct NotFoundError {
    /// The identifier that was looked up.
    pub id: String,
}
