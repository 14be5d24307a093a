//! Error types shared by every stage of the ranking pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RankError>;

#[derive(Debug, Error)]
pub enum RankError {
    /// A query term has no entry in the document-frequency table.
    #[error("term '{term}' has no document frequency entry")]
    UnknownTerm { term: String },

    /// Two vectors of different lengths were combined.
    #[error("vector length mismatch: {left} vs {right}")]
    ShapeMismatch { left: usize, right: usize },

    /// A document record lacks a field the scorer cannot do without.
    #[error("document '{url}' for query '{query}' is missing required field '{field}'")]
    MissingField {
        query: String,
        url: String,
        field: &'static str,
    },

    #[error("term '{term}' has non-positive document frequency {frequency}")]
    InvalidFrequency { term: String, frequency: u64 },

    /// Malformed line in a feature dump (1-based line number).
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("failed to score query '{query}': {source}")]
    Scoring {
        query: String,
        #[source]
        source: Box<RankError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),
}

impl RankError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse { line, message: message.into() }
    }
}
