//! Error types for graph assembly and the parser boundary.

use thiserror::Error;

/// Errors raised while loading a parser, assembling a document, or querying it.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The parser model could not be loaded or its backend is unavailable.
    #[error("Failed to load parser model {model}: {reason}")]
    ModelLoad { model: String, reason: String },

    /// The input produced no sentences.
    #[error("Input text is empty or produced no sentences")]
    EmptyInput,

    /// A relation record is missing one of its fields.
    #[error("Malformed arc record: missing {field}")]
    MalformedArc { field: &'static str },

    /// A unit was queried against a sentence that does not own it.
    #[error("Unit {unit} is not a member of sentence {sentence}")]
    UnitNotInSentence { unit: usize, sentence: usize },

    /// A sentence was assembled from units whose positions do not match
    /// their order.
    #[error("Unit at index {index} has position {position}")]
    UnitOutOfOrder { index: usize, position: usize },

    /// An arc was attached with an unknown or inconsistent direction.
    #[error("Invalid arc direction: {0}")]
    InvalidDirection(String),

    /// The parser produced output that does not follow its contract.
    #[error("Malformed parser output at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
