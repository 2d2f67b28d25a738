//! Dependency Graph Library
//!
//! Turns the output of a Japanese dependency parser into a queryable graph of
//! sentences, units (head words or bunsetu phrases) and the labelled arcs
//! between them.

pub mod builder;
pub mod error;
pub mod parser;
pub mod processing;
pub mod types;

pub use builder::{build_sentence, DocumentBuilder};
pub use error::{GraphError, Result};
pub use parser::{load_model, CommandParser, ConlluParser, DependencyParser, ParsedSentence};
pub use processing::TextNormalizer;
pub use types::{
    BuilderConfig, DependencyArc, Dependent, Dependents, Direction, Document, Granularity,
    Sentence, Token, Unit,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::builder::DocumentBuilder;
    pub use crate::error::{GraphError, Result};
    pub use crate::parser::{load_model, DependencyParser};
    pub use crate::processing::TextNormalizer;
    pub use crate::types::*;
}

/// Default parser model
pub const DEFAULT_MODEL: &str = "ja_ginza_electra";

/// Default program for the GiNZA command backend
pub const DEFAULT_GINZA_COMMAND: &str = "ginza";

/// Default replacement for digit runs during normalization
pub const DEFAULT_NUMBER_PLACEHOLDER: char = '0';
