//! Document type definitions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{Granularity, Sentence};

/// The result of one build: every sentence of the input, in order.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Unique identifier for this document
    pub id: Uuid,

    /// Parser model that produced the analysis
    pub model: String,

    /// Granularity the units were built at
    pub granularity: Granularity,

    sentences: Vec<Sentence>,

    /// When this document was built
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Create a document from its sentences.
    pub fn new(model: &str, granularity: Granularity, sentences: Vec<Sentence>) -> Self {
        Self {
            id: Uuid::new_v4(),
            model: model.to_string(),
            granularity,
            sentences,
            created_at: Utc::now(),
        }
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Concatenate sentence texts in order.
    pub fn text(&self) -> String {
        self.sentences.iter().map(|s| s.text()).collect()
    }

    /// Total number of units across all sentences.
    pub fn unit_count(&self) -> usize {
        self.sentences.iter().map(|s| s.len()).sum()
    }

    /// Total number of stored arcs across all units.
    pub fn arc_count(&self) -> usize {
        self.sentences
            .iter()
            .flat_map(|s| s.units())
            .map(|u| u.left_arcs().len() + u.right_arcs().len())
            .sum()
    }
}
