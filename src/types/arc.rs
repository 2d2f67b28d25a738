//! Dependency arc definitions.

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// A directed, labelled dependency edge between two units of one sentence.
///
/// `start` and `end` are unit positions, never pointers. Arcs are immutable
/// once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyArc {
    start: usize,
    end: usize,
    label: String,
}

impl DependencyArc {
    /// Create an arc from its parts.
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Position of the dependent side.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Position of the governing side.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Relation label reported by the parser.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A relation record as emitted during assembly, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArcRecord {
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub label: Option<String>,
}

impl TryFrom<ArcRecord> for DependencyArc {
    type Error = GraphError;

    fn try_from(record: ArcRecord) -> Result<Self, Self::Error> {
        let start = record.start.ok_or(GraphError::MalformedArc { field: "start" })?;
        let end = record.end.ok_or(GraphError::MalformedArc { field: "end" })?;
        let label = record.label.ok_or(GraphError::MalformedArc { field: "label" })?;
        Ok(Self { start, end, label })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_from_complete_record() {
        let record = ArcRecord {
            start: Some(0),
            end: Some(2),
            label: Some("nsubj".to_string()),
        };
        let arc = DependencyArc::try_from(record).unwrap();

        assert_eq!(arc, DependencyArc::new(0, 2, "nsubj"));
        assert_eq!(arc.label(), "nsubj");
    }

    #[test]
    fn test_arc_missing_fields() {
        let record: ArcRecord = serde_json::from_str(r#"{"start": 1, "end": 3}"#).unwrap();
        let err = DependencyArc::try_from(record).unwrap_err();
        assert!(matches!(err, GraphError::MalformedArc { field: "label" }));

        let record: ArcRecord = serde_json::from_str(r#"{"end": 3, "label": "obj"}"#).unwrap();
        let err = DependencyArc::try_from(record).unwrap_err();
        assert!(matches!(err, GraphError::MalformedArc { field: "start" }));
    }
}
