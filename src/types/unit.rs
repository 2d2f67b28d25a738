//! Unit (head word or phrase) definitions.

use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::arc::DependencyArc;
use super::token::{surface_text, Token};
use crate::error::{GraphError, Result};

/// Side of a unit an arc is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Arc from a dependent on the left into this unit
    Left,
    /// Arc from this unit out to a dependent on the right
    Right,
}

impl FromStr for Direction {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(GraphError::InvalidDirection(other.to_string())),
        }
    }
}

/// A head word or phrase within a sentence.
///
/// Units are built once per segment during assembly. Their arcs are appended
/// right after construction and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    /// Document-relative token range
    span: Range<usize>,
    /// Zero-based position within the owning sentence
    position: usize,
    tokens: Vec<Token>,
    left_arcs: Vec<DependencyArc>,
    right_arcs: Vec<DependencyArc>,
}

impl Unit {
    /// Create a unit with empty adjacency lists.
    pub fn new(span: Range<usize>, position: usize, tokens: Vec<Token>) -> Self {
        Self {
            span,
            position,
            tokens,
            left_arcs: Vec::new(),
            right_arcs: Vec::new(),
        }
    }

    /// Attach an arc on the given side.
    ///
    /// A left arc must end at this unit and a right arc must start from it.
    pub fn append_arc(&mut self, arc: DependencyArc, direction: Direction) -> Result<()> {
        match direction {
            Direction::Left if arc.end() == self.position => self.left_arcs.push(arc),
            Direction::Right if arc.start() == self.position => self.right_arcs.push(arc),
            _ => {
                return Err(GraphError::InvalidDirection(format!(
                    "{:?} arc {}->{} does not touch unit {}",
                    direction,
                    arc.start(),
                    arc.end(),
                    self.position
                )))
            }
        }
        Ok(())
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Arcs from dependents into this unit.
    pub fn left_arcs(&self) -> &[DependencyArc] {
        &self.left_arcs
    }

    /// Arcs from this unit out to its right-hand dependents.
    pub fn right_arcs(&self) -> &[DependencyArc] {
        &self.right_arcs
    }

    /// Surface text of the unit.
    pub fn text(&self) -> String {
        surface_text(&self.tokens)
    }
}
