//! Sentence definitions and dependent lookup.

use serde::Serialize;

use super::unit::Unit;
use crate::error::{GraphError, Result};

/// A unit paired with the label of the arc that connects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dependent<'a> {
    pub unit: &'a Unit,
    pub label: &'a str,
}

/// Units connected to a queried unit, split by side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dependents<'a> {
    /// Units whose arcs come into the queried unit from the left
    pub left: Vec<Dependent<'a>>,
    /// Units the queried unit points to on the right
    pub right: Vec<Dependent<'a>>,
}

/// A parsed sentence with its ordered units.
///
/// `units[i].position() == i` holds for every sentence.
#[derive(Debug, Clone, Serialize)]
pub struct Sentence {
    text: String,
    units: Vec<Unit>,
    position: usize,
}

impl Sentence {
    /// Create a sentence from units already ordered by position.
    pub fn new(text: String, units: Vec<Unit>, position: usize) -> Result<Self> {
        if let Some((index, unit)) = units
            .iter()
            .enumerate()
            .find(|(i, unit)| unit.position() != *i)
        {
            return Err(GraphError::UnitOutOfOrder {
                index,
                position: unit.position(),
            });
        }

        Ok(Self {
            text,
            units,
            position,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Ordinal position within the document.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Iterate over units in textual order.
    pub fn units(&self) -> std::slice::Iter<'_, Unit> {
        self.units.iter()
    }

    /// Get the unit at a position.
    pub fn unit(&self, position: usize) -> Option<&Unit> {
        self.units.get(position)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Whether `unit` is owned by this sentence (identity, not equality).
    pub fn contains(&self, unit: &Unit) -> bool {
        self.units
            .get(unit.position())
            .map_or(false, |own| std::ptr::eq(own, unit))
    }

    /// Resolve the units on either side of `unit`'s arcs.
    ///
    /// Arcs whose referenced position has no unit are skipped.
    pub fn resolve_dependents<'a>(&'a self, unit: &'a Unit) -> Result<Dependents<'a>> {
        if !self.contains(unit) {
            return Err(GraphError::UnitNotInSentence {
                unit: unit.position(),
                sentence: self.position,
            });
        }

        let left = unit
            .left_arcs()
            .iter()
            .filter_map(|arc| {
                self.unit(arc.start()).map(|u| Dependent {
                    unit: u,
                    label: arc.label(),
                })
            })
            .collect();

        let right = unit
            .right_arcs()
            .iter()
            .filter_map(|arc| {
                self.unit(arc.end()).map(|u| Dependent {
                    unit: u,
                    label: arc.label(),
                })
            })
            .collect();

        Ok(Dependents { left, right })
    }

    /// Resolve dependents of the unit at `position`.
    pub fn dependents_at(&self, position: usize) -> Result<Dependents<'_>> {
        let unit = self.unit(position).ok_or(GraphError::UnitNotInSentence {
            unit: position,
            sentence: self.position,
        })?;
        self.resolve_dependents(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DependencyArc, Direction, Token};

    /// 本を 読む: unit 0 modifies unit 1.
    fn make_sentence(position: usize) -> Sentence {
        let hon = Unit::new(0..2, 0, vec![Token::new(0, "本", Some(2), "obj")]);
        let mut yomu = Unit::new(2..3, 1, vec![Token::new(2, "読む", None, "root")]);
        yomu.append_arc(DependencyArc::new(0, 1, "obj"), Direction::Left).unwrap();
        // dangling on purpose: nothing sits at position 7
        yomu.append_arc(DependencyArc::new(7, 1, "nmod"), Direction::Left).unwrap();
        Sentence::new("本を読む".to_string(), vec![hon, yomu], position).unwrap()
    }

    #[test]
    fn test_resolve_left_dependents() {
        let sentence = make_sentence(0);
        let yomu = sentence.unit(1).unwrap();
        let deps = sentence.resolve_dependents(yomu).unwrap();

        assert_eq!(deps.left.len(), 1);
        assert_eq!(deps.left[0].unit.position(), 0);
        assert_eq!(deps.left[0].label, "obj");
        assert!(deps.right.is_empty());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let sentence = make_sentence(0);
        let first = sentence.dependents_at(1).unwrap();
        let second = sentence.dependents_at(1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unit_from_other_sentence_is_rejected() {
        let first = make_sentence(0);
        let second = make_sentence(1);
        let foreign = second.unit(1).unwrap();

        let err = first.resolve_dependents(foreign).unwrap_err();
        assert!(matches!(
            err,
            GraphError::UnitNotInSentence { unit: 1, sentence: 0 }
        ));
    }

    #[test]
    fn test_cloned_unit_is_not_a_member() {
        let sentence = make_sentence(0);
        let copy = sentence.unit(0).unwrap().clone();
        assert!(!sentence.contains(&copy));
        assert!(sentence.contains(sentence.unit(0).unwrap()));
    }

    #[test]
    fn test_units_are_ordered_by_position() {
        let sentence = make_sentence(0);
        for (i, unit) in sentence.units().enumerate() {
            assert_eq!(unit.position(), i);
        }
        assert!(sentence.dependents_at(5).is_err());
    }

    #[test]
    fn test_misordered_units_are_rejected() {
        let units = vec![Unit::new(0..1, 1, vec![Token::new(0, "本", None, "root")])];
        let err = Sentence::new("本".to_string(), units, 0).unwrap_err();
        assert!(matches!(
            err,
            GraphError::UnitOutOfOrder {
                index: 0,
                position: 1
            }
        ));

        let swapped = vec![
            Unit::new(1..2, 1, vec![Token::new(1, "を", None, "case")]),
            Unit::new(0..1, 0, vec![Token::new(0, "本", None, "root")]),
        ];
        assert!(Sentence::new("本を".to_string(), swapped, 0).is_err());
    }
}
