//! Core types for the dependency graph.

mod arc;
mod config;
mod document;
mod sentence;
mod token;
mod unit;

pub use arc::{ArcRecord, DependencyArc};
pub use config::{BuilderConfig, Granularity};
pub use document::Document;
pub use sentence::{Dependent, Dependents, Sentence};
pub use token::{surface_text, BunsetuPosition, Token};
pub use unit::{Direction, Unit};
