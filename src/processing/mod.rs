//! Text processing utilities.
//!
//! Input preprocessing that runs before the parser sees the text.

pub mod normalize;

pub use normalize::{TextNormalizer, BRACKETS};
