//! Parser collaborator boundary.
//!
//! The core never tokenizes or infers arcs itself. A [`DependencyParser`]
//! backend turns text into [`ParsedSentence`]s, and each parsed sentence
//! exposes its bunsetu segmentation at either granularity.

mod command;
mod conllu;

use std::ops::Range;
use std::sync::Arc;

use tracing::info;

use crate::error::{GraphError, Result};
use crate::types::{BuilderConfig, Granularity, Token};

pub use command::CommandParser;
pub use conllu::ConlluParser;

/// Model name of the CoNLL-U reader backend.
pub const CONLLU_MODEL: &str = "conllu";

/// GiNZA models served through the command backend.
pub const GINZA_MODELS: &[&str] = &["ja_ginza", "ja_ginza_electra"];

/// An external dependency parser.
///
/// Handles are loaded once and shared read-only between builds.
pub trait DependencyParser: Send + Sync {
    /// Name of the loaded model.
    fn name(&self) -> &str;

    /// Parse text into sentences in document order.
    fn parse(&self, text: &str) -> Result<Vec<ParsedSentence>>;
}

/// A token outside a segment whose syntactic head lies inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacentDependent {
    /// Document-relative token index
    pub token: usize,
    /// Relation of the dependent to its head
    pub relation: Option<String>,
}

/// One segment of a sentence at a given granularity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Document-relative token range
    pub tokens: Range<usize>,
    /// Document-relative index of the head token
    pub head: usize,
    /// Dependents to the left of the segment, in token order
    pub lefts: Vec<AdjacentDependent>,
    /// Dependents to the right of the segment, in token order
    pub rights: Vec<AdjacentDependent>,
}

/// A sentence as returned by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSentence {
    pub text: String,
    /// Tokens with contiguous document-relative indices
    pub tokens: Vec<Token>,
}

impl ParsedSentence {
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            text: text.into(),
            tokens,
        }
    }

    fn offset(&self) -> usize {
        self.tokens.first().map_or(0, |t| t.index)
    }

    /// Tokens covering a document-relative range.
    pub fn tokens_in(&self, range: Range<usize>) -> &[Token] {
        let offset = self.offset();
        let start = range.start.saturating_sub(offset).min(self.tokens.len());
        let end = range.end.saturating_sub(offset).clamp(start, self.tokens.len());
        &self.tokens[start..end]
    }

    /// Bunsetu boundaries as document-relative ranges.
    ///
    /// Without any bunsetu labels every token stands alone.
    pub fn bunsetu_ranges(&self) -> Vec<Range<usize>> {
        let offset = self.offset();
        let labelled = self.tokens.iter().any(|t| t.bunsetu_begin);
        let mut ranges = Vec::new();
        let mut start = 0;

        for (i, token) in self.tokens.iter().enumerate().skip(1) {
            if !labelled || token.bunsetu_begin {
                ranges.push(offset + start..offset + i);
                start = i;
            }
        }
        if !self.tokens.is_empty() {
            ranges.push(offset + start..offset + self.tokens.len());
        }

        ranges
    }

    /// Head token of a bunsetu.
    fn bunsetu_head(&self, range: Range<usize>) -> usize {
        let tokens = self.tokens_in(range.clone());

        if let Some(token) = tokens
            .iter()
            .find(|t| t.position_type.map_or(false, |p| p.is_head()))
        {
            return token.index;
        }

        tokens
            .iter()
            .find(|t| t.head.map_or(true, |h| !range.contains(&h)))
            .map_or(range.start, |t| t.index)
    }

    /// Head token of every bunsetu, in order.
    ///
    /// The index of a token in this list is the position of the unit it heads.
    pub fn head_list(&self) -> Vec<usize> {
        self.bunsetu_ranges()
            .into_iter()
            .map(|range| self.bunsetu_head(range))
            .collect()
    }

    /// Segment the sentence at the requested granularity.
    pub fn segments(&self, granularity: Granularity) -> Vec<Segment> {
        self.bunsetu_ranges()
            .into_iter()
            .map(|range| {
                let head = self.bunsetu_head(range.clone());
                let tokens = match granularity {
                    Granularity::HeadWord => head..head + 1,
                    Granularity::Phrase => range,
                };
                self.segment(tokens, head)
            })
            .collect()
    }

    fn segment(&self, tokens: Range<usize>, head: usize) -> Segment {
        let governed_by_segment =
            |t: &&Token| t.head.map_or(false, |h| tokens.contains(&h));
        let to_dependent = |t: &Token| AdjacentDependent {
            token: t.index,
            relation: t.relation.clone(),
        };

        let lefts = self
            .tokens
            .iter()
            .filter(|t| t.index < tokens.start)
            .filter(governed_by_segment)
            .map(to_dependent)
            .collect();
        let rights = self
            .tokens
            .iter()
            .filter(|t| t.index >= tokens.end)
            .filter(governed_by_segment)
            .map(to_dependent)
            .collect();

        Segment {
            tokens,
            head,
            lefts,
            rights,
        }
    }
}

/// Load a parser model by name.
///
/// `conllu` reads pre-parsed CoNLL-U. GiNZA model names run the configured
/// GiNZA command, which must answer `--help`.
pub fn load_model(name: &str, config: &BuilderConfig) -> Result<Arc<dyn DependencyParser>> {
    let parser: Arc<dyn DependencyParser> = match name {
        CONLLU_MODEL => Arc::new(ConlluParser::new()),
        model if GINZA_MODELS.contains(&model) => {
            let parser = CommandParser::ginza(&config.ginza_command, model);
            parser.check()?;
            Arc::new(parser)
        }
        other => {
            return Err(GraphError::ModelLoad {
                model: other.to_string(),
                reason: format!(
                    "unknown model, expected {} or one of {:?}",
                    CONLLU_MODEL, GINZA_MODELS
                ),
            })
        }
    };

    info!(model = name, "Loaded parser model");
    Ok(parser)
}
