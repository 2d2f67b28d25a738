//! Token type definitions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role of a token inside its bunsetu, as tagged by GiNZA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BunsetuPosition {
    /// Head of the sentence root bunsetu
    Root,
    /// Semantic (content word) head
    SemHead,
    /// Syntactic (function word) head
    SynHead,
    /// Continuation of the content part
    Cont,
    /// Function word
    Func,
    /// Inside a bunsetu without a head
    NoHead,
}

impl BunsetuPosition {
    /// Whether this position marks the head of its bunsetu.
    pub fn is_head(&self) -> bool {
        matches!(self, BunsetuPosition::Root | BunsetuPosition::SemHead)
    }
}

impl FromStr for BunsetuPosition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROOT" => Ok(BunsetuPosition::Root),
            "SEM_HEAD" => Ok(BunsetuPosition::SemHead),
            "SYN_HEAD" => Ok(BunsetuPosition::SynHead),
            "CONT" => Ok(BunsetuPosition::Cont),
            "FUNC" => Ok(BunsetuPosition::Func),
            "NO_HEAD" => Ok(BunsetuPosition::NoHead),
            _ => Err(()),
        }
    }
}

/// A raw token as produced by the external parser.
///
/// Tokens are read-only once parsed; units keep their own copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Document-relative token index
    pub index: usize,

    /// Surface form
    pub form: String,

    /// Lemma (dictionary form)
    pub lemma: String,

    /// Universal POS tag
    pub upos: String,

    /// Document-relative index of the syntactic head, `None` for the root
    pub head: Option<usize>,

    /// Dependency relation to the head
    pub relation: Option<String>,

    /// Whether this token begins a bunsetu
    pub bunsetu_begin: bool,

    /// Role inside the bunsetu, when the parser reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_type: Option<BunsetuPosition>,

    /// Whether a space follows this token in the original text
    pub space_after: bool,
}

impl Token {
    /// Create a token with the fields every parser reports.
    pub fn new(index: usize, form: &str, head: Option<usize>, relation: &str) -> Self {
        Self {
            index,
            form: form.to_string(),
            lemma: form.to_string(),
            upos: "X".to_string(),
            head,
            relation: Some(relation.to_string()),
            bunsetu_begin: false,
            position_type: None,
            space_after: false,
        }
    }

    /// Mark this token as the start of a bunsetu.
    pub fn begins_bunsetu(mut self) -> Self {
        self.bunsetu_begin = true;
        self
    }

    /// Set the bunsetu position type.
    pub fn with_position(mut self, position_type: BunsetuPosition) -> Self {
        self.position_type = Some(position_type);
        self
    }
}

/// Join token forms back into surface text, honoring `space_after`.
pub fn surface_text<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> String {
    let mut text = String::new();
    let mut pending_space = false;
    for token in tokens {
        if pending_space {
            text.push(' ');
        }
        text.push_str(&token.form);
        pending_space = token.space_after;
    }
    text
}
