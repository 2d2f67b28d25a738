//! Configuration types for document building.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_GINZA_COMMAND, DEFAULT_MODEL, DEFAULT_NUMBER_PLACEHOLDER};

/// Segmentation granularity for units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One unit per bunsetu head token
    #[default]
    HeadWord,
    /// One unit per whole bunsetu
    Phrase,
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "headword" | "head_word" | "word" => Ok(Granularity::HeadWord),
            "phrase" | "bunsetu" => Ok(Granularity::Phrase),
            other => Err(format!("unknown granularity: {}", other)),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::HeadWord => write!(f, "head_word"),
            Granularity::Phrase => write!(f, "phrase"),
        }
    }
}

/// Document builder configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Parser model name (`conllu`, `ja_ginza`, `ja_ginza_electra`)
    pub model: String,

    /// Default segmentation granularity
    pub granularity: Granularity,

    /// Whether to normalize text before parsing
    pub normalize: bool,

    /// Replacement for digit runs when normalizing
    pub number_placeholder: char,

    /// Program used by the GiNZA command backend
    pub ginza_command: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            granularity: Granularity::default(),
            normalize: false,
            number_placeholder: DEFAULT_NUMBER_PLACEHOLDER,
            ginza_command: DEFAULT_GINZA_COMMAND.to_string(),
        }
    }
}

impl BuilderConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            model: std::env::var("DEPGRAPH_MODEL").unwrap_or(defaults.model),
            granularity: std::env::var("DEPGRAPH_GRANULARITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.granularity),
            normalize: std::env::var("DEPGRAPH_NORMALIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.normalize),
            number_placeholder: std::env::var("DEPGRAPH_NUMBER_PLACEHOLDER")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.number_placeholder),
            ginza_command: std::env::var("GINZA_COMMAND").unwrap_or(defaults.ginza_command),
        }
    }

    /// Use the given model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Set the default granularity.
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Enable normalization with the given digit placeholder.
    pub fn with_normalization(mut self, placeholder: char) -> Self {
        self.normalize = true;
        self.number_placeholder = placeholder;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_parsing() {
        assert_eq!("phrase".parse(), Ok(Granularity::Phrase));
        assert_eq!("Bunsetu".parse(), Ok(Granularity::Phrase));
        assert_eq!(" head_word ".parse(), Ok(Granularity::HeadWord));
        assert!("clause".parse::<Granularity>().is_err());
        assert_eq!(Granularity::Phrase.to_string(), "phrase");
    }

    #[test]
    fn test_defaults() {
        let config = BuilderConfig::default();
        assert_eq!(config.model, "ja_ginza_electra");
        assert_eq!(config.granularity, Granularity::HeadWord);
        assert_eq!(config.number_placeholder, '0');
        assert!(!config.normalize);

        let config = config.with_model("conllu").with_normalization('#');
        assert_eq!(config.model, "conllu");
        assert!(config.normalize);
        assert_eq!(config.number_placeholder, '#');
    }
}
