//! Document assembly.
//!
//! Runs the parser over a document and turns every parsed sentence into
//! positioned units joined by dependency arcs.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{GraphError, Result};
use crate::parser::{
    load_model, AdjacentDependent, DependencyParser, ParsedSentence, CONLLU_MODEL,
};
use crate::processing::TextNormalizer;
use crate::types::{
    ArcRecord, BuilderConfig, DependencyArc, Direction, Document, Granularity, Sentence, Unit,
};

/// Builds dependency documents from text.
///
/// The builder holds a shared handle to a loaded parser and keeps no state
/// between builds.
#[derive(Clone)]
pub struct DocumentBuilder {
    parser: Arc<dyn DependencyParser>,
    granularity: Granularity,
    normalizer: Option<TextNormalizer>,
}

impl DocumentBuilder {
    /// Create a builder around an already loaded parser.
    pub fn new(parser: Arc<dyn DependencyParser>) -> Self {
        Self {
            parser,
            granularity: Granularity::default(),
            normalizer: None,
        }
    }

    /// Load the configured model and create a builder for it.
    ///
    /// CoNLL-U input cannot be normalized: the digit step would rewrite the
    /// id and head columns.
    pub fn from_config(config: &BuilderConfig) -> Result<Self> {
        if config.normalize && config.model == CONLLU_MODEL {
            return Err(GraphError::ModelLoad {
                model: config.model.clone(),
                reason: "normalization cannot be applied to CoNLL-U input".to_string(),
            });
        }

        let parser = load_model(&config.model, config)?;
        let builder = Self::new(parser).with_granularity(config.granularity);

        Ok(if config.normalize {
            builder.with_normalizer(TextNormalizer::with_placeholder(config.number_placeholder))
        } else {
            builder
        })
    }

    /// Set the granularity used by [`build_default`](Self::build_default).
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Normalize input text before it reaches the parser.
    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Build with the configured granularity.
    pub fn build_default(&self, text: &str) -> Result<Document> {
        self.build(text, self.granularity)
    }

    /// Parse `text` and assemble its sentences at the given granularity.
    pub fn build(&self, text: &str, granularity: Granularity) -> Result<Document> {
        if text.trim().is_empty() {
            return Err(GraphError::EmptyInput);
        }

        let input = match &self.normalizer {
            Some(normalizer) => Cow::Owned(normalizer.normalize(text)),
            None => Cow::Borrowed(text),
        };

        let parsed = self.parser.parse(&input)?;
        if parsed.is_empty() {
            return Err(GraphError::EmptyInput);
        }

        let sentences = parsed
            .iter()
            .enumerate()
            .map(|(position, sentence)| build_sentence(sentence, position, granularity))
            .collect::<Result<Vec<_>>>()?;

        let document = Document::new(self.parser.name(), granularity, sentences);
        info!(
            model = %document.model,
            granularity = %granularity,
            sentences = document.len(),
            units = document.unit_count(),
            arcs = document.arc_count(),
            "Built dependency document"
        );

        Ok(document)
    }
}

/// Assemble one parsed sentence into units and arcs.
///
/// A dependent token that does not head any unit yields no arc.
pub fn build_sentence(
    parsed: &ParsedSentence,
    position: usize,
    granularity: Granularity,
) -> Result<Sentence> {
    let head_list = parsed.head_list();
    let mut units = Vec::new();

    for (current, segment) in parsed.segments(granularity).into_iter().enumerate() {
        let mut left_arcs = Vec::new();
        for dependent in &segment.lefts {
            if let Some(start) = resolve(&head_list, dependent, position, current) {
                left_arcs.push(DependencyArc::try_from(ArcRecord {
                    start: Some(start),
                    end: Some(current),
                    label: dependent.relation.clone(),
                })?);
            }
        }

        let mut right_arcs = Vec::new();
        for dependent in &segment.rights {
            if let Some(end) = resolve(&head_list, dependent, position, current) {
                right_arcs.push(DependencyArc::try_from(ArcRecord {
                    start: Some(current),
                    end: Some(end),
                    label: dependent.relation.clone(),
                })?);
            }
        }

        let tokens = parsed.tokens_in(segment.tokens.clone()).to_vec();
        let mut unit = Unit::new(segment.tokens, current, tokens);
        for arc in left_arcs {
            unit.append_arc(arc, Direction::Left)?;
        }
        for arc in right_arcs {
            unit.append_arc(arc, Direction::Right)?;
        }
        units.push(unit);
    }

    Sentence::new(parsed.text.clone(), units, position)
}

/// Position of the unit headed by `dependent`, if any.
fn resolve(
    head_list: &[usize],
    dependent: &AdjacentDependent,
    sentence: usize,
    unit: usize,
) -> Option<usize> {
    let found = head_list.iter().position(|&head| head == dependent.token);
    if found.is_none() {
        debug!(
            sentence,
            unit,
            token = dependent.token,
            "Dependent does not head a unit, dropping arc"
        );
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ConlluParser;
    use crate::types::Token;

    const TWO_SENTENCES: &str = "\
# text = 彼は本を読む。
1\t彼\t彼\tPRON\t_\t_\t5\tnsubj\t_\tSpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=SEM_HEAD
2\tは\tは\tADP\t_\t_\t1\tcase\t_\tSpaceAfter=No|BunsetuBILabel=I|BunsetuPositionType=SYN_HEAD
3\t本\t本\tNOUN\t_\t_\t5\tobj\t_\tSpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=SEM_HEAD
4\tを\tを\tADP\t_\t_\t3\tcase\t_\tSpaceAfter=No|BunsetuBILabel=I|BunsetuPositionType=SYN_HEAD
5\t読む\t読む\tVERB\t_\t_\t0\troot\t_\tSpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=ROOT
6\t。\t。\tPUNCT\t_\t_\t5\tpunct\t_\tSpaceAfter=No|BunsetuBILabel=I|BunsetuPositionType=CONT

# text = 雨が降る。
1\t雨\t雨\tNOUN\t_\t_\t3\tnsubj\t_\tSpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=SEM_HEAD
2\tが\tが\tADP\t_\t_\t1\tcase\t_\tSpaceAfter=No|BunsetuBILabel=I|BunsetuPositionType=SYN_HEAD
3\t降る\t降る\tVERB\t_\t_\t0\troot\t_\tSpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=ROOT
4\t。\t。\tPUNCT\t_\t_\t3\tpunct\t_\tSpaceAfter=No|BunsetuBILabel=I|BunsetuPositionType=CONT
";

    fn builder() -> DocumentBuilder {
        DocumentBuilder::new(Arc::new(ConlluParser::new()))
    }

    #[test]
    fn test_phrase_units_and_arcs() {
        let document = builder().build(TWO_SENTENCES, Granularity::Phrase).unwrap();
        let sentence = &document.sentences()[0];

        let texts: Vec<_> = sentence.units().map(|u| u.text()).collect();
        assert_eq!(texts, vec!["彼は", "本を", "読む。"]);

        let yomu = sentence.unit(2).unwrap();
        assert_eq!(
            yomu.left_arcs(),
            &[
                DependencyArc::new(0, 2, "nsubj"),
                DependencyArc::new(1, 2, "obj"),
            ]
        );
        assert!(yomu.right_arcs().is_empty());
    }

    #[test]
    fn test_head_word_units() {
        let document = builder().build(TWO_SENTENCES, Granularity::HeadWord).unwrap();
        let sentence = &document.sentences()[0];

        let texts: Vec<_> = sentence.units().map(|u| u.text()).collect();
        assert_eq!(texts, vec!["彼", "本", "読む"]);

        // は and 。 do not head a unit, so they leave no arcs behind
        for unit in sentence.units() {
            assert!(unit.right_arcs().is_empty());
        }
        assert_eq!(sentence.unit(2).unwrap().left_arcs().len(), 2);
    }

    #[test]
    fn test_positions_are_sentence_local() {
        let document = builder().build(TWO_SENTENCES, Granularity::Phrase).unwrap();
        let second = &document.sentences()[1];

        assert_eq!(second.position(), 1);
        assert_eq!(second.unit(0).unwrap().span(), 6..8);
        assert_eq!(
            second.unit(1).unwrap().left_arcs(),
            &[DependencyArc::new(0, 1, "nsubj")]
        );
    }

    #[test]
    fn test_resolve_dependents_over_built_sentence() {
        let document = builder().build(TWO_SENTENCES, Granularity::Phrase).unwrap();
        let sentence = &document.sentences()[0];
        let deps = sentence.dependents_at(2).unwrap();

        let left: Vec<_> = deps.left.iter().map(|d| (d.unit.text(), d.label)).collect();
        assert_eq!(
            left,
            vec![("彼は".to_string(), "nsubj"), ("本を".to_string(), "obj")]
        );
    }

    #[test]
    fn test_right_arcs() {
        // synthetic order: 行く governs 東京 on its right
        let tokens = vec![
            Token::new(0, "行く", None, "root").begins_bunsetu(),
            Token::new(1, "東京", Some(0), "obl").begins_bunsetu(),
        ];
        let parsed = ParsedSentence::new("行く東京", tokens);
        let sentence = build_sentence(&parsed, 0, Granularity::HeadWord).unwrap();

        assert_eq!(
            sentence.unit(0).unwrap().right_arcs(),
            &[DependencyArc::new(0, 1, "obl")]
        );
        let deps = sentence.dependents_at(0).unwrap();
        assert_eq!(deps.right[0].unit.text(), "東京");
        assert_eq!(deps.right[0].label, "obl");
    }

    #[test]
    fn test_missing_relation_is_malformed() {
        let mut dependent = Token::new(0, "本", Some(1), "obj").begins_bunsetu();
        dependent.relation = None;
        let tokens = vec![dependent, Token::new(1, "読む", None, "root").begins_bunsetu()];
        let parsed = ParsedSentence::new("本読む", tokens);

        let err = build_sentence(&parsed, 0, Granularity::Phrase).unwrap_err();
        assert!(matches!(err, GraphError::MalformedArc { field: "label" }));
    }

    #[test]
    fn test_empty_input() {
        let builder = builder();
        assert!(matches!(
            builder.build("", Granularity::Phrase),
            Err(GraphError::EmptyInput)
        ));
        assert!(matches!(
            builder.build("  \n\t", Granularity::Phrase),
            Err(GraphError::EmptyInput)
        ));
        assert!(matches!(
            builder.build("# only a comment\n", Granularity::Phrase),
            Err(GraphError::EmptyInput)
        ));
    }

    #[test]
    fn test_from_config_unknown_model() {
        let config = BuilderConfig::default().with_model("missing_model");
        assert!(matches!(
            DocumentBuilder::from_config(&config),
            Err(GraphError::ModelLoad { .. })
        ));
    }

    #[test]
    fn test_from_config_conllu() {
        let config = BuilderConfig::default()
            .with_model("conllu")
            .with_granularity(Granularity::Phrase);
        let builder = DocumentBuilder::from_config(&config).unwrap();

        assert_eq!(builder.granularity(), Granularity::Phrase);
        let document = builder.build_default(TWO_SENTENCES).unwrap();
        assert_eq!(document.model, "conllu");
        assert_eq!(document.granularity, Granularity::Phrase);
        assert_eq!(document.text(), "彼は本を読む。雨が降る。");
    }

    #[test]
    fn test_from_config_rejects_normalized_conllu() {
        let config = BuilderConfig::default()
            .with_model("conllu")
            .with_normalization('0');
        assert!(matches!(
            DocumentBuilder::from_config(&config),
            Err(GraphError::ModelLoad { model, .. }) if model == "conllu"
        ));
    }
}
