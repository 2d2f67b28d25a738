//! CoNLL-U reader backend.
//!
//! Reads the CoNLL-U that GiNZA emits with `-f conllu`. Bunsetu information is
//! taken from the MISC column (`BunsetuBILabel`, `BunsetuPositionType`).

use super::{DependencyParser, ParsedSentence, CONLLU_MODEL};
use crate::error::{GraphError, Result};
use crate::types::{surface_text, Token};

const COLUMNS: usize = 10;

/// Parser backend for pre-parsed CoNLL-U input.
#[derive(Debug, Clone, Default)]
pub struct ConlluParser;

impl ConlluParser {
    pub fn new() -> Self {
        Self
    }
}

impl DependencyParser for ConlluParser {
    fn name(&self) -> &str {
        CONLLU_MODEL
    }

    fn parse(&self, text: &str) -> Result<Vec<ParsedSentence>> {
        let mut reader = SentenceReader::default();

        for (i, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            let line_no = i + 1;

            if line.trim().is_empty() {
                reader.flush()?;
            } else if let Some(comment) = line.strip_prefix('#') {
                if let Some(sentence_text) = comment.trim_start().strip_prefix("text =") {
                    let sentence_text = sentence_text.strip_prefix(' ').unwrap_or(sentence_text);
                    reader.text = Some(sentence_text.to_string());
                }
            } else {
                reader.push_line(line, line_no)?;
            }
        }
        reader.flush()?;

        Ok(reader.sentences)
    }
}

/// Accumulates token lines until a sentence boundary.
#[derive(Default)]
struct SentenceReader {
    sentences: Vec<ParsedSentence>,
    text: Option<String>,
    tokens: Vec<Token>,
    /// Raw HEAD column per token, checked once the sentence is complete
    heads: Vec<(usize, usize)>,
    offset: usize,
}

impl SentenceReader {
    fn push_line(&mut self, line: &str, line_no: usize) -> Result<()> {
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() != COLUMNS {
            return Err(parse_error(
                line_no,
                format!("expected {} columns, found {}", COLUMNS, cols.len()),
            ));
        }

        // Multiword ranges and empty nodes carry no arcs
        if cols[0].contains('-') || cols[0].contains('.') {
            return Ok(());
        }

        let id: usize = cols[0]
            .parse()
            .map_err(|_| parse_error(line_no, format!("invalid token id {:?}", cols[0])))?;
        if id != self.tokens.len() + 1 {
            return Err(parse_error(
                line_no,
                format!("token id {} out of sequence", id),
            ));
        }

        let head: usize = cols[6]
            .parse()
            .map_err(|_| parse_error(line_no, format!("invalid head {:?}", cols[6])))?;
        self.heads.push((head, line_no));

        let mut token = Token {
            index: self.offset + id - 1,
            form: cols[1].to_string(),
            lemma: cols[2].to_string(),
            upos: cols[3].to_string(),
            head: (head > 0).then(|| self.offset + head - 1),
            relation: (cols[7] != "_").then(|| cols[7].to_string()),
            bunsetu_begin: false,
            position_type: None,
            space_after: true,
        };

        for entry in cols[9].split('|') {
            match entry.split_once('=') {
                Some(("BunsetuBILabel", label)) => token.bunsetu_begin = label == "B",
                Some(("BunsetuPositionType", kind)) => token.position_type = kind.parse().ok(),
                Some(("SpaceAfter", "No")) => token.space_after = false,
                _ => {}
            }
        }

        self.tokens.push(token);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.tokens.is_empty() {
            self.text = None;
            return Ok(());
        }

        let len = self.tokens.len();
        if let Some(&(head, line_no)) = self.heads.iter().find(|(head, _)| *head > len) {
            return Err(parse_error(
                line_no,
                format!("head {} outside sentence of {} tokens", head, len),
            ));
        }

        let tokens = std::mem::take(&mut self.tokens);
        let text = self.text.take().unwrap_or_else(|| surface_text(&tokens));
        self.heads.clear();
        self.offset += len;
        self.sentences.push(ParsedSentence::new(text, tokens));
        Ok(())
    }
}

fn parse_error(line: usize, reason: String) -> GraphError {
    GraphError::Parse { line, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BunsetuPosition;

    const SAMPLE: &str = "\
# text = 本を読む。
1\t本\t本\tNOUN\t名詞-普通名詞-一般\t_\t3\tobj\t_\tSpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=SEM_HEAD
2\tを\tを\tADP\t助詞-格助詞\t_\t1\tcase\t_\tSpaceAfter=No|BunsetuBILabel=I|BunsetuPositionType=SYN_HEAD
3\t読む\t読む\tVERB\t動詞-一般\t_\t0\troot\t_\tSpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=ROOT
4\t。\t。\tPUNCT\t補助記号-句点\t_\t3\tpunct\t_\tSpaceAfter=No|BunsetuBILabel=I|BunsetuPositionType=CONT

1\t雨\t雨\tNOUN\t_\t_\t2\tnsubj\t_\tSpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=SEM_HEAD
2\t降る\t降る\tVERB\t_\t_\t0\troot\t_\tSpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=ROOT
";

    #[test]
    fn test_reads_sentences_and_offsets() {
        let sentences = ConlluParser::new().parse(SAMPLE).unwrap();

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "本を読む。");
        assert_eq!(sentences[0].tokens.len(), 4);

        // second sentence has no text comment
        assert_eq!(sentences[1].text, "雨降る");
        assert_eq!(sentences[1].tokens[0].index, 4);
        assert_eq!(sentences[1].tokens[0].head, Some(5));
        assert_eq!(sentences[1].tokens[1].head, None);
    }

    #[test]
    fn test_reads_misc_column() {
        let sentences = ConlluParser::new().parse(SAMPLE).unwrap();
        let tokens = &sentences[0].tokens;

        assert!(tokens[0].bunsetu_begin);
        assert!(!tokens[1].bunsetu_begin);
        assert_eq!(tokens[0].position_type, Some(BunsetuPosition::SemHead));
        assert_eq!(tokens[2].position_type, Some(BunsetuPosition::Root));
        assert!(!tokens[0].space_after);
        assert_eq!(tokens[3].relation.as_deref(), Some("punct"));
    }

    #[test]
    fn test_text_comment_keeps_surrounding_whitespace() {
        let input = "# text =  本 \n1\t本\t本\tNOUN\t_\t_\t0\troot\t_\t_\n";
        let sentences = ConlluParser::new().parse(input).unwrap();
        assert_eq!(sentences[0].text, " 本 ");
    }

    #[test]
    fn test_skips_multiword_and_empty_nodes() {
        let input = "\
1-2\tdon't\t_\t_\t_\t_\t_\t_\t_\t_
1\tdo\tdo\tAUX\t_\t_\t3\taux\t_\t_
2\tn't\tnot\tPART\t_\t_\t3\tadvmod\t_\t_
2.1\tgo\tgo\tVERB\t_\t_\t_\t_\t_\t_
3\tgo\tgo\tVERB\t_\t_\t0\troot\t_\t_
";
        let sentences = ConlluParser::new().parse(input).unwrap();
        assert_eq!(sentences[0].tokens.len(), 3);
        assert_eq!(sentences[0].text, "do n't go");
    }

    #[test]
    fn test_missing_relation_is_none() {
        let input = "1\t猫\t猫\tNOUN\t_\t_\t0\t_\t_\t_\n";
        let sentences = ConlluParser::new().parse(input).unwrap();
        assert_eq!(sentences[0].tokens[0].relation, None);
    }

    #[test]
    fn test_malformed_lines() {
        let parser = ConlluParser::new();

        let err = parser.parse("1\t本\t本\n").unwrap_err();
        assert!(matches!(err, GraphError::Parse { line: 1, .. }));

        let err = parser
            .parse("1\t本\t本\tNOUN\t_\t_\t0\troot\t_\t_\n3\tを\tを\tADP\t_\t_\t1\tcase\t_\t_\n")
            .unwrap_err();
        assert!(matches!(err, GraphError::Parse { line: 2, .. }));

        let err = parser
            .parse("1\t本\t本\tNOUN\t_\t_\t9\tobj\t_\t_\n")
            .unwrap_err();
        assert!(matches!(err, GraphError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_empty_input() {
        let sentences = ConlluParser::new().parse("\n\n# newdoc\n").unwrap();
        assert!(sentences.is_empty());
    }
}
