//! Text normalization applied before parsing.
//!
//! Steps run in a fixed order; reordering them changes the output for text
//! that mixes brackets, digits and full-width characters.

use regex::{NoExpand, Regex};

use crate::DEFAULT_NUMBER_PLACEHOLDER;

/// Bracket glyphs replaced by a single space.
pub const BRACKETS: &str = "()<>[]{}（）＜＞［］｛｝｟｠｢｣〈〉《》「」『』【】〔〕〖〗〘〙〚〛\
⟦⟧⟨⟩⟪⟫⟬⟭⟮⟯⦃⦄⦅⦆⦇⦈⦉⦊⦋⦌⦍⦎⦏⦐⦑⦒⦗⦘⧼⧽❨❩❪❫❬❭❮❯❰❱❲❳❴❵⁽⁾₍₎";

/// Full-width forms of U+FF61..=U+FF9F, in code point order. The half-width
/// full stop and comma map to ASCII, matching `replace_punctuation`.
const FULL_WIDTH_KANA: &str = ".「」,・ヲァィゥェォャュョッー\
アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワン゛゜";

const HALF_WIDTH_KANA_START: u32 = 0xFF61;
const HALF_WIDTH_KANA_END: u32 = 0xFF9F;
const HALF_WIDTH_VOICED_MARK: char = 'ﾞ';
const HALF_WIDTH_SEMI_VOICED_MARK: char = 'ﾟ';

lazy_static::lazy_static! {
    static ref BRACKET_RE: Regex = Regex::new(&format!(
        "[{}]",
        BRACKETS
            .chars()
            .map(|c| regex::escape(&c.to_string()))
            .collect::<String>()
    ))
    .expect("bracket pattern is valid");
    static ref DIGITS_RE: Regex = Regex::new(r"\d+").expect("digit pattern is valid");
    static ref KANA_TABLE: Vec<char> = FULL_WIDTH_KANA.chars().collect();
}

/// Text normalizer for Japanese input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextNormalizer {
    /// Replacement for every run of digits
    placeholder: char,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    /// Create a normalizer that folds numbers to `'0'`.
    pub fn new() -> Self {
        Self::with_placeholder(DEFAULT_NUMBER_PLACEHOLDER)
    }

    /// Create a normalizer with a custom digit placeholder.
    pub fn with_placeholder(placeholder: char) -> Self {
        Self { placeholder }
    }

    /// Run every normalization step in order.
    pub fn normalize(&self, text: &str) -> String {
        let text = self.delete_brackets(text);
        let text = self.replace_punctuation(&text);
        let text = self.fold_to_half_width(&text);
        let text = self.fold_kana_to_full_width(&text);
        let text = self.to_lower(&text);
        self.collapse_numbers(&text)
    }

    /// Replace every bracket with a space.
    pub fn delete_brackets(&self, text: &str) -> String {
        BRACKET_RE.replace_all(text, " ").into_owned()
    }

    /// Replace the ideographic comma and full stop with ASCII ones.
    pub fn replace_punctuation(&self, text: &str) -> String {
        text.replace('、', ",").replace('。', ".")
    }

    /// Fold full-width ASCII letters, digits, symbols and the ideographic
    /// space to half-width. Kana are untouched.
    pub fn fold_to_half_width(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\u{3000}' => ' ',
                '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
                _ => c,
            })
            .collect()
    }

    /// Fold half-width katakana and its punctuation to full-width, composing
    /// voiced and semi-voiced marks onto the preceding kana.
    pub fn fold_kana_to_full_width(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            let Some(full) = full_width_kana(c) else {
                out.push(c);
                continue;
            };

            let composed = match chars.peek() {
                Some(&HALF_WIDTH_VOICED_MARK) => voiced(full),
                Some(&HALF_WIDTH_SEMI_VOICED_MARK) => semi_voiced(full),
                _ => None,
            };

            match composed {
                Some(composed) => {
                    chars.next();
                    out.push(composed);
                }
                None => out.push(full),
            }
        }

        out
    }

    /// Lowercase letters.
    pub fn to_lower(&self, text: &str) -> String {
        text.to_lowercase()
    }

    /// Replace each maximal run of digits with the placeholder.
    pub fn collapse_numbers(&self, text: &str) -> String {
        let placeholder = self.placeholder.to_string();
        DIGITS_RE
            .replace_all(text, NoExpand(&placeholder))
            .into_owned()
    }
}

fn full_width_kana(c: char) -> Option<char> {
    let code = c as u32;
    if !(HALF_WIDTH_KANA_START..=HALF_WIDTH_KANA_END).contains(&code) {
        return None;
    }
    KANA_TABLE
        .get((code - HALF_WIDTH_KANA_START) as usize)
        .copied()
}

fn voiced(kana: char) -> Option<char> {
    match kana {
        'ウ' => Some('ヴ'),
        'カ' | 'キ' | 'ク' | 'ケ' | 'コ' | 'サ' | 'シ' | 'ス' | 'セ' | 'ソ' | 'タ' | 'チ' | 'ツ'
        | 'テ' | 'ト' | 'ハ' | 'ヒ' | 'フ' | 'ヘ' | 'ホ' => char::from_u32(kana as u32 + 1),
        _ => None,
    }
}

fn semi_voiced(kana: char) -> Option<char> {
    match kana {
        'ハ' | 'ヒ' | 'フ' | 'ヘ' | 'ホ' => char::from_u32(kana as u32 + 2),
        _ => None,
    }
}
