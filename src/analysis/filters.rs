use std::collections::HashSet;
use crate::analysis::tokenizer::Token;

/// In-place stage of an analyzer chain.
pub trait TokenFilter: Send + Sync {
    fn apply(&self, tokens: &mut Vec<Token>);

    fn name(&self) -> &'static str;
}

pub struct LowercaseFilter;

impl TokenFilter for LowercaseFilter {
    fn apply(&self, tokens: &mut Vec<Token>) {
        for token in tokens.iter_mut() {
            if token.text.chars().any(char::is_uppercase) {
                token.text = token.text.to_lowercase();
            }
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for",
    "if", "in", "into", "is", "it", "no", "not", "of", "on", "or",
    "such", "that", "the", "their", "then", "there", "these", "they",
    "this", "to", "was", "will", "with",
];

/// Drops function words. Must run after lowercasing; surviving tokens keep
/// their positions.
pub struct StopWordFilter {
    words: HashSet<&'static str>,
}

impl StopWordFilter {
    pub fn english() -> Self {
        StopWordFilter {
            words: ENGLISH_STOP_WORDS.iter().copied().collect(),
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

impl TokenFilter for StopWordFilter {
    fn apply(&self, tokens: &mut Vec<Token>) {
        tokens.retain(|token| !self.is_stop_word(&token.text));
    }

    fn name(&self) -> &'static str {
        "stop_words"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words.iter()
            .enumerate()
            .map(|(i, w)| Token { text: w.to_string(), position: i as u32, offset: 0 })
            .collect()
    }

    #[test]
    fn stop_words_keep_positions() {
        let mut stream = tokens(&["the", "dark", "side", "of", "the", "moon"]);
        StopWordFilter::english().apply(&mut stream);

        let kept: Vec<(&str, u32)> = stream.iter().map(|t| (t.text.as_str(), t.position)).collect();
        assert_eq!(kept, vec![("dark", 1), ("side", 2), ("moon", 5)]);
    }

    #[test]
    fn lowercase_handles_non_ascii() {
        let mut stream = tokens(&["MÖTLEY", "Crüe"]);
        LowercaseFilter.apply(&mut stream);
        assert_eq!(stream[0].text, "mötley");
        assert_eq!(stream[1].text, "crüe");
    }
}
