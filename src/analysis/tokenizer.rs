use unicode_segmentation::UnicodeSegmentation;

/// One word of an analyzed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub position: u32,     // Word index in the value
    pub offset: usize,     // Byte offset in the value
}

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn name(&self) -> &'static str;
}

/// Unicode word-boundary tokenizer (UAX #29). Punctuation and whitespace
/// never become tokens.
#[derive(Clone)]
pub struct StandardTokenizer {
    pub max_token_length: usize,
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        StandardTokenizer {
            max_token_length: 255,
        }
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.unicode_word_indices()
            .filter(|(_, word)| word.len() <= self.max_token_length)
            .enumerate()
            .map(|(position, (offset, word))| Token {
                text: word.to_string(),
                position: position as u32,
                offset,
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_word_boundaries() {
        let tokens = StandardTokenizer::default().tokenize("Don't Stop Me Now (Live, 1986)");
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["Don't", "Stop", "Me", "Now", "Live", "1986"]);
        assert_eq!(tokens[1].offset, 6);
        assert_eq!(tokens[5].position, 5);
    }

    #[test]
    fn drops_overlong_tokens() {
        let tokenizer = StandardTokenizer { max_token_length: 4 };
        let tokens = tokenizer.tokenize("abba abbaabba");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "abba");
    }
}
