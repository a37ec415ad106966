use crate::analysis::filters::{LowercaseFilter, StopWordFilter, TokenFilter};
use crate::analysis::tokenizer::{StandardTokenizer, Token, Tokenizer};

/// Tokenizer followed by filters, applied in order.
pub struct Analyzer {
    tokenizer: Box<dyn Tokenizer>,
    filters: Vec<Box<dyn TokenFilter>>,
}

impl Analyzer {
    pub fn new(tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            filters: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        let mut tokens = self.tokenizer.tokenize(text);
        for filter in &self.filters {
            filter.apply(&mut tokens);
        }
        tokens
    }

    /// e.g. `standard: lowercase -> stop_words`
    pub fn describe(&self) -> String {
        let stages: Vec<&str> = self.filters.iter().map(|f| f.name()).collect();
        format!("{}: {}", self.tokenizer.name(), stages.join(" -> "))
    }

    /// Unicode words, lowercased, English stop words removed. Used for both
    /// indexing and match queries so the two sides always agree.
    pub fn standard() -> Self {
        Analyzer::new(Box::new(StandardTokenizer::default()))
            .with_filter(Box::new(LowercaseFilter))
            .with_filter(Box::new(StopWordFilter::english()))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_lowercases_and_drops_stop_words() {
        let analyzer = Analyzer::standard();
        let tokens = analyzer.analyze("The Dark Side of the Moon");
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["dark", "side", "moon"]);
        assert_eq!(tokens[2].position, 5);
        assert_eq!(analyzer.describe(), "standard: lowercase -> stop_words");
    }
}
