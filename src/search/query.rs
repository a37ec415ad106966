/// How a search term is matched against a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Literal prefix of an indexed term or text value
    Prefix,
    /// Analyzed tokens, any of which may match, relevance ranked
    Match,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Prefix(String),
    Match(String),
}

impl QueryMode {
    /// Whitespace anywhere in the term selects `Match`, otherwise `Prefix`.
    /// A multi-word term can never be a prefix query and a single word can
    /// never be a match query.
    pub fn select(term: &str) -> Self {
        if term.chars().any(char::is_whitespace) {
            QueryMode::Match
        } else {
            QueryMode::Prefix
        }
    }
}

impl Query {
    pub fn from_term(term: &str) -> Self {
        match QueryMode::select(term) {
            // Indexed terms are lowercased, so the literal must be too.
            QueryMode::Prefix => Query::Prefix(term.to_lowercase()),
            QueryMode::Match => Query::Match(term.to_string()),
        }
    }

    pub fn mode(&self) -> QueryMode {
        match self {
            Query::Prefix(_) => QueryMode::Prefix,
            Query::Match(_) => QueryMode::Match,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_selects_prefix() {
        assert_eq!(Query::from_term("Bohemian"), Query::Prefix("bohemian".to_string()));
        assert_eq!(QueryMode::select("AC/DC"), QueryMode::Prefix);
        assert_eq!(QueryMode::select(""), QueryMode::Prefix);
    }

    #[test]
    fn any_whitespace_selects_match() {
        assert_eq!(
            Query::from_term("Bohemian Rhapsody"),
            Query::Match("Bohemian Rhapsody".to_string())
        );
        assert_eq!(QueryMode::select("queen\tlive"), QueryMode::Match);
        assert_eq!(QueryMode::select(" queen"), QueryMode::Match);
        assert_eq!(QueryMode::select("queen\u{3000}live"), QueryMode::Match);
    }
}
