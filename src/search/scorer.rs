/// BM25 Scorer
#[derive(Debug, Clone, Copy)]
pub struct BM25Scorer {
    pub k1: f32,  // Term frequency saturation (default: 1.2)
    pub b: f32,   // Length normalization strength (default: 0.75)
}

impl Default for BM25Scorer {
    fn default() -> Self {
        BM25Scorer {
            k1: 1.2,
            b: 0.75,
        }
    }
}

impl BM25Scorer {
    /// Probabilistic IDF, always positive.
    pub fn idf(&self, doc_freq: u32, total_docs: usize) -> f32 {
        let n = total_docs as f32;
        let df = doc_freq as f32;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    pub fn score(&self, term_freq: u32, idf: f32, doc_length: u32, avg_doc_length: f32) -> f32 {
        let tf = term_freq as f32;
        let doc_len = doc_length as f32;
        let avg_doc_len = if avg_doc_length > 0.0 { avg_doc_length } else { 1.0 };

        let numerator = idf * tf * (self.k1 + 1.0);
        let denominator = tf + self.k1 * (1.0 - self.b + self.b * (doc_len / avg_doc_len));

        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarer_terms_and_shorter_docs_score_higher() {
        let scorer = BM25Scorer::default();
        assert!(scorer.idf(1, 100) > scorer.idf(50, 100));
        assert!(scorer.idf(100, 100) > 0.0);

        let idf = scorer.idf(3, 100);
        assert!(scorer.score(1, idf, 2, 6.0) > scorer.score(1, idf, 12, 6.0));
        assert!(scorer.score(3, idf, 6, 6.0) > scorer.score(1, idf, 6, 6.0));
    }
}
