use std::collections::{HashMap, HashSet};
use crate::analysis::analyzer::Analyzer;
use crate::core::error::Result;
use crate::core::types::{DocId, Document};
use crate::index::inverted::InvertedIndex;
use crate::search::query::Query;
use crate::search::results::{Hit, ScoredDocument, TopKCollector};
use crate::search::scorer::BM25Scorer;

/// Added once per document whose whole text value starts with the prefix.
const KEYWORD_BOOST: f32 = 1.0;

/// Runs a query over one store's index and resolves every hit to its stored
/// fields.
pub struct QueryExecutor<'a> {
    pub index: &'a InvertedIndex,
    pub documents: &'a HashMap<DocId, Document>,
    pub analyzer: &'a Analyzer,
    pub scorer: BM25Scorer,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(
        index: &'a InvertedIndex,
        documents: &'a HashMap<DocId, Document>,
        analyzer: &'a Analyzer,
    ) -> Self {
        QueryExecutor {
            index,
            documents,
            analyzer,
            scorer: BM25Scorer::default(),
        }
    }

    pub fn execute(&self, query: &Query, limit: usize) -> Result<Vec<Hit>> {
        let scores = match query {
            Query::Prefix(prefix) => self.score_prefix(prefix)?,
            Query::Match(text) => self.score_match(text),
        };

        let mut collector = TopKCollector::new(limit);
        for (doc_id, score) in scores {
            if let Some(doc) = self.documents.get(&doc_id) {
                collector.collect(ScoredDocument {
                    doc_id,
                    key: doc.key.clone(),
                    score,
                });
            }
        }

        let hits = collector.get_results()
            .into_iter()
            .filter_map(|scored| {
                self.documents.get(&scored.doc_id).map(|doc| Hit {
                    key: scored.key,
                    score: scored.score,
                    fields: doc.fields.clone(),
                })
            })
            .collect();

        Ok(hits)
    }

    /// Every term and text value starting with `prefix`. Requires the prefix
    /// index to be current.
    fn score_prefix(&self, prefix: &str) -> Result<HashMap<DocId, f32>> {
        let mut scores: HashMap<DocId, f32> = HashMap::new();

        for term in self.index.prefix_search(prefix)? {
            if let Some(list) = self.index.search_term(&term) {
                let idf = self.scorer.idf(list.doc_freq(), self.index.doc_count());
                for posting in list.iter() {
                    *scores.entry(posting.doc_id).or_insert(0.0) += self.bm25(posting.doc_id, posting.term_freq, idf);
                }
            }

            if let Some(list) = self.index.search_keyword(&term) {
                for posting in list.iter() {
                    *scores.entry(posting.doc_id).or_insert(0.0) += KEYWORD_BOOST;
                }
            }
        }

        Ok(scores)
    }

    /// Disjunction over the analyzed tokens, scaled by the fraction of query
    /// tokens each document matched.
    fn score_match(&self, text: &str) -> HashMap<DocId, f32> {
        let tokens: HashSet<String> = self.analyzer.analyze(text)
            .into_iter()
            .map(|token| token.text)
            .collect();

        let mut scores: HashMap<DocId, (f32, usize)> = HashMap::new();

        for token in &tokens {
            let Some(list) = self.index.search_term(token) else {
                continue;
            };

            let idf = self.scorer.idf(list.doc_freq(), self.index.doc_count());
            for posting in list.iter() {
                let entry = scores.entry(posting.doc_id).or_insert((0.0, 0));
                entry.0 += self.bm25(posting.doc_id, posting.term_freq, idf);
                entry.1 += 1;
            }
        }

        let total = tokens.len().max(1) as f32;
        scores.into_iter()
            .map(|(doc_id, (score, matched))| (doc_id, score * matched as f32 / total))
            .collect()
    }

    fn bm25(&self, doc_id: DocId, term_freq: u32, idf: f32) -> f32 {
        self.scorer.score(
            term_freq,
            idf,
            self.index.doc_length(doc_id),
            self.index.avg_doc_length(),
        )
    }
}
