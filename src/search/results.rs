use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, FieldValue};

/// One matching document with every stored field.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub key: String,
    pub score: f32,
    pub fields: BTreeMap<String, FieldValue>,
}

/// Outcome of a search: "zero matches" is `Matches(vec![])`, never `Failed`.
#[derive(Debug)]
pub enum SearchOutcome<T> {
    Matches(Vec<T>),
    Failed(Error),
}

impl<T> SearchOutcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, SearchOutcome::Failed(_))
    }

    pub fn into_result(self) -> Result<Vec<T>> {
        match self {
            SearchOutcome::Matches(hits) => Ok(hits),
            SearchOutcome::Failed(err) => Err(err),
        }
    }

    /// Degraded view used where only a list can be returned.
    pub fn hits_or_empty(self) -> Vec<T> {
        match self {
            SearchOutcome::Matches(hits) => hits,
            SearchOutcome::Failed(_) => Vec::new(),
        }
    }
}

impl<T> From<Result<Vec<T>>> for SearchOutcome<T> {
    fn from(result: Result<Vec<T>>) -> Self {
        match result {
            Ok(hits) => SearchOutcome::Matches(hits),
            Err(err) => SearchOutcome::Failed(err),
        }
    }
}

/// Document with relevance score
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub doc_id: DocId,
    pub key: String,
    pub score: f32,
}

impl PartialEq for ScoredDocument {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredDocument {}

impl PartialOrd for ScoredDocument {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredDocument {
    // Greater means worse: lower score, then larger key. The heap top is the
    // next hit to evict and an ascending sort puts the best hit first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.score.total_cmp(&self.score)
            .then_with(|| self.key.cmp(&other.key))
    }
}

/// Top-K collector; `k == 0` keeps everything.
pub struct TopKCollector {
    pub heap: BinaryHeap<ScoredDocument>,
    pub k: usize,
    pub total_collected: usize,
}

impl TopKCollector {
    pub fn new(k: usize) -> Self {
        TopKCollector {
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1024)),
            k,
            total_collected: 0,
        }
    }

    pub fn collect(&mut self, scored_doc: ScoredDocument) {
        self.total_collected += 1;
        self.heap.push(scored_doc);

        if self.k > 0 && self.heap.len() > self.k {
            self.heap.pop();
        }
    }

    /// Best first.
    pub fn get_results(self) -> Vec<ScoredDocument> {
        self.heap.into_sorted_vec()
    }
}
