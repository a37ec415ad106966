use std::collections::HashMap;
use crate::analysis::analyzer::Analyzer;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, Document};
use crate::index::posting::PostingList;
use crate::index::prefix::PrefixIndex;

/// Terms of one document, produced outside the index lock.
#[derive(Debug, Clone)]
pub struct IndexedDoc {
    pub key: String,
    /// Analyzed token -> frequency across all text fields
    pub terms: HashMap<String, u32>,
    /// Whole lowercased text values, one per non-empty text field
    pub keywords: Vec<String>,
    pub length: u32,
}

impl IndexedDoc {
    pub fn analyze(doc: &Document, analyzer: &Analyzer) -> Self {
        let mut terms: HashMap<String, u32> = HashMap::new();
        let mut keywords = Vec::new();
        let mut length = 0u32;

        for text in doc.text_values() {
            for token in analyzer.analyze(text) {
                *terms.entry(token.text).or_insert(0) += 1;
                length += 1;
            }

            let keyword = text.trim().to_lowercase();
            if !keyword.is_empty() {
                keywords.push(keyword);
            }
        }

        keywords.sort_unstable();
        keywords.dedup();

        IndexedDoc {
            key: doc.key.clone(),
            terms,
            keywords,
            length,
        }
    }
}

/// What a document contributed, kept so a replacement can undo it.
struct DocEntry {
    terms: Vec<String>,
    keywords: Vec<String>,
    length: u32,
}

/// Inverted index structure
#[derive(Default)]
pub struct InvertedIndex {
    pub postings: HashMap<String, PostingList>,
    pub keywords: HashMap<String, PostingList>,
    docs: HashMap<DocId, DocEntry>,
    pub total_tokens: u64,
    prefix_index: Option<PrefixIndex>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    pub fn avg_doc_length(&self) -> f32 {
        if self.docs.is_empty() {
            return 0.0;
        }
        self.total_tokens as f32 / self.docs.len() as f32
    }

    pub fn doc_length(&self, doc_id: DocId) -> u32 {
        self.docs.get(&doc_id).map(|d| d.length).unwrap_or(0)
    }

    pub fn add_document(&mut self, doc_id: DocId, indexed: &IndexedDoc) {
        for (term, freq) in &indexed.terms {
            self.postings.entry(term.clone())
                .or_insert_with(PostingList::new)
                .insert(doc_id, *freq);
        }

        for keyword in &indexed.keywords {
            self.keywords.entry(keyword.clone())
                .or_insert_with(PostingList::new)
                .insert(doc_id, 1);
        }

        self.docs.insert(doc_id, DocEntry {
            terms: indexed.terms.keys().cloned().collect(),
            keywords: indexed.keywords.clone(),
            length: indexed.length,
        });
        self.total_tokens += indexed.length as u64;
        self.prefix_index = None;
    }

    pub fn remove_document(&mut self, doc_id: DocId) {
        let Some(entry) = self.docs.remove(&doc_id) else {
            return;
        };

        for term in &entry.terms {
            remove_posting(&mut self.postings, term, doc_id);
        }
        for keyword in &entry.keywords {
            remove_posting(&mut self.keywords, keyword, doc_id);
        }

        self.total_tokens -= entry.length as u64;
        self.prefix_index = None;
    }

    pub fn search_term(&self, term: &str) -> Option<&PostingList> {
        self.postings.get(term)
    }

    pub fn search_keyword(&self, keyword: &str) -> Option<&PostingList> {
        self.keywords.get(keyword)
    }

    pub fn needs_prefix_index(&self) -> bool {
        self.prefix_index.is_none()
    }

    /// Rebuild the FST over tokens and keywords after writes.
    pub fn build_prefix_index(&mut self) -> Result<()> {
        let terms = self.postings.keys()
            .chain(self.keywords.keys())
            .map(String::as_str);

        self.prefix_index = Some(PrefixIndex::build(terms)?);
        Ok(())
    }

    pub fn prefix_search(&self, prefix: &str) -> Result<Vec<String>> {
        match &self.prefix_index {
            Some(index) => Ok(index.search_prefix(prefix)),
            None => Err(Error::new(ErrorKind::SearchExecution, "prefix index not built")),
        }
    }
}

fn remove_posting(map: &mut HashMap<String, PostingList>, term: &str, doc_id: DocId) {
    if let Some(list) = map.get_mut(term) {
        list.remove(doc_id);
        if list.is_empty() {
            map.remove(term);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexed(key: &str, title: &str) -> IndexedDoc {
        let doc = Document::new(key)
            .with_field("id", key)
            .with_field("title", title);
        IndexedDoc::analyze(&doc, &Analyzer::standard())
    }

    #[test]
    fn analyze_collects_terms_and_keywords() {
        let doc = indexed("t1", "Bohemian Rhapsody");
        assert_eq!(doc.terms.get("bohemian"), Some(&1));
        assert_eq!(doc.terms.get("t1"), Some(&1));
        assert_eq!(doc.keywords, vec!["bohemian rhapsody".to_string(), "t1".to_string()]);
        assert_eq!(doc.length, 3);
    }

    #[test]
    fn remove_undoes_add() {
        let mut index = InvertedIndex::new();
        index.add_document(DocId(1), &indexed("a", "Abbey Road"));
        index.add_document(DocId(2), &indexed("b", "Road to Nowhere"));
        assert_eq!(index.search_term("road").unwrap().doc_freq(), 2);

        index.remove_document(DocId(1));
        assert_eq!(index.doc_count(), 1);
        assert_eq!(index.search_term("road").unwrap().doc_freq(), 1);
        assert!(index.search_term("abbey").is_none());
        assert!(index.search_keyword("abbey road").is_none());
        assert_eq!(index.total_tokens, 3);
    }

    #[test]
    fn prefix_index_is_invalidated_by_writes() {
        let mut index = InvertedIndex::new();
        index.add_document(DocId(1), &indexed("a", "Abbey Road"));
        index.build_prefix_index().unwrap();
        assert_eq!(index.prefix_search("abb").unwrap(), vec!["abbey", "abbey road"]);

        index.add_document(DocId(2), &indexed("b", "Abba Gold"));
        assert!(index.needs_prefix_index());
        assert!(index.prefix_search("abb").is_err());
    }
}
