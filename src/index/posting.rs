use crate::core::types::DocId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_freq: u32,       // Occurrences across the document's text fields
}

/// Documents containing one term, ascending by doc id.
#[derive(Debug, Clone, Default)]
pub struct PostingList {
    entries: Vec<Posting>,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList::default()
    }

    /// Doc ids are handed out in increasing order, so this is almost always
    /// an append.
    pub fn insert(&mut self, doc_id: DocId, term_freq: u32) {
        let posting = Posting { doc_id, term_freq };

        match self.entries.last() {
            None => self.entries.push(posting),
            Some(last) if last.doc_id < doc_id => self.entries.push(posting),
            Some(_) => match self.entries.binary_search_by_key(&doc_id, |p| p.doc_id) {
                Ok(pos) => self.entries[pos] = posting,
                Err(pos) => self.entries.insert(pos, posting),
            },
        }
    }

    pub fn remove(&mut self, doc_id: DocId) -> bool {
        match self.entries.binary_search_by_key(&doc_id, |p| p.doc_id) {
            Ok(pos) => {
                self.entries.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn doc_freq(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = Posting> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_sorted_and_unique() {
        let mut list = PostingList::new();
        list.insert(DocId(5), 1);
        list.insert(DocId(9), 2);
        list.insert(DocId(2), 1);
        list.insert(DocId(9), 4);

        let ids: Vec<(u64, u32)> = list.iter().map(|p| (p.doc_id.0, p.term_freq)).collect();
        assert_eq!(ids, vec![(2, 1), (5, 1), (9, 4)]);

        assert!(list.remove(DocId(5)));
        assert!(!list.remove(DocId(5)));
        assert_eq!(list.doc_freq(), 2);
    }
}
