use fst::{IntoStreamer, Set, SetBuilder, Streamer};
use crate::core::error::Result;

/// FST over every term of a store, for prefix expansion
pub struct PrefixIndex {
    fst: Set<Vec<u8>>,
}

impl PrefixIndex {
    /// Build from terms in any order; duplicates are fine.
    pub fn build<'a, I>(terms: I) -> Result<Self>
    where
        I: Iterator<Item = &'a str>,
    {
        // FST requires sorted, distinct input
        let mut sorted: Vec<&str> = terms.collect();
        sorted.sort_unstable();
        sorted.dedup();

        let mut builder = SetBuilder::memory();
        for term in sorted {
            builder.insert(term.as_bytes())?;
        }

        Ok(PrefixIndex {
            fst: builder.into_set(),
        })
    }

    pub fn len(&self) -> usize {
        self.fst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fst.is_empty()
    }

    /// Find all terms with given prefix. The empty prefix yields every term.
    pub fn search_prefix(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        let prefix_bytes = prefix.as_bytes();

        let mut stream = self.fst.range().ge(prefix_bytes).into_stream();

        while let Some(term_bytes) = stream.next() {
            if !term_bytes.starts_with(prefix_bytes) {
                break;
            }

            if let Ok(term) = std::str::from_utf8(term_bytes) {
                results.push(term.to_string());
            }
        }

        results
    }
}
