use std::collections::HashMap;
use std::path::PathBuf;
use parking_lot::{RwLock, RwLockUpgradableReadGuard, RwLockWriteGuard};
use rayon::prelude::*;
use crate::analysis::analyzer::Analyzer;
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, Document};
use crate::index::inverted::{IndexedDoc, InvertedIndex};
use crate::search::executor::QueryExecutor;
use crate::search::query::Query;
use crate::search::results::Hit;
use crate::storage::file_lock::FileLock;
use crate::storage::layout::StorageLayout;
use crate::storage::snapshot::Snapshot;
use crate::storage::wal::{Operation, SyncMode, WAL};

/// One inverted-index store: documents keyed by entity id, every text field
/// searchable, every field stored.
///
/// Holds an exclusive file lock for its whole lifetime. Writers are
/// serialized internally, so one handle may be shared by many threads.
pub struct IndexStore {
    layout: StorageLayout,
    analyzer: Analyzer,
    compact_after: usize,
    state: RwLock<StoreState>,
    _lock: FileLock,
}

struct StoreState {
    index: InvertedIndex,
    documents: HashMap<DocId, Document>,
    keys: HashMap<String, DocId>,
    next_doc_id: u64,
    wal: WAL,
}

impl StoreState {
    /// Replace-by-key: the previous document for the key, if any, is removed
    /// from the index before the new one is added.
    fn apply(&mut self, doc: Document, indexed: &IndexedDoc) {
        if let Some(old) = self.keys.remove(&doc.key) {
            self.index.remove_document(old);
            self.documents.remove(&old);
        }

        let doc_id = DocId(self.next_doc_id);
        self.next_doc_id += 1;

        self.index.add_document(doc_id, indexed);
        self.keys.insert(doc.key.clone(), doc_id);
        self.documents.insert(doc_id, doc);
    }
}

impl IndexStore {
    /// Open the store at `path`, creating it if nothing is there yet. Every
    /// failure, including a lock held elsewhere, is a `StoreOpen` error.
    pub fn open(path: PathBuf, config: &Config) -> Result<Self> {
        Self::open_inner(path, config.wal_sync, config.compact_after)
            .map_err(|e| e.with_kind(ErrorKind::StoreOpen))
    }

    fn open_inner(path: PathBuf, sync_mode: SyncMode, compact_after: usize) -> Result<Self> {
        let layout = StorageLayout::new(path)?;
        let created = !layout.exists();
        let lock = FileLock::acquire(&layout)?;
        let analyzer = Analyzer::standard();

        let mut state = StoreState {
            index: InvertedIndex::new(),
            documents: HashMap::new(),
            keys: HashMap::new(),
            next_doc_id: 0,
            wal: WAL::open(&layout, sync_mode)?,
        };

        let mut documents = Snapshot::load(&layout)?.unwrap_or_default();
        let replayed = state.wal.read_entries()?;
        let replay_count = replayed.len();
        documents.extend(replayed.into_iter().map(|entry| match entry.operation {
            Operation::Upsert(doc) => doc,
        }));

        let indexed: Vec<IndexedDoc> = documents
            .par_iter()
            .map(|doc| IndexedDoc::analyze(doc, &analyzer))
            .collect();

        for (doc, indexed) in documents.into_iter().zip(indexed.iter()) {
            state.apply(doc, indexed);
        }

        if created {
            tracing::debug!("created store at {}", layout.base_dir.display());
        } else {
            tracing::debug!(
                "opened store at {} ({} documents, {} replayed from WAL)",
                layout.base_dir.display(),
                state.documents.len(),
                replay_count
            );
        }

        Ok(IndexStore {
            layout,
            analyzer,
            compact_after,
            state: RwLock::new(state),
            _lock: lock,
        })
    }

    pub fn path(&self) -> &std::path::Path {
        self.layout.base_dir()
    }

    pub fn len(&self) -> usize {
        self.state.read().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &str) -> Option<Document> {
        let state = self.state.read();
        state.keys.get(key)
            .and_then(|doc_id| state.documents.get(doc_id))
            .cloned()
    }

    /// Insert or fully replace the document with `doc.key`. Analysis runs
    /// before the write lock is taken.
    pub fn upsert(&self, doc: Document) -> Result<()> {
        if doc.key.is_empty() {
            return Err(Error::new(ErrorKind::IndexWrite, "document id must not be empty"));
        }

        let indexed = IndexedDoc::analyze(&doc, &self.analyzer);

        let mut state = self.state.write();
        state.wal.append(Operation::Upsert(doc.clone()))
            .map_err(|e| e.with_kind(ErrorKind::IndexWrite))?;
        state.apply(doc, &indexed);

        if state.wal.entries >= self.compact_after {
            if let Err(e) = self.compact_locked(&mut state) {
                // Entries stay in the WAL; the next compaction retries.
                tracing::warn!("compaction of {} failed: {}", self.layout.base_dir.display(), e);
            }
        }

        Ok(())
    }

    pub fn search(&self, query: &Query, limit: usize) -> Result<Vec<Hit>> {
        self.search_inner(query, limit)
            .map_err(|e| e.with_kind(ErrorKind::SearchExecution))
    }

    fn search_inner(&self, query: &Query, limit: usize) -> Result<Vec<Hit>> {
        let prefix = matches!(query, Query::Prefix(_));

        {
            let state = self.state.read();
            if !prefix || !state.index.needs_prefix_index() {
                return QueryExecutor::new(&state.index, &state.documents, &self.analyzer)
                    .execute(query, limit);
            }
        }

        // Only one upgradable reader at a time; taken just for the rebuild.
        let guard = self.state.upgradable_read();
        let state = if guard.index.needs_prefix_index() {
            let mut write = RwLockUpgradableReadGuard::upgrade(guard);
            write.index.build_prefix_index()?;
            RwLockWriteGuard::downgrade(write)
        } else {
            RwLockUpgradableReadGuard::downgrade(guard)
        };

        QueryExecutor::new(&state.index, &state.documents, &self.analyzer)
            .execute(query, limit)
    }

    /// Make pending writes durable.
    pub fn flush(&self) -> Result<()> {
        self.state.write().wal.sync()
    }

    /// Fold the WAL into a fresh snapshot.
    pub fn compact(&self) -> Result<()> {
        let mut state = self.state.write();
        self.compact_locked(&mut state)
    }

    fn compact_locked(&self, state: &mut StoreState) -> Result<()> {
        if state.wal.entries == 0 && self.layout.snapshot.exists() {
            return Ok(());
        }

        let count = Snapshot::save(&self.layout, state.documents.values())?;
        state.wal.reset()?;
        tracing::debug!("compacted {} ({} documents)", self.layout.base_dir.display(), count);
        Ok(())
    }

    /// Compact and release the lock. The lock is released even when
    /// compaction fails; the WAL still holds every write.
    pub fn close(self) -> Result<()> {
        let result = self.compact();
        tracing::debug!("closed store at {}", self.layout.base_dir.display());
        result
    }
}
