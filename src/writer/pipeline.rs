use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::store::IndexStore;
use crate::entity::Entity;

const PROGRESS_EVERY: usize = 1000;

/// One entity that could not be written during a batch.
#[derive(Debug)]
pub struct IndexFailure {
    pub position: usize,
    pub id: String,
    pub error: Error,
}

/// Result of a best-effort batch: failures never undo successful writes.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub total: usize,
    pub indexed: usize,
    pub failures: Vec<IndexFailure>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Upserts entities into an open store. Batches run on a private pool with
/// a fixed number of workers, so a large batch never spawns more threads.
pub struct IndexingPipeline {
    pool: ThreadPool,
}

impl IndexingPipeline {
    pub fn new(workers: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("medialib-index-{}", i))
            .build()
            .map_err(|e| Error::new(ErrorKind::Internal, format!("failed to start index workers: {}", e)))?;

        Ok(IndexingPipeline { pool })
    }

    pub fn index_one<E: Entity>(&self, store: &IndexStore, entity: &E) -> Result<()> {
        store.upsert(entity.to_document())
    }

    /// Index every entity, logging each failure with the entity id. Returns
    /// once all entities have been attempted.
    pub fn index_batch<E: Entity>(&self, store: &IndexStore, entities: &[E]) -> BatchReport {
        let total = entities.len();
        let progress = AtomicUsize::new(0);

        let mut failures: Vec<IndexFailure> = self.pool.install(|| {
            entities
                .par_iter()
                .enumerate()
                .filter_map(|(position, entity)| {
                    let result = store.upsert(entity.to_document());

                    let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
                    if done % PROGRESS_EVERY == 0 {
                        tracing::debug!("indexing {}: {}/{}", E::CATEGORY, done, total);
                    }

                    match result {
                        Ok(()) => None,
                        Err(error) => {
                            tracing::warn!("failed to index {} {:?}: {}", E::CATEGORY, entity.id(), error);
                            Some(IndexFailure {
                                position,
                                id: entity.id().to_string(),
                                error,
                            })
                        }
                    }
                })
                .collect()
        });

        failures.sort_by_key(|failure| failure.position);

        BatchReport {
            total,
            indexed: total - failures.len(),
            failures,
        }
    }
}
