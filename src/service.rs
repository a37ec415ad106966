use crate::codec;
use crate::core::category::Category;
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::registry::StoreRegistry;
use crate::entity::{self, Entity};
use crate::search::query::Query;
use crate::search::results::SearchOutcome;
use crate::writer::pipeline::{BatchReport, IndexingPipeline};

/// Encoded result list plus the failure it stands in for, if any.
#[derive(Debug)]
pub struct EncodedSearch {
    pub bytes: Vec<u8>,
    pub error: Option<Error>,
}

/// Index and search operations for every entity category.
///
/// Stateless per call: each operation leases its category's store from the
/// registry and returns it before completing.
pub struct SearchService {
    registry: StoreRegistry,
    pipeline: IndexingPipeline,
}

impl SearchService {
    pub fn new(config: Config) -> Result<Self> {
        let pipeline = IndexingPipeline::new(config.batch_workers)?;

        Ok(SearchService {
            registry: StoreRegistry::new(config),
            pipeline,
        })
    }

    pub fn config(&self) -> &Config {
        self.registry.config()
    }

    pub fn registry(&self) -> &StoreRegistry {
        &self.registry
    }

    /// Decode one entity and upsert it. A payload that does not decode is
    /// logged and nothing is written.
    pub fn index<E: Entity>(&self, payload: &[u8]) -> Result<()> {
        let entity = codec::decode::<E>(payload).map_err(|e| {
            tracing::warn!("dropping {} payload of {} bytes: {}", E::CATEGORY, payload.len(), e);
            e
        })?;

        self.index_entity(&entity)
    }

    pub fn index_entity<E: Entity>(&self, entity: &E) -> Result<()> {
        let store = self.registry.acquire(E::CATEGORY)?;
        self.pipeline.index_one(&store, entity).map_err(|e| {
            tracing::warn!("failed to index {} {:?}: {}", E::CATEGORY, entity.id(), e);
            e
        })
    }

    /// Decode a list payload and index every entry, best effort.
    pub fn index_batch<E: Entity>(&self, payload: &[u8]) -> Result<BatchReport> {
        let entities = codec::decode_list::<E>(payload).map_err(|e| {
            tracing::warn!("dropping {} list payload of {} bytes: {}", E::CATEGORY, payload.len(), e);
            e
        })?;

        self.index_entities(&entities)
    }

    pub fn index_entities<E: Entity>(&self, entities: &[E]) -> Result<BatchReport> {
        let store = self.registry.acquire(E::CATEGORY)?;
        let report = self.pipeline.index_batch(&store, entities);

        tracing::debug!(
            "indexed {}/{} {} ({} failed)",
            report.indexed, report.total, E::CATEGORY, report.failures.len()
        );

        Ok(report)
    }

    /// Prefix query for a single word, match query when the term holds any
    /// whitespace. Hits come back in relevance order.
    pub fn search<E: Entity>(&self, term: &str) -> SearchOutcome<E> {
        self.search_inner(term).into()
    }

    fn search_inner<E: Entity>(&self, term: &str) -> Result<Vec<E>> {
        let store = self.registry.acquire(E::CATEGORY)?;
        let query = Query::from_term(term);

        let hits = store.search(&query, self.config().max_hits).map_err(|e| {
            tracing::error!("{} search for {:?} failed: {}", E::CATEGORY, term, e);
            e
        })?;

        tracing::debug!("{} {:?} query {:?}: {} hits", E::CATEGORY, query.mode(), term, hits.len());

        Ok(hits.iter()
            .map(|hit| entity::decode_hit::<E>(hit).entity)
            .collect())
    }

    /// `search` encoded as the entity's list message. A failed search still
    /// yields a valid, empty list.
    pub fn search_encoded<E: Entity>(&self, term: &str) -> EncodedSearch {
        match self.search::<E>(term) {
            SearchOutcome::Matches(items) => EncodedSearch {
                bytes: codec::encode_list(items),
                error: None,
            },
            SearchOutcome::Failed(error) => EncodedSearch {
                bytes: codec::encode_list::<E>(Vec::new()),
                error: Some(error),
            },
        }
    }

    /// Playlists have no document shape yet.
    pub fn index_playlist(&self) -> Result<()> {
        Err(Error::new(
            ErrorKind::Unsupported,
            format!("{} are not indexed", Category::Playlists),
        ))
    }

    /// Close every open store.
    pub fn shutdown(&self) -> Result<()> {
        self.registry.shutdown()
    }
}
