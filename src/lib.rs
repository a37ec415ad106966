pub mod core;
pub mod storage;
pub mod analysis;
pub mod index;
pub mod search;
pub mod entity;
pub mod codec;
pub mod writer;
pub mod service;
pub mod ffi;

pub use crate::core::category::Category;
pub use crate::core::config::Config;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::search::results::SearchOutcome;
pub use crate::service::SearchService;
pub use crate::writer::pipeline::BatchReport;

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                         MEDIALIB SEARCH ARCHITECTURE                          │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── BOUNDARY ────────────────────────────────────┐
│  ffi::index_<entity>(ptr, len)      ffi::search_<entity>(term)               │
│  ffi::index_<entities>(ptr, len)    ffi::search_buffer_free(SearchBuffer)    │
│  status codes, catch_unwind, process-wide SearchService                      │
└──────────────────────────────────────┬───────────────────────────────────────┘
                                       │
┌──────────────────────────────── SERVICE ─────────────────────────────────────┐
│  struct SearchService                                                        │
│  • registry: StoreRegistry     // category -> lazily opened IndexStore       │
│  • pipeline: IndexingPipeline  // bounded rayon pool for batches             │
│                                                                              │
│  codec: prost list/entity messages      entity: Entity <-> Document          │
└──────────────────────────────────────┬───────────────────────────────────────┘
                                       │
┌──────────────────────────────── STORE ───────────────────────────────────────┐
│  struct IndexStore (one per category)                                        │
│  • state: RwLock<StoreState>                                                 │
│      index: InvertedIndex     // postings, keywords, FST prefix index        │
│      documents / keys         // stored fields, replace-by-key               │
│      wal: WAL                 // append log, replayed on open                │
│  • _lock: FileLock            // one process per store directory             │
│                                                                              │
│  search: Query::Prefix | Query::Match -> QueryExecutor -> TopKCollector      │
└──────────────────────────────────────┬───────────────────────────────────────┘
                                       │
┌──────────────────────────────── DISK ────────────────────────────────────────┐
│  <root>/<category>.idx/                                                      │
│      snapshot.bin   // lz4 + crc32, bincode documents                        │
│      wal.log        // len + crc32 + bincode entry, torn tail truncated      │
│      .lock          // flock                                                 │
└──────────────────────────────────────────────────────────────────────────────┘
*/
