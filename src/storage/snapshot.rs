use std::fs::{self, File};
use std::io::Write;
use chrono::{DateTime, Utc};
use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::Document;
use crate::storage::layout::StorageLayout;

/// Snapshot file header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub version: u32,     // Format version
    pub doc_count: u64,
    pub checksum: u32,    // CRC32 of the compressed body
    pub created_at: DateTime<Utc>,
}

impl SnapshotHeader {
    pub const VERSION: u32 = 1;
}

// [ header_len: u32 ][ HEADER ][ lz4(bincode(Vec<Document>)) ]
pub struct Snapshot;

impl Snapshot {
    /// Load the compacted documents, or nothing for a fresh store.
    pub fn load(storage: &StorageLayout) -> Result<Option<Vec<Document>>> {
        if !storage.snapshot.exists() {
            return Ok(None);
        }

        let data = fs::read(&storage.snapshot)?;
        if data.len() < 4 {
            return Err(Error::new(ErrorKind::StoreOpen, "snapshot is truncated"));
        }

        let header_len = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
        let body_start = 4 + header_len;
        if data.len() < body_start {
            return Err(Error::new(ErrorKind::StoreOpen, "snapshot header is truncated"));
        }

        let header: SnapshotHeader = bincode::deserialize(&data[4..body_start])?;
        if header.version != SnapshotHeader::VERSION {
            return Err(Error::new(
                ErrorKind::StoreOpen,
                format!("unsupported snapshot format version {}", header.version),
            ));
        }

        let body = &data[body_start..];
        let mut hasher = Hasher::new();
        hasher.update(body);
        if hasher.finalize() != header.checksum {
            return Err(Error::new(ErrorKind::StoreOpen, "snapshot checksum mismatch"));
        }

        let raw = lz4_flex::decompress_size_prepended(body)
            .map_err(|e| Error::new(ErrorKind::StoreOpen, format!("snapshot decompression failed: {}", e)))?;
        let documents: Vec<Document> = bincode::deserialize(&raw)?;

        if documents.len() as u64 != header.doc_count {
            return Err(Error::new(
                ErrorKind::StoreOpen,
                format!("snapshot holds {} documents, header says {}", documents.len(), header.doc_count),
            ));
        }

        Ok(Some(documents))
    }

    /// Write through a temp file and rename, so a crash leaves either the old
    /// or the new snapshot.
    pub fn save<'a, I>(storage: &StorageLayout, documents: I) -> Result<u64>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let documents: Vec<&Document> = documents.into_iter().collect();
        let raw = bincode::serialize(&documents)?;
        let body = lz4_flex::compress_prepend_size(&raw);

        let mut hasher = Hasher::new();
        hasher.update(&body);

        let header = SnapshotHeader {
            version: SnapshotHeader::VERSION,
            doc_count: documents.len() as u64,
            checksum: hasher.finalize(),
            created_at: Utc::now(),
        };
        let header_data = bincode::serialize(&header)?;

        let tmp = storage.snapshot_tmp();
        {
            let mut file = File::create(&tmp)?;
            file.write_all(&(header_data.len() as u32).to_le_bytes())?;
            file.write_all(&header_data)?;
            file.write_all(&body)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &storage.snapshot)?;

        Ok(header.doc_count)
    }
}
