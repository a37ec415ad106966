use std::fs::{File, OpenOptions};
use std::io::{Write, Read, Seek, SeekFrom, ErrorKind as IoErrorKind};
use chrono::{DateTime, Utc};
use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use crate::core::types::Document;
use crate::storage::layout::StorageLayout;
use crate::core::error::{Result, Error, ErrorKind};

const MAX_ENTRY_LEN: usize = 64 * 1024 * 1024;
const ENTRY_HEADER_LEN: u64 = 8;

/// Write-ahead log of upserts since the last snapshot
pub struct WAL {
    pub file: File,
    pub position: u64,
    pub sync_mode: SyncMode,
    pub sequence: u64,
    pub entries: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Immediate,  // fsync after every write
    Batch,      // fsync when the store is flushed
    None,       // Let OS handle it
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WALEntry {
    pub sequence: u64,
    pub operation: Operation,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Operation {
    Upsert(Document),
}

impl WAL {
    pub fn open(storage: &StorageLayout, sync_mode: SyncMode) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&storage.wal)?;

        Ok(WAL {
            file,
            position: 0,
            sync_mode,
            sequence: 0,
            entries: 0,
        })
    }

    // [ len: u32 | crc32: u32 | bincode(WALEntry) ]
    pub fn append(&mut self, operation: Operation) -> Result<()> {
        let entry = WALEntry {
            sequence: self.sequence,
            operation,
            timestamp: Utc::now(),
        };

        let data = bincode::serialize(&entry)?;
        if data.len() > MAX_ENTRY_LEN {
            return Err(Error::new(
                ErrorKind::IndexWrite,
                format!("WAL entry of {} bytes exceeds the {} byte limit", data.len(), MAX_ENTRY_LEN),
            ));
        }

        let mut hasher = Hasher::new();
        hasher.update(&data);

        let mut frame = Vec::with_capacity(data.len() + ENTRY_HEADER_LEN as usize);
        frame.extend_from_slice(&(data.len() as u32).to_le_bytes());
        frame.extend_from_slice(&hasher.finalize().to_le_bytes());
        frame.extend_from_slice(&data);
        if let Err(e) = self.file.write_all(&frame) {
            // A partial frame would hide every later entry from replay.
            if let Err(cut) = self.file.set_len(self.position) {
                tracing::error!("failed to cut torn WAL frame at {}: {}", self.position, cut);
            }
            return Err(e.into());
        }

        self.sequence += 1;
        self.entries += 1;
        self.position += frame.len() as u64;

        if self.sync_mode == SyncMode::Immediate {
            self.file.sync_data()?;
        }

        Ok(())
    }

    pub fn sync(&mut self) -> Result<()> {
        if self.sync_mode != SyncMode::None {
            self.file.sync_data()?;
        }
        Ok(())
    }

    /// Drops every entry; called once a snapshot holds them.
    pub fn reset(&mut self) -> Result<()> {
        self.file.set_len(0)?;
        self.file.sync_all()?;
        self.position = 0;
        self.entries = 0;
        Ok(())
    }

    /// Read all entries for recovery. A torn or corrupt tail (crash during an
    /// append) is cut off so later appends start from the last good entry.
    pub fn read_entries(&mut self) -> Result<Vec<WALEntry>> {
        let mut entries = Vec::new();
        let mut good_position = 0u64;

        self.file.seek(SeekFrom::Start(0))?;

        loop {
            let mut header = [0u8; ENTRY_HEADER_LEN as usize];
            match self.file.read_exact(&mut header) {
                Ok(_) => {},
                Err(e) if e.kind() == IoErrorKind::UnexpectedEof => break,
                Err(e) => return Err(Error::new(ErrorKind::Io, format!("Failed to read WAL: {}", e))),
            }

            let len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
            let checksum = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

            if len > MAX_ENTRY_LEN {
                tracing::warn!("WAL entry at {} claims {} bytes, truncating log", good_position, len);
                break;
            }

            let mut data = vec![0u8; len];
            if let Err(e) = self.file.read_exact(&mut data) {
                if e.kind() == IoErrorKind::UnexpectedEof {
                    tracing::warn!("WAL ends with a partial entry at {}, truncating log", good_position);
                    break;
                }
                return Err(e.into());
            }

            let mut hasher = Hasher::new();
            hasher.update(&data);
            if hasher.finalize() != checksum {
                tracing::warn!("WAL checksum mismatch at {}, truncating log", good_position);
                break;
            }

            let entry: WALEntry = bincode::deserialize(&data)?;
            good_position += ENTRY_HEADER_LEN + len as u64;
            entries.push(entry);
        }

        let end = self.file.seek(SeekFrom::End(0))?;
        if end != good_position {
            self.file.set_len(good_position)?;
        }

        self.position = good_position;
        self.entries = entries.len();
        self.sequence = entries.last().map(|e| e.sequence + 1).unwrap_or(0);

        Ok(entries)
    }
}
