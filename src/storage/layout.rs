use std::path::{Path, PathBuf};
use std::fs;
use crate::core::error::Result;

/// Files of one category store
#[derive(Debug, Clone)]
pub struct StorageLayout {
    pub base_dir: PathBuf,      // <root>/<category>.idx
    pub snapshot: PathBuf,      // Compacted documents
    pub wal: PathBuf,           // Upserts since the last snapshot
    pub lock: PathBuf,          // flock target
}

impl StorageLayout {
    /// Resolves the file names without touching the disk.
    pub fn at(base_dir: PathBuf) -> Self {
        StorageLayout {
            snapshot: base_dir.join("snapshot.bin"),
            wal: base_dir.join("wal.log"),
            lock: base_dir.join(".lock"),
            base_dir,
        }
    }

    /// Resolves the layout and creates the store directory if needed.
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self::at(base_dir))
    }

    /// Whether a store has ever been written here.
    pub fn exists(&self) -> bool {
        self.snapshot.exists() || self.wal.exists()
    }

    pub fn snapshot_tmp(&self) -> PathBuf {
        self.base_dir.join("snapshot.bin.tmp")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}
