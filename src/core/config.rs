use std::env;
use std::path::{Path, PathBuf};
use crate::core::category::Category;
use crate::storage::wal::SyncMode;

pub const ROOT_ENV: &str = "MEDIALIB_SEARCH_ROOT";
pub const WORKERS_ENV: &str = "MEDIALIB_SEARCH_WORKERS";
pub const MAX_HITS_ENV: &str = "MEDIALIB_SEARCH_MAX_HITS";
pub const KEEP_OPEN_ENV: &str = "MEDIALIB_SEARCH_KEEP_OPEN";

const MAX_DEFAULT_WORKERS: usize = 8;

#[derive(Debug, Clone)]
pub struct Config {
    pub root_dir: PathBuf,

    pub batch_workers: usize,           // Worker pool cap for batch indexing
    pub max_hits: usize,                // Page size of every search
    pub keep_open: bool,                // Cache stores between calls
    pub wal_sync: SyncMode,
    pub compact_after: usize,           // WAL entries before a snapshot is rewritten
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root_dir: default_root(),
            batch_workers: num_cpus::get().clamp(1, MAX_DEFAULT_WORKERS),
            max_hits: 10,
            keep_open: true,
            wal_sync: SyncMode::Batch,
            compact_after: 10_000,
        }
    }
}

impl Config {
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Config {
            root_dir: root_dir.into(),
            ..Config::default()
        }
    }

    /// Defaults overridden by `MEDIALIB_SEARCH_*` variables. Unparseable
    /// values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(root) = env::var(ROOT_ENV) {
            if !root.is_empty() {
                config.root_dir = PathBuf::from(root);
            }
        }
        if let Some(workers) = parse_env::<usize>(WORKERS_ENV) {
            config.batch_workers = workers.max(1);
        }
        if let Some(max_hits) = parse_env::<usize>(MAX_HITS_ENV) {
            config.max_hits = max_hits;
        }
        if let Some(keep_open) = parse_env::<bool>(KEEP_OPEN_ENV) {
            config.keep_open = keep_open;
        }

        config
    }

    /// `<root>/<category>.idx`
    pub fn store_path(&self, category: Category) -> PathBuf {
        store_path(&self.root_dir, category)
    }
}

pub fn store_path(root: &Path, category: Category) -> PathBuf {
    root.join(format!("{}.idx", category.name()))
}

fn default_root() -> PathBuf {
    let home = env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    home.join(".config").join("rockbox.org")
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}
