use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;
use parking_lot::Mutex;
use crate::core::category::Category;
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::store::IndexStore;

#[derive(Default)]
struct Slot {
    store: Option<Arc<IndexStore>>,
    leases: usize,
}

/// Category -> lazily opened, shared store handle.
///
/// Each category has its own mutex, so concurrent calls never race to open
/// the same store, while different categories never wait on each other.
pub struct StoreRegistry {
    config: Config,
    slots: Mutex<HashMap<Category, Arc<Mutex<Slot>>>>,
}

impl StoreRegistry {
    pub fn new(config: Config) -> Self {
        StoreRegistry {
            config,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn slot(&self, category: Category) -> Arc<Mutex<Slot>> {
        self.slots.lock()
            .entry(category)
            .or_default()
            .clone()
    }

    /// Borrow the category's store, opening it on first use.
    pub fn acquire(&self, category: Category) -> Result<StoreLease> {
        if !category.is_indexed() {
            return Err(Error::new(
                ErrorKind::Unsupported,
                format!("category {} has no index store", category),
            ));
        }

        let slot = self.slot(category);
        let store = {
            let mut guard = slot.lock();
            let store = match &guard.store {
                Some(store) => store.clone(),
                None => {
                    let path = self.config.store_path(category);
                    let store = Arc::new(IndexStore::open(path, &self.config).map_err(|e| {
                        tracing::error!("failed to open {} store: {}", category, e);
                        e
                    })?);
                    guard.store = Some(store.clone());
                    store
                }
            };
            guard.leases += 1;
            store
        };

        Ok(StoreLease {
            category,
            slot,
            store: Some(store),
            keep_open: self.config.keep_open,
        })
    }

    /// Number of stores currently open.
    pub fn open_count(&self) -> usize {
        let slots: Vec<Arc<Mutex<Slot>>> = self.slots.lock().values().cloned().collect();
        slots.iter().filter(|slot| slot.lock().store.is_some()).count()
    }

    /// Close every idle store. A store still leased stays open and is
    /// reported as an error.
    pub fn shutdown(&self) -> Result<()> {
        let slots: Vec<(Category, Arc<Mutex<Slot>>)> = self.slots.lock()
            .iter()
            .map(|(category, slot)| (*category, slot.clone()))
            .collect();

        let mut first_error = None;

        for (category, slot) in slots {
            let mut guard = slot.lock();
            let Some(store) = guard.store.take() else {
                continue;
            };

            match Arc::try_unwrap(store) {
                Ok(store) => {
                    if let Err(e) = store.close() {
                        tracing::error!("failed to close {} store: {}", category, e);
                        first_error.get_or_insert(e);
                    }
                }
                Err(store) => {
                    guard.store = Some(store);
                    tracing::warn!("{} store still has {} active leases", category, guard.leases);
                    first_error.get_or_insert(Error::new(
                        ErrorKind::InvalidArgument,
                        format!("{} store is still in use", category),
                    ));
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for StoreRegistry {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            tracing::warn!("store registry dropped with errors: {}", e);
        }
    }
}

/// Access to one open store for the duration of an operation. Dropping the
/// lease flushes the store; with `keep_open = false` the last lease also
/// closes it.
pub struct StoreLease {
    category: Category,
    slot: Arc<Mutex<Slot>>,
    store: Option<Arc<IndexStore>>,
    keep_open: bool,
}

impl StoreLease {
    pub fn category(&self) -> Category {
        self.category
    }
}

impl Deref for StoreLease {
    type Target = IndexStore;

    fn deref(&self) -> &IndexStore {
        // Only taken in drop.
        self.store.as_deref().unwrap_or_else(|| unreachable!("lease used after release"))
    }
}

impl Drop for StoreLease {
    fn drop(&mut self) {
        let mut guard = self.slot.lock();

        // The lease's own handle goes first, so the last lease out holds the
        // only remaining reference.
        if let Some(store) = self.store.take() {
            if let Err(e) = store.flush() {
                tracing::warn!("failed to flush {} store: {}", self.category, e);
            }
        }

        guard.leases -= 1;
        if guard.leases > 0 || self.keep_open {
            return;
        }

        if let Some(store) = guard.store.take() {
            match Arc::try_unwrap(store) {
                Ok(store) => {
                    if let Err(e) = store.close() {
                        tracing::warn!("failed to close {} store: {}", self.category, e);
                    }
                }
                Err(store) => guard.store = Some(store),
            }
        }
    }
}
