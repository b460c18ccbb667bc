//! Process-wide memo of loaded sales tables
//!
//! An entry is reused only while the file's modification time is unchanged.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

use rustc_hash::FxHashMap;

use crate::config::DashboardConfig;
use crate::error::Result;
use crate::error::util::modified_time;
use crate::loader::load_sales_csv;
use crate::models::SalesTable;

#[derive(Debug)]
struct CachedTable {
    modified: SystemTime,
    table: Arc<SalesTable>,
}

/// Loaded tables keyed by path
#[derive(Debug)]
pub struct DatasetCache {
    config: DashboardConfig,
    entries: Mutex<FxHashMap<PathBuf, CachedTable>>,
}

impl DatasetCache {
    /// Create an empty cache that loads files with `config`
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(FxHashMap::default()),
        }
    }

    // Entries are immutable Arcs, so a poisoned map is still consistent
    fn entries(&self) -> MutexGuard<'_, FxHashMap<PathBuf, CachedTable>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the table for `path`, loading it when absent or modified
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<SalesTable>> {
        let modified = modified_time(path)?;

        if let Some(entry) = self.entries().get(path) {
            if entry.modified == modified {
                log::debug!("Using cached table for {}", path.display());
                return Ok(Arc::clone(&entry.table));
            }
            log::info!("{} changed on disk, reloading", path.display());
        }

        let table = Arc::new(load_sales_csv(path, &self.config)?);
        self.entries().insert(
            path.to_path_buf(),
            CachedTable {
                modified,
                table: Arc::clone(&table),
            },
        );
        Ok(table)
    }

    /// Drop the entry for `path`; returns whether one was present
    pub fn invalidate(&self, path: &Path) -> bool {
        self.entries().remove(path).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}
