//! Memoized loading of transaction tables.
//!
//! [`LoadCache`] keys each entry by file path and a [`FileFingerprint`]
//! (modification time plus length). A lookup whose fingerprint differs from
//! the stored one reloads, so a changed file is never served stale. Failed
//! loads are not cached.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime};

use dashboard_core::error::Result;
use dashboard_core::models::TransactionTable;
use dashboard_data::loader::load_transactions;
use serde::Serialize;

// ── FileFingerprint ───────────────────────────────────────────────────────────

/// Observable state of a file used to detect changes between renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFingerprint {
    /// Last modification time, when the platform reports one.
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl FileFingerprint {
    pub fn of(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

// ── LoadCache ─────────────────────────────────────────────────────────────────

/// Whether a lookup was served from memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Hit,
    Miss,
}

#[derive(Debug)]
struct CacheEntry {
    fingerprint: FileFingerprint,
    table: Arc<TransactionTable>,
    loaded_at: Instant,
}

/// Explicit memoization layer in front of the loader.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use dashboard_runtime::cache::LoadCache;
///
/// let mut cache = LoadCache::new();
/// let (table, status) = cache.get_or_load(Path::new("data/sales-data.csv"))?;
/// println!("{} records ({:?})", table.len(), status);
/// # Ok::<(), dashboard_core::error::DashboardError>(())
/// ```
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: HashMap<PathBuf, CacheEntry>,
    hits: u64,
    misses: u64,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the validated table for `path`, loading it only when no entry
    /// exists or the file changed since it was cached.
    pub fn get_or_load(&mut self, path: &Path) -> Result<(Arc<TransactionTable>, CacheStatus)> {
        self.get_or_load_with(path, load_transactions)
    }

    /// Same as [`Self::get_or_load`] with an explicit loader, so callers can
    /// observe or replace the load step.
    pub fn get_or_load_with(
        &mut self,
        path: &Path,
        loader: impl FnOnce(&Path) -> Result<TransactionTable>,
    ) -> Result<(Arc<TransactionTable>, CacheStatus)> {
        let key = cache_key(path);

        let fingerprint = match FileFingerprint::of(path) {
            Ok(fingerprint) => fingerprint,
            Err(e) => {
                // File is gone or unreadable; drop any stale entry and let the
                // loader report the failure.
                tracing::debug!(path = %path.display(), error = %e, "cannot fingerprint data file");
                self.entries.remove(&key);
                self.misses += 1;
                let table = loader(path)?;
                return Ok((Arc::new(table), CacheStatus::Miss));
            }
        };

        if let Some(entry) = self.entries.get(&key) {
            if entry.fingerprint == fingerprint {
                self.hits += 1;
                tracing::debug!(
                    path = %path.display(),
                    age_ms = entry.loaded_at.elapsed().as_millis() as u64,
                    "returning cached transaction table"
                );
                return Ok((Arc::clone(&entry.table), CacheStatus::Hit));
            }
            tracing::debug!(path = %path.display(), "data file changed; reloading");
        }

        self.misses += 1;
        let table = match loader(path) {
            Ok(table) => Arc::new(table),
            Err(e) => {
                self.entries.remove(&key);
                return Err(e);
            }
        };

        self.entries.insert(
            key,
            CacheEntry {
                fingerprint,
                table: Arc::clone(&table),
                loaded_at: Instant::now(),
            },
        );
        Ok((table, CacheStatus::Miss))
    }

    /// Discard the entry for `path`, forcing the next lookup to load.
    pub fn invalidate(&mut self, path: &Path) {
        if self.entries.remove(&cache_key(path)).is_some() {
            tracing::debug!(path = %path.display(), "cache entry invalidated");
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Canonical form of `path` so `./a.csv` and `a.csv` share one entry.
fn cache_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
