//! Catalog snapshot cache
//!
//! The cleaned catalog is stored next to the dump, keyed by the SHA-256 of the
//! raw catalog table. An unchanged source skips cleaning on the next run.

use crate::error::Result;
use laptop_id_common::{CatalogSnapshot, Table};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

pub const CACHE_FILE_NAME: &str = ".catalog-cache.json";

/// Cache file layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogCache {
    /// Layout version; a mismatch discards the file.
    version: u32,
    /// Last cleaned catalog, carrying its source fingerprint.
    snapshot: Option<CatalogSnapshot>,
}

impl CatalogCache {
    const CURRENT_VERSION: u32 = 1;

    pub fn cache_path(dir: &Path) -> PathBuf {
        dir.join(CACHE_FILE_NAME)
    }

    /// Loads the cache; missing, corrupt or outdated files read as empty.
    pub fn load(dir: &Path) -> Self {
        let path = Self::cache_path(dir);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        match serde_json::from_reader::<_, CatalogCache>(BufReader::new(file)) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(cache) => {
                tracing::warn!(found = cache.version, "catalog cache version mismatch, ignoring it");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt catalog cache, ignoring it");
                Self::default()
            }
        }
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let file = File::create(Self::cache_path(dir))?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Removes the cache file. `Ok(false)` when there was none.
    pub fn clear(dir: &Path) -> Result<bool> {
        let path = Self::cache_path(dir);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path)?;
        Ok(true)
    }

    /// Cached snapshot for a source with this fingerprint.
    pub fn get(&self, fingerprint: &str) -> Option<&CatalogSnapshot> {
        self.snapshot
            .as_ref()
            .filter(|s| s.fingerprint() == fingerprint)
    }

    pub fn snapshot(&self) -> Option<&CatalogSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn insert(&mut self, snapshot: CatalogSnapshot) {
        self.snapshot = Some(snapshot);
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.snapshot.as_ref().map_or(0, CatalogSnapshot::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            snapshot: None,
        }
    }
}

/// SHA-256 (hex) over the headers and cells of a raw table.
pub fn fingerprint_table(table: &Table) -> String {
    let mut hasher = Sha256::new();
    for row in std::iter::once(&table.headers).chain(table.rows.iter()) {
        for cell in row {
            hasher.update(cell.as_bytes());
            hasher.update([0x1f]);
        }
        hasher.update([0x1e]);
    }
    hex::encode(hasher.finalize())
}
