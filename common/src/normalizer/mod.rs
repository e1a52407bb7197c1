//! Catalog cleaning
//!
//! Turns raw catalog rows into typed, repaired entries.
//!
//! ## Flow
//! 1. Drop docking-station rows
//! 2. Extract the ten attributes from each name (`extract`)
//! 3. Repair brand and column-shift errors (`repair`)
//! 4. Drop rows whose processor is the placeholder or empty
//! 5. Normalise ids ("1234.0" -> "1234")

pub mod extract;
pub mod repair;

pub use extract::extract_attributes;
pub use repair::{repair_entries, repair_entry, RepairOutcome};

use crate::keywords::{contains_ci, DOCKING_KEYWORD, PLACEHOLDER};
use crate::types::{CatalogEntry, RawCatalogRow};
use serde::{Deserialize, Serialize};

/// Cleaning diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningStats {
    /// Rows before cleaning.
    pub total_rows: usize,
    /// Rows surviving cleaning.
    pub useful_rows: usize,
    /// Docking accessories removed up front.
    pub docking_rows: usize,
    /// Entries whose product line was moved out of the manufacturer.
    pub brand_fixes: usize,
    /// Entries recovered from a column shift.
    pub shift_fixes: usize,
}

impl CleaningStats {
    pub fn deleted_rows(&self) -> usize {
        self.total_rows - self.useful_rows
    }
}

/// Immutable cleaned catalog, passed explicitly into matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    entries: Vec<CatalogEntry>,
    stats: CleaningStats,
    /// Content hash of the raw source, used to detect source changes.
    fingerprint: String,
}

impl CatalogSnapshot {
    /// Cleans raw rows into a snapshot.
    pub fn build(rows: &[RawCatalogRow], fingerprint: impl Into<String>) -> Self {
        let (entries, stats) = clean_catalog(rows);
        Self {
            entries,
            stats,
            fingerprint: fingerprint.into(),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn stats(&self) -> &CleaningStats {
        &self.stats
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<CatalogEntry>> for CatalogSnapshot {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        let stats = CleaningStats {
            total_rows: entries.len(),
            useful_rows: entries.len(),
            ..Default::default()
        };
        Self {
            entries,
            stats,
            fingerprint: String::new(),
        }
    }
}

/// Cleans raw catalog rows.
///
/// Malformed rows are not errors: they are dropped and show up in
/// `CleaningStats::deleted_rows`.
pub fn clean_catalog(rows: &[RawCatalogRow]) -> (Vec<CatalogEntry>, CleaningStats) {
    let mut stats = CleaningStats {
        total_rows: rows.len(),
        ..Default::default()
    };

    let entries: Vec<CatalogEntry> = rows
        .iter()
        .filter(|row| {
            let docking = contains_ci(&row.name, DOCKING_KEYWORD);
            if docking {
                stats.docking_rows += 1;
            }
            !docking
        })
        .map(|row| CatalogEntry::new(row.id.clone(), extract_attributes(&row.name)))
        .collect();

    let (entries, outcomes) = finalize_entries(entries);
    stats.brand_fixes = outcomes.iter().filter(|o| o.brand_fixed).count();
    stats.shift_fixes = outcomes.iter().filter(|o| o.shift_fixed).count();
    stats.useful_rows = entries.len();

    tracing::info!(
        total = stats.total_rows,
        useful = stats.useful_rows,
        deleted = stats.deleted_rows(),
        "catalog cleaned"
    );

    (entries, stats)
}

/// Repairs, filters and normalises already-extracted entries.
///
/// Idempotent: feeding the output back in returns it unchanged.
pub fn finalize_entries(mut entries: Vec<CatalogEntry>) -> (Vec<CatalogEntry>, Vec<RepairOutcome>) {
    let outcomes = repair_entries(&mut entries);

    let entries = entries
        .into_iter()
        .filter(|e| e.processor != PLACEHOLDER)
        .filter(|e| !e.processor.is_empty())
        .map(|mut e| {
            e.id = normalize_id(&e.id);
            e
        })
        .collect();

    (entries, outcomes)
}

/// Decimal-integer text of an id ("12345.0" -> "12345").
pub fn normalize_id(id: &str) -> String {
    id.trim().split('.').next().unwrap_or_default().to_string()
}
