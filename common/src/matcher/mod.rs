//! Matching units against the catalog
//!
//! For every unit with a model, every catalog entry is scored
//! (`scorer::score_pair`). All candidates tied at the best score win; a best
//! score below `EXACT_MATCH_SCORE` is reported as a nearest match.

pub mod scorer;

pub use scorer::{score_pair, EXACT_MATCH_SCORE, MANDATORY_MATCHES, MIN_CANDIDATE_SCORE};

use crate::cancel::CancelToken;
use crate::error::Result;
use crate::normalizer::CatalogSnapshot;
use crate::types::{CatalogEntry, InputUnit, MatchCandidate, MatchResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// How catalog disks are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiskPolicy {
    /// Only entries marked "BRAK DYSKU" are eligible (company policy).
    #[default]
    DisklessOnly,
    /// Entries with disks are eligible; storage capacity is compared.
    CompareCapacity,
}

/// One unit with its verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedUnit {
    pub unit: InputUnit,
    pub result: MatchResult,
    /// Best candidate score, if any candidate was found.
    pub best_score: Option<u8>,
}

/// Outcome of matching a whole report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionReport {
    /// Units with a model, in report order.
    pub units: Vec<MatchedUnit>,
    /// Units with at least one candidate.
    pub matched_count: usize,
}

impl SelectionReport {
    /// Header of the result table: the report columns plus the result column.
    pub fn result_headers(report_headers: &[String]) -> Vec<String> {
        let mut headers = report_headers.to_vec();
        headers.push(crate::keywords::RESULT_COLUMN.to_string());
        headers
    }

    /// Result table rows: original cells plus the verdict.
    pub fn result_rows(&self, width: usize) -> Vec<Vec<String>> {
        self.units
            .iter()
            .map(|matched| {
                let mut row = matched.unit.cells.clone();
                row.resize(width, String::new());
                row.push(matched.result.to_string());
                row
            })
            .collect()
    }
}

/// Collects every accepted candidate for one unit.
pub fn collect_candidates(
    unit: &InputUnit,
    entries: &[CatalogEntry],
    disk_policy: DiskPolicy,
) -> Vec<MatchCandidate> {
    entries
        .iter()
        .filter_map(|entry| score_pair(unit, entry, disk_policy))
        .collect()
}

/// Picks the winners among candidates.
///
/// Returns the verdict and the best score.
pub fn select_best(candidates: &[MatchCandidate]) -> (MatchResult, Option<u8>) {
    let Some(best) = candidates.iter().map(|c| c.score).max() else {
        return (MatchResult::NoMatch, None);
    };

    let ids: Vec<String> = candidates
        .iter()
        .filter(|c| c.score == best)
        .map(|c| c.id.clone())
        .collect();

    let result = if best < EXACT_MATCH_SCORE {
        MatchResult::Nearest(ids)
    } else {
        MatchResult::Exact(ids)
    };
    (result, Some(best))
}

/// Matches one unit against the catalog.
pub fn match_unit(unit: &InputUnit, entries: &[CatalogEntry], disk_policy: DiskPolicy) -> MatchedUnit {
    let candidates = collect_candidates(unit, entries, disk_policy);
    let (result, best_score) = select_best(&candidates);

    tracing::debug!(
        lp = %unit.ordinal,
        serial = %unit.serial,
        best = ?best_score,
        winners = result.ids().len(),
        "unit matched"
    );

    MatchedUnit {
        unit: unit.clone(),
        result,
        best_score,
    }
}

/// Matches a whole report.
pub fn select_matches(
    units: &[InputUnit],
    catalog: &CatalogSnapshot,
    disk_policy: DiskPolicy,
) -> SelectionReport {
    // a fresh token is never cancelled
    select_matches_with(units, catalog, disk_policy, &CancelToken::new(), |_, _| {})
        .unwrap_or_default()
}

/// Matches a whole report with cancellation and progress.
///
/// Units are scored in parallel; each only reads the shared catalog.
/// `progress(done, total)` is called after every unit.
pub fn select_matches_with<F>(
    units: &[InputUnit],
    catalog: &CatalogSnapshot,
    disk_policy: DiskPolicy,
    cancel: &CancelToken,
    progress: F,
) -> Result<SelectionReport>
where
    F: Fn(usize, usize) + Sync,
{
    let matchable: Vec<&InputUnit> = units.iter().filter(|u| u.is_matchable()).collect();
    let total = matchable.len();
    let done = AtomicUsize::new(0);

    let matched = matchable
        .par_iter()
        .map(|unit| -> Result<MatchedUnit> {
            cancel.check()?;
            let matched = match_unit(unit, catalog.entries(), disk_policy);
            progress(done.fetch_add(1, Ordering::Relaxed) + 1, total);
            Ok(matched)
        })
        .collect::<Result<Vec<_>>>()?;

    let matched_count = matched.iter().filter(|m| m.result.is_match()).count();
    tracing::info!(found = matched_count, units = total, "matching finished");

    Ok(SelectionReport {
        units: matched,
        matched_count,
    })
}
