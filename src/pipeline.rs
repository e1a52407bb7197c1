//! Match job runner
//!
//! One run is one async task that owns everything it touches.
//!
//! ## Flow
//! 1. Load the catalog (local file or remote download)
//! 2. Load the input report and parse both tables
//! 3. Clean the catalog and write its dump, or reuse the cached snapshot of
//!    an unchanged source
//! 4. Score every unit on the blocking pool (rayon inside)
//! 5. Write the result workbook
//!
//! The cancel token is checked between stages and before each unit. A
//! cancelled run writes no result file. Any failure, the dump included,
//! ends the run with that error.

use crate::cache::{fingerprint_table, CatalogCache};
use crate::error::Result;
use crate::export::{write_catalog_dump, write_results};
use crate::source::{load_input, CatalogSource};
use laptop_id_common::{
    select_matches_with, CancelToken, CatalogSnapshot, CleaningStats, DiskPolicy, InputUnit,
    RawCatalogRow,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Stage and scoring events reported while a job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    LoadingCatalog,
    LoadingInput,
    Cleaning,
    /// Cleaning skipped: the cached snapshot matches the source.
    CatalogCached { entries: usize },
    Matching { total: usize },
    Scored { done: usize, total: usize },
    Writing,
}

pub type ProgressFn = Arc<dyn Fn(Progress) + Send + Sync>;

/// One unit of work
#[derive(Debug, Clone)]
pub struct MatchJob {
    pub catalog: CatalogSource,
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub policy: DiskPolicy,
    /// Clean the catalog even when the cache is current.
    pub refresh_catalog: bool,
    /// Write the cleaned catalog CSV after a reload.
    pub dump_catalog: bool,
    /// Bearer token file for remote catalogs.
    pub credentials: Option<PathBuf>,
    /// Holds the snapshot cache and the catalog dump.
    pub work_dir: PathBuf,
}

impl MatchJob {
    pub fn new(catalog: CatalogSource, input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            input: input.into(),
            output_dir: output_dir.into(),
            policy: DiskPolicy::default(),
            refresh_catalog: false,
            dump_catalog: true,
            credentials: None,
            work_dir: PathBuf::from("."),
        }
    }
}

/// What a finished run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Units with at least one candidate.
    pub matched_units: usize,
    /// Units with a model.
    pub total_units: usize,
    pub cleaning: CleaningStats,
    pub output_path: PathBuf,
    /// False when the cached snapshot was reused.
    pub catalog_reloaded: bool,
    pub dump_path: Option<PathBuf>,
}

fn emit(progress: &Option<ProgressFn>, event: Progress) {
    if let Some(progress) = progress {
        progress(event);
    }
}

/// Runs a whole job.
///
/// # Arguments
/// * `job` - sources, destinations and matching options
/// * `cancel` - checked between stages and before each unit
/// * `progress` - optional event sink
pub async fn run_job(
    job: MatchJob,
    cancel: CancelToken,
    progress: Option<ProgressFn>,
) -> Result<RunSummary> {
    tracing::info!(catalog = %job.catalog, input = %job.input.display(), policy = ?job.policy, "run started");

    cancel.check()?;
    emit(&progress, Progress::LoadingCatalog);
    let catalog_table = job.catalog.load(job.credentials.as_deref()).await?;
    let catalog_rows = RawCatalogRow::from_table(&catalog_table)?;

    cancel.check()?;
    emit(&progress, Progress::LoadingInput);
    let input_path = job.input.clone();
    let input_table = tokio::task::spawn_blocking(move || load_input(&input_path)).await??;
    let units = InputUnit::from_table(&input_table)?;

    cancel.check()?;
    let fingerprint = fingerprint_table(&catalog_table);
    let ResolvedCatalog {
        snapshot,
        reloaded: catalog_reloaded,
        dump_path,
    } = resolve_snapshot(&job, catalog_rows, fingerprint, &cancel, &progress).await?;

    cancel.check()?;
    let total = units.iter().filter(|u| u.is_matchable()).count();
    emit(&progress, Progress::Matching { total });
    let report = {
        let snapshot = Arc::clone(&snapshot);
        let cancel = cancel.clone();
        let progress = progress.clone();
        let policy = job.policy;
        tokio::task::spawn_blocking(move || {
            select_matches_with(&units, &snapshot, policy, &cancel, |done, total| {
                emit(&progress, Progress::Scored { done, total })
            })
        })
        .await??
    };

    cancel.check()?;
    emit(&progress, Progress::Writing);
    let output_path = write_results(&report, &input_table.headers, &job.input, &job.output_dir)?;

    let summary = RunSummary {
        matched_units: report.matched_count,
        total_units: report.units.len(),
        cleaning: *snapshot.stats(),
        output_path,
        catalog_reloaded,
        dump_path,
    };
    tracing::info!(
        found = summary.matched_units,
        units = summary.total_units,
        output = %summary.output_path.display(),
        "run finished"
    );
    Ok(summary)
}

struct ResolvedCatalog {
    snapshot: Arc<CatalogSnapshot>,
    reloaded: bool,
    dump_path: Option<PathBuf>,
}

/// Cached snapshot when the source is unchanged, otherwise a fresh clean.
///
/// A fresh clean writes the dump before the cache, so a failed dump is
/// retried on the next run.
async fn resolve_snapshot(
    job: &MatchJob,
    rows: Vec<RawCatalogRow>,
    fingerprint: String,
    cancel: &CancelToken,
    progress: &Option<ProgressFn>,
) -> Result<ResolvedCatalog> {
    let work_dir = job.work_dir.clone();
    let mut cache = tokio::task::spawn_blocking(move || CatalogCache::load(&work_dir)).await?;

    if !job.refresh_catalog {
        if let Some(snapshot) = cache.get(&fingerprint) {
            tracing::info!(entries = snapshot.len(), "catalog unchanged, reusing cleaned snapshot");
            emit(progress, Progress::CatalogCached { entries: snapshot.len() });
            return Ok(ResolvedCatalog {
                snapshot: Arc::new(snapshot.clone()),
                reloaded: false,
                dump_path: None,
            });
        }
    }

    emit(progress, Progress::Cleaning);
    let snapshot =
        tokio::task::spawn_blocking(move || CatalogSnapshot::build(&rows, fingerprint)).await?;

    cancel.check()?;
    let dump_path = if job.dump_catalog {
        Some(write_catalog_dump(
            snapshot.entries(),
            &job.work_dir,
            job.catalog.dump_file_name(),
        )?)
    } else {
        None
    };

    cache.insert(snapshot.clone());
    if let Err(e) = cache.save(&job.work_dir) {
        tracing::warn!(error = %e, "catalog cache not saved");
    }
    Ok(ResolvedCatalog {
        snapshot: Arc::new(snapshot),
        reloaded: true,
        dump_path,
    })
}

/// Cleans a catalog and writes its dump, without matching.
///
/// `dump_path` overrides the default dump location.
pub async fn run_clean(
    catalog: &CatalogSource,
    credentials: Option<&Path>,
    work_dir: &Path,
    dump_path: Option<&Path>,
) -> Result<(CleaningStats, PathBuf)> {
    let table = catalog.load(credentials).await?;
    let rows = RawCatalogRow::from_table(&table)?;
    let fingerprint = fingerprint_table(&table);
    let snapshot =
        tokio::task::spawn_blocking(move || CatalogSnapshot::build(&rows, fingerprint)).await?;

    let (dir, file_name) = match dump_path {
        Some(path) => (
            path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
            path.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(catalog.dump_file_name())
                .to_string(),
        ),
        None => (work_dir.to_path_buf(), catalog.dump_file_name().to_string()),
    };
    let written = write_catalog_dump(snapshot.entries(), &dir, &file_name)?;
    Ok((*snapshot.stats(), written))
}
