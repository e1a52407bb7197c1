//! laptop-id: assigns catalog IDs to the laptops of an inventory report.
//!
//! The matching core lives in `laptop-id-common`; this crate adds sources,
//! result writing, the catalog cache, configuration and the job runner.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod source;

pub use error::{IdMatchError, Result};
pub use pipeline::{run_job, MatchJob, Progress, RunSummary};
pub use source::CatalogSource;
