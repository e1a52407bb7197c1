//! Laptop ID Common Library
//!
//! Catalog normalization and matching core, free of I/O:
//! - normalizer: catalog name extraction, repair and cleaning
//! - matcher: per-pair scoring and per-unit winner selection
//! - table: string tables handed over by loaders, typed row parsing

pub mod cancel;
pub mod error;
pub mod export;
pub mod keywords;
pub mod matcher;
pub mod normalizer;
pub mod table;
pub mod types;

pub use cancel::CancelToken;
pub use error::{Error, Result};
pub use matcher::{
    select_matches, select_matches_with, DiskPolicy, MatchedUnit, SelectionReport,
};
pub use normalizer::{clean_catalog, extract_attributes, CatalogSnapshot, CleaningStats};
pub use table::Table;
pub use types::{
    Attributes, CatalogEntry, InputUnit, MatchCandidate, MatchFlags, MatchResult, RawCatalogRow,
};
