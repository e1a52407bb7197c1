//! Data model
//!
//! - Attributes: the ten fields parsed out of a catalog name
//! - CatalogEntry: one cleaned catalog row ("ID")
//! - InputUnit: one laptop of the report to identify
//! - MatchCandidate / MatchResult: scoring output

use crate::keywords::{ID_SEPARATOR, NEAREST_PREFIX, NO_MATCH_MARKER};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attributes extracted from one catalog name.
///
/// The all-empty value is the soft-failure sentinel of extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub manufacturer: String,
    pub model: String,
    pub processor: String,
    pub ram: String,
    pub hdd: String,
    pub graphics: String,
    pub resolution: String,
    pub touchscreen: String,
    pub windows_edition: String,
    pub device_class: String,
}

impl Attributes {
    /// True for the extraction failure sentinel.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Cleaned catalog row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Kept as text: numeric ids would lose precision as floats.
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Processor")]
    pub processor: String,
    #[serde(rename = "RAM")]
    pub ram: String,
    #[serde(rename = "HDD")]
    pub hdd: String,
    #[serde(rename = "Graphics")]
    pub graphics: String,
    #[serde(rename = "Resolution")]
    pub resolution: String,
    #[serde(rename = "Touchscreen")]
    pub touchscreen: String,
    #[serde(rename = "Windows")]
    pub windows_edition: String,
    #[serde(rename = "Class")]
    pub device_class: String,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            manufacturer: attributes.manufacturer,
            model: attributes.model,
            processor: attributes.processor,
            ram: attributes.ram,
            hdd: attributes.hdd,
            graphics: attributes.graphics,
            resolution: attributes.resolution,
            touchscreen: attributes.touchscreen,
            windows_edition: attributes.windows_edition,
            device_class: attributes.device_class,
        }
    }
}

/// Raw catalog source row, before cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCatalogRow {
    pub id: String,
    /// Free-text specification (`Pełna nazwa` / `Nazwa`).
    pub name: String,
}

/// One laptop of the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputUnit {
    /// `Lp.` (ordinal in the report)
    pub ordinal: String,
    pub serial: String,
    pub manufacturer: String,
    pub model: String,
    pub processor: String,
    /// `Docelowa`: RAM and storage as digit groups, e.g. "8 GB / 256 GB".
    pub target_spec: String,
    pub graphics: String,
    /// `Wyświetlacz`: resolution and touch capability.
    pub display: String,
    pub windows_edition: String,
    pub device_class: String,
    /// All cells of the source row, in source column order.
    pub cells: Vec<String>,
}

impl InputUnit {
    /// Units without a model are never scored.
    pub fn is_matchable(&self) -> bool {
        !self.model.trim().is_empty()
    }
}

/// Which attributes matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchFlags {
    pub manufacturer: bool,
    pub model: bool,
    pub processor: bool,
    pub ram: bool,
    pub hdd: bool,
    pub graphics: bool,
    pub resolution: bool,
    pub touchscreen: bool,
    pub windows_edition: bool,
    pub device_class: bool,
}

/// Accepted (unit, entry) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    pub id: String,
    /// Number of matched attributes (0-10).
    pub score: u8,
    pub flags: MatchFlags,
}

/// Final verdict for one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    NoMatch,
    /// Best score of 9 or 10.
    Exact(Vec<String>),
    /// Best score of 7 or 8.
    Nearest(Vec<String>),
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchResult::NoMatch)
    }

    pub fn ids(&self) -> &[String] {
        match self {
            MatchResult::NoMatch => &[],
            MatchResult::Exact(ids) | MatchResult::Nearest(ids) => ids,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::NoMatch => write!(f, "{}", NO_MATCH_MARKER),
            MatchResult::Exact(ids) => write!(f, "{}", ids.join(ID_SEPARATOR)),
            MatchResult::Nearest(ids) => {
                write!(f, "{}{}", NEAREST_PREFIX, ids.join(ID_SEPARATOR))
            }
        }
    }
}
