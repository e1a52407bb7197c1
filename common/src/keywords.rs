//! Heuristic keyword tables
//!
//! Every literal the extractor, repairer and scorer look for lives here.
//! The catalog is written in Polish, so most markers are Polish words.

/// Field delimiter of a catalog name string.
pub const FIELD_DELIMITER: &str = " / ";

/// Placeholder for an optional attribute that was not found.
pub const PLACEHOLDER: &str = "-";

pub const TOUCH_YES: &str = "Yes";
pub const TOUCH_NO: &str = "No";

/// "dotyk" = touch. Matched case-insensitively.
pub const TOUCH_KEYWORD: &str = "dotyk";

/// Windows editions recognised verbatim (case-sensitive) in catalog names.
pub const WINDOWS_EDITIONS: &[&str] = &["W11P", "W11H", "Win11Pro", "Win11Home"];

/// "Klasa" = class. The segment minus this prefix is the device class.
pub const CLASS_MARKER: &str = "Klasa";
pub const CLASS_PREFIX: &str = "Klasa ";

/// Case-sensitive markers of a resolution segment.
pub const RESOLUTION_MARKERS: &[&str] = &["\"", "HD", "XGA"];

/// Case-sensitive GPU family markers.
pub const GPU_KEYWORDS: &[&str] = &[
    "GeForce", "T2000", "MX", "RX", "GTX", "RTX", "P3200", "T1200",
];

/// Product lines that end up in the manufacturer slot, with the model prefix
/// and parent brand they stand for. Checked in order, case-insensitively.
///
/// EliteBook maps to the "ProBook" prefix, matching existing catalog dumps.
/// TODO: confirm with the catalog owners whether EliteBook should keep its own prefix.
pub const PRODUCT_LINES: &[(&str, &str, &str)] = &[
    ("thinkpad", "ThinkPad", "Lenovo"),
    ("thinkbook", "ThinkBook", "Lenovo"),
    ("yoga", "Yoga", "Lenovo"),
    ("probook", "ProBook", "HP"),
    ("elitebook", "ProBook", "HP"),
];

/// "generacji" = generation. Its presence in the model means the processor
/// description leaked into the model field.
pub const GENERATION_MARKER: &str = "generacji";

/// Number of trailing model tokens that hold the leaked processor.
pub const SHIFTED_PROCESSOR_TOKENS: usize = 4;

/// Capacity unit that must never appear in a processor description.
pub const CAPACITY_UNIT: &str = "gb";

/// "dokująca" = docking (station). Such catalog rows are accessories.
pub const DOCKING_KEYWORD: &str = "dokująca";

/// "BRAK DYSKU" = no disk.
pub const NO_DISK_MARKER: &str = "BRAK DYSKU";

/// Input display text keyword for Full HD.
pub const FHD_KEYWORD: &str = "fhd";
pub const FULL_HD_KEYWORDS: &[&str] = &["fullhd", "full hd"];

/// Input-side Windows Professional spellings and the catalog short code.
pub const WINDOWS_PRO_INPUT: &[&str] = &["win11pro", "win11p", "w11p"];
pub const WINDOWS_PRO_CODE: &str = "w11p";

/// Input-side Windows Home spellings and the catalog short code.
pub const WINDOWS_HOME_INPUT: &[&str] = &["win11home", "win11h", "w11h"];
pub const WINDOWS_HOME_CODE: &str = "w11h";

/// Result markers.
pub const NO_MATCH_MARKER: &str = "brak";
pub const NEAREST_PREFIX: &str = "Najbliższe: ";
pub const ID_SEPARATOR: &str = ", ";

/// Name of the appended result column.
pub const RESULT_COLUMN: &str = "Znalezione ID";

/// Case-insensitive substring test.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
