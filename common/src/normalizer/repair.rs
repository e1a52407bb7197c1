//! Second-pass repair of extracted catalog entries
//!
//! Fixes the systematic errors a single name cannot reveal:
//! - product line sitting in the manufacturer slot ("Laptop ThinkPad T480 / ...")
//! - one-column shift caused by an extra delimiter inside the processor text

use crate::keywords::{
    contains_ci, CAPACITY_UNIT, GENERATION_MARKER, PLACEHOLDER, PRODUCT_LINES,
    SHIFTED_PROCESSOR_TOKENS,
};
use crate::types::CatalogEntry;

/// What happened to an entry during repair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairOutcome {
    pub brand_fixed: bool,
    pub shift_fixed: bool,
    /// Processor reset to the placeholder; the entry will be dropped.
    pub invalidated: bool,
}

/// Repairs every entry in place. Row order does not matter.
pub fn repair_entries(entries: &mut [CatalogEntry]) -> Vec<RepairOutcome> {
    entries.iter_mut().map(repair_entry).collect()
}

/// Repairs one entry.
///
/// Both corrections read the entry as it was extracted: the shift repair
/// rebuilds `model` from the extracted model, so a product-line prefix added
/// by the brand repair does not survive a shift repair.
pub fn repair_entry(entry: &mut CatalogEntry) -> RepairOutcome {
    let original = entry.clone();
    let mut outcome = RepairOutcome::default();

    if let Some((_, prefix, brand)) = PRODUCT_LINES
        .iter()
        .find(|(keyword, _, _)| contains_ci(&original.manufacturer, keyword))
    {
        entry.model = format!("{} {}", prefix, original.model);
        entry.manufacturer = brand.to_string();
        outcome.brand_fixed = true;
    }

    if contains_ci(&original.model, GENERATION_MARKER) {
        let tokens: Vec<&str> = original.model.split_whitespace().collect();
        let split = tokens.len().saturating_sub(SHIFTED_PROCESSOR_TOKENS);
        entry.model = tokens[..split].join(" ");
        entry.processor = tokens[split..].join(" ");
        entry.ram = original.processor.clone();
        entry.hdd = original.ram.clone();
        outcome.shift_fixed = true;
    } else if contains_ci(&original.processor, CAPACITY_UNIT) {
        // any other shift cannot be recovered
        entry.processor = PLACEHOLDER.to_string();
        outcome.invalidated = true;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(manufacturer: &str, model: &str, processor: &str, ram: &str, hdd: &str) -> CatalogEntry {
        CatalogEntry {
            id: "1".into(),
            manufacturer: manufacturer.into(),
            model: model.into(),
            processor: processor.into(),
            ram: ram.into(),
            hdd: hdd.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_brand_repair_lenovo_lines() {
        let mut e = entry("ThinkPad", "T480", "i5", "8GB", "BRAK DYSKU");
        let outcome = repair_entry(&mut e);
        assert!(outcome.brand_fixed);
        assert_eq!(e.manufacturer, "Lenovo");
        assert_eq!(e.model, "ThinkPad T480");

        let mut e = entry("yoga", "370", "i5", "8GB", "BRAK DYSKU");
        repair_entry(&mut e);
        assert_eq!(e.manufacturer, "Lenovo");
        assert_eq!(e.model, "Yoga 370");

        let mut e = entry("ThinkBook", "14 G2", "i5", "8GB", "BRAK DYSKU");
        repair_entry(&mut e);
        assert_eq!(e.model, "ThinkBook 14 G2");
    }

    #[test]
    fn test_brand_repair_hp_lines() {
        let mut e = entry("ProBook", "450 G5", "i5", "8GB", "BRAK DYSKU");
        repair_entry(&mut e);
        assert_eq!(e.manufacturer, "HP");
        assert_eq!(e.model, "ProBook 450 G5");

        // EliteBook gets the ProBook prefix
        let mut e = entry("EliteBook", "840 G5", "i5", "8GB", "BRAK DYSKU");
        repair_entry(&mut e);
        assert_eq!(e.manufacturer, "HP");
        assert_eq!(e.model, "ProBook 840 G5");
    }

    #[test]
    fn test_canonical_entry_unchanged() {
        let mut e = entry("Lenovo", "ThinkPad T480", "i5", "8GB", "BRAK DYSKU");
        let before = e.clone();
        let outcome = repair_entry(&mut e);
        assert_eq!(outcome, RepairOutcome::default());
        assert_eq!(e, before);
    }

    #[test]
    fn test_shift_repair() {
        let mut e = entry(
            "Dell",
            "Latitude 5490 i5-8350U - 8 generacji",
            "16GB",
            "256GB SSD",
            "FHD",
        );
        let outcome = repair_entry(&mut e);
        assert!(outcome.shift_fixed);
        assert_eq!(e.model, "Latitude 5490");
        assert_eq!(e.processor, "i5-8350U - 8 generacji");
        assert_eq!(e.ram, "16GB");
        assert_eq!(e.hdd, "256GB SSD");
    }

    #[test]
    fn test_shift_repair_drops_brand_prefix() {
        let mut e = entry("ThinkPad", "T480 i5-8350U - 8 generacji", "8GB", "BRAK DYSKU", "-");
        let outcome = repair_entry(&mut e);
        assert!(outcome.brand_fixed && outcome.shift_fixed);
        assert_eq!(e.manufacturer, "Lenovo");
        assert_eq!(e.model, "T480");
        assert_eq!(e.processor, "i5-8350U - 8 generacji");
        assert_eq!(e.ram, "8GB");
        assert_eq!(e.hdd, "BRAK DYSKU");
    }

    #[test]
    fn test_short_shifted_model() {
        let mut e = entry("Dell", "8 generacji", "8GB", "BRAK DYSKU", "-");
        repair_entry(&mut e);
        assert_eq!(e.model, "");
        assert_eq!(e.processor, "8 generacji");
    }

    #[test]
    fn test_unrecoverable_shift_invalidates() {
        let mut e = entry("Dell", "Latitude 5490", "8GB", "256GB", "-");
        let outcome = repair_entry(&mut e);
        assert!(outcome.invalidated);
        assert_eq!(e.processor, "-");
    }

    #[test]
    fn test_repair_entries_counts() {
        let mut entries = vec![
            entry("ThinkPad", "T480", "i5", "8GB", "BRAK DYSKU"),
            entry("Dell", "Latitude", "8GB", "-", "-"),
        ];
        let outcomes = repair_entries(&mut entries);
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].brand_fixed);
        assert!(outcomes[1].invalidated);
    }
}
