//! Scoring one unit against one catalog entry
//!
//! Ten attribute checks, one point each. Manufacturer, model and processor
//! are mandatory; the disk policy may reject the pair outright; a pair needs
//! more than six points to become a candidate.

use super::DiskPolicy;
use crate::keywords::{
    contains_ci, FHD_KEYWORD, FULL_HD_KEYWORDS, NO_DISK_MARKER, TOUCH_KEYWORD, TOUCH_NO,
    TOUCH_YES, WINDOWS_HOME_CODE, WINDOWS_HOME_INPUT, WINDOWS_PRO_CODE, WINDOWS_PRO_INPUT,
};
use crate::types::{CatalogEntry, InputUnit, MatchCandidate, MatchFlags};
use regex::Regex;

/// Manufacturer, model and processor must all match.
pub const MANDATORY_MATCHES: u8 = 3;
/// Lowest accepted candidate score.
pub const MIN_CANDIDATE_SCORE: u8 = 7;
/// Lowest score reported without the "nearest" prefix.
pub const EXACT_MATCH_SCORE: u8 = 9;

lazy_static::lazy_static! {
    static ref DIGITS_RE: Regex = Regex::new(r"\d+").unwrap();
}

/// Capacities encoded in the report's `Docelowa` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetCapacity<'a> {
    /// First digit run.
    pub ram: Option<&'a str>,
    /// Second digit run; only read under `DiskPolicy::CompareCapacity`.
    pub storage: Option<&'a str>,
}

impl<'a> TargetCapacity<'a> {
    pub fn parse(target_spec: &'a str) -> Self {
        let mut runs = DIGITS_RE.find_iter(target_spec).map(|m| m.as_str());
        let ram = runs.next();
        let storage = runs.next();
        Self { ram, storage }
    }
}

/// First run of digits anywhere in `text`.
pub fn first_number(text: &str) -> Option<&str> {
    DIGITS_RE.find(text).map(|m| m.as_str())
}

/// Scores one pair. `None` means "not a candidate", which is not an error.
pub fn score_pair(
    unit: &InputUnit,
    entry: &CatalogEntry,
    disk_policy: DiskPolicy,
) -> Option<MatchCandidate> {
    let mut flags = MatchFlags::default();
    let mut score: u8 = 0;
    let mut hit = |flag: &mut bool, matched: bool| {
        if matched {
            *flag = true;
            score += 1;
        }
    };

    hit(&mut flags.manufacturer, contains_ci(&entry.manufacturer, &unit.manufacturer));
    hit(&mut flags.model, contains_ci(&entry.model, &unit.model));
    hit(&mut flags.processor, contains_ci(&entry.processor, &unit.processor));

    if !(flags.manufacturer && flags.model && flags.processor) {
        return None;
    }

    let capacity = TargetCapacity::parse(&unit.target_spec);

    let diskless = entry.hdd.contains(NO_DISK_MARKER);
    let hdd_matched = match disk_policy {
        DiskPolicy::DisklessOnly => {
            if !diskless {
                return None;
            }
            true
        }
        DiskPolicy::CompareCapacity => {
            let same_capacity = matches!(
                (capacity.storage, first_number(&entry.hdd)),
                (Some(a), Some(b)) if a == b
            );
            same_capacity || diskless
        }
    };
    hit(&mut flags.hdd, hdd_matched);

    hit(
        &mut flags.ram,
        matches!((capacity.ram, first_number(&entry.ram)), (Some(a), Some(b)) if a == b),
    );

    hit(&mut flags.graphics, contains_ci(&entry.graphics, &unit.graphics));
    hit(&mut flags.resolution, resolution_matches(&unit.display, &entry.resolution));
    hit(&mut flags.touchscreen, touchscreen_matches(&unit.display, &entry.touchscreen));
    hit(
        &mut flags.windows_edition,
        windows_matches(&unit.windows_edition, &entry.windows_edition),
    );
    hit(
        &mut flags.device_class,
        unit.device_class.to_lowercase() == entry.device_class.to_lowercase(),
    );

    tracing::trace!(id = %entry.id, score, "scored pair");

    (score >= MIN_CANDIDATE_SCORE).then(|| MatchCandidate {
        id: entry.id.clone(),
        score,
        flags,
    })
}

fn resolution_matches(display: &str, resolution: &str) -> bool {
    if contains_ci(resolution, display) {
        return true;
    }
    let resolution = resolution.to_lowercase();
    display.to_lowercase().contains(FHD_KEYWORD)
        && FULL_HD_KEYWORDS.iter().any(|k| resolution.contains(k))
}

fn touchscreen_matches(display: &str, touchscreen: &str) -> bool {
    if display.to_lowercase().contains(TOUCH_KEYWORD) {
        touchscreen == TOUCH_YES
    } else {
        touchscreen == TOUCH_NO
    }
}

fn windows_matches(unit_windows: &str, entry_windows: &str) -> bool {
    let unit_windows = unit_windows.to_lowercase();
    let entry_windows = entry_windows.to_lowercase();
    let edition = |spellings: &[&str], code: &str| {
        spellings.iter().any(|s| unit_windows.contains(s)) && entry_windows.contains(code)
    };
    edition(WINDOWS_PRO_INPUT, WINDOWS_PRO_CODE) || edition(WINDOWS_HOME_INPUT, WINDOWS_HOME_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::extract_attributes;

    fn catalog(id: &str, name: &str) -> CatalogEntry {
        CatalogEntry::new(id, extract_attributes(name))
    }

    fn hp_unit() -> InputUnit {
        InputUnit {
            ordinal: "1".into(),
            serial: "5CG1234".into(),
            manufacturer: "HP".into(),
            model: "450".into(),
            processor: "i5".into(),
            target_spec: "8 256".into(),
            graphics: String::new(),
            display: "FHD".into(),
            windows_edition: "win11pro".into(),
            device_class: "A".into(),
            cells: Vec::new(),
        }
    }

    #[test]
    fn test_target_capacity() {
        let capacity = TargetCapacity::parse("8GB RAM / 256GB SSD");
        assert_eq!(capacity.ram, Some("8"));
        assert_eq!(capacity.storage, Some("256"));
        assert_eq!(TargetCapacity::parse("brak"), TargetCapacity::default());
    }

    #[test]
    fn test_exact_match_all_attributes() {
        let entry = catalog(
            "501",
            "Laptop HP ProBook 450 / i5-8250U / 8GB / BRAK DYSKU / FHD / W11P / Klasa A",
        );
        let candidate = score_pair(&hp_unit(), &entry, DiskPolicy::DisklessOnly).unwrap();
        assert_eq!(candidate.id, "501");
        assert_eq!(candidate.score, 10);
        assert!(candidate.flags.hdd && candidate.flags.ram && candidate.flags.windows_edition);
    }

    #[test]
    fn test_disk_gate_rejects_entry_with_disk() {
        let entry = catalog(
            "502",
            "Laptop HP ProBook 450 / i5-8250U / 8GB / 256GB SSD / FHD / W11P / Klasa A",
        );
        assert!(score_pair(&hp_unit(), &entry, DiskPolicy::DisklessOnly).is_none());

        let candidate = score_pair(&hp_unit(), &entry, DiskPolicy::CompareCapacity).unwrap();
        assert!(candidate.flags.hdd);
        assert_eq!(candidate.score, 10);
    }

    #[test]
    fn test_compare_capacity_mismatch_is_not_fatal() {
        let entry = catalog(
            "503",
            "Laptop HP ProBook 450 / i5-8250U / 8GB / 512GB SSD / FHD / W11P / Klasa A",
        );
        let candidate = score_pair(&hp_unit(), &entry, DiskPolicy::CompareCapacity).unwrap();
        assert!(!candidate.flags.hdd);
        assert_eq!(candidate.score, 9);
    }

    #[test]
    fn test_mandatory_attributes_prune() {
        let entry = catalog("504", "Laptop HP ProBook 640 / i5-8250U / 8GB / BRAK DYSKU / FHD / W11P / Klasa A");
        assert!(score_pair(&hp_unit(), &entry, DiskPolicy::DisklessOnly).is_none());

        let entry = catalog("505", "Laptop Dell Latitude 450 / i5 / 8GB / BRAK DYSKU / FHD / W11P / Klasa A");
        assert!(score_pair(&hp_unit(), &entry, DiskPolicy::DisklessOnly).is_none());
    }

    #[test]
    fn test_score_boundary_seven_accepted_six_rejected() {
        // mandatory (3) + hdd (1) + graphics with empty unit text (1) + touch (1) = 6
        // plus the ram match = 7
        let mut unit = hp_unit();
        unit.display = "HD+".into();
        unit.windows_edition = "brak".into();
        unit.device_class = "C".into();

        let seven = catalog("506", "Laptop HP ProBook 450 / i5 / 8GB / BRAK DYSKU / FHD / W11P / Klasa A");
        let candidate = score_pair(&unit, &seven, DiskPolicy::DisklessOnly).unwrap();
        assert_eq!(candidate.score, 7);

        let six = catalog("507", "Laptop HP ProBook 450 / i5 / 16GB / BRAK DYSKU / FHD / W11P / Klasa A");
        assert!(score_pair(&unit, &six, DiskPolicy::DisklessOnly).is_none());
    }

    #[test]
    fn test_resolution_full_hd_alias() {
        assert!(resolution_matches("FHD", "15.6\" Full HD"));
        assert!(resolution_matches("fhd dotyk", "FullHD"));
        assert!(resolution_matches("", "-"));
        assert!(!resolution_matches("HD", "-"));
    }

    #[test]
    fn test_touchscreen_matches() {
        assert!(touchscreen_matches("FHD dotykowy", "Yes"));
        assert!(!touchscreen_matches("FHD dotykowy", "No"));
        assert!(touchscreen_matches("FHD", "No"));
        assert!(!touchscreen_matches("FHD", "Yes"));
    }

    #[test]
    fn test_windows_matches() {
        assert!(windows_matches("Win11Pro", "W11P"));
        assert!(windows_matches("w11h", "Win11Home W11H"));
        assert!(!windows_matches("win11pro", "W11H"));
        assert!(!windows_matches("", "W11P"));
        assert!(!windows_matches("Win10Pro", "W11P"));
    }

    #[test]
    fn test_class_is_exact_not_substring() {
        let mut unit = hp_unit();
        unit.device_class = "a".into();
        let entry = catalog("508", "Laptop HP ProBook 450 / i5 / 8GB / BRAK DYSKU / FHD / W11P / Klasa A+");
        let candidate = score_pair(&unit, &entry, DiskPolicy::DisklessOnly).unwrap();
        assert!(!candidate.flags.device_class);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let entry = catalog("509", "Laptop HP ProBook 450 / i5 / 8GB / BRAK DYSKU / FHD");
        let first = score_pair(&hp_unit(), &entry, DiskPolicy::DisklessOnly);
        let second = score_pair(&hp_unit(), &entry, DiskPolicy::DisklessOnly);
        assert_eq!(first, second);
    }
}
