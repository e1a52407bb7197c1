//! Attribute extraction
//!
//! A catalog name looks like
//! `"Laptop Lenovo ThinkPad T480 / i5-8350U / 8GB / BRAK DYSKU / FHD / W11P / Klasa A"`:
//! four positional segments followed by optional segments in any order.

use crate::keywords::{
    CLASS_MARKER, CLASS_PREFIX, FIELD_DELIMITER, GPU_KEYWORDS, PLACEHOLDER,
    RESOLUTION_MARKERS, TOUCH_KEYWORD, TOUCH_NO, TOUCH_YES, WINDOWS_EDITIONS,
};
use crate::types::Attributes;

/// Parses a catalog name into ten attributes.
///
/// Never fails: a name that does not follow the grammar (fewer than four
/// segments, or a first segment without a manufacturer token) yields the
/// all-empty sentinel, which cleaning later drops.
pub fn extract_attributes(name: &str) -> Attributes {
    try_extract(name).unwrap_or_default()
}

fn try_extract(name: &str) -> Option<Attributes> {
    let parts: Vec<&str> = name.split(FIELD_DELIMITER).collect();

    // token[0] is a category word such as "Laptop"
    let mut head = parts.first()?.split_whitespace();
    head.next()?;
    let manufacturer = head.next()?.to_string();
    let model = head.collect::<Vec<_>>().join(" ");

    let processor = parts.get(1)?.trim().to_string();
    let ram = parts.get(2)?.to_string();
    let hdd = parts.get(3)?.to_string();

    let mut touchscreen = TOUCH_NO.to_string();
    let mut windows_edition = PLACEHOLDER.to_string();
    let mut device_class = PLACEHOLDER.to_string();

    for part in parts.iter().map(|p| p.trim()) {
        if part.to_lowercase().contains(TOUCH_KEYWORD) {
            touchscreen = TOUCH_YES.to_string();
        }
        if WINDOWS_EDITIONS.iter().any(|w| part.contains(w)) {
            windows_edition = part.to_string();
        }
        if part.contains(CLASS_MARKER) {
            device_class = part.replace(CLASS_PREFIX, "");
        }
    }

    let resolution = parts
        .iter()
        .find(|p| RESOLUTION_MARKERS.iter().any(|m| p.contains(m)))
        .map(|p| p.trim().to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let graphics = parts
        .iter()
        .find(|p| GPU_KEYWORDS.iter().any(|k| p.contains(k)))
        .map(|p| p.trim().to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    Some(Attributes {
        manufacturer,
        model,
        processor,
        ram,
        hdd,
        graphics,
        resolution,
        touchscreen,
        windows_edition,
        device_class,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_minimal_name() {
        let attrs = extract_attributes("Laptop Lenovo ThinkPad T480 / i5 / 8GB / BRAK DYSKU");
        assert_eq!(attrs.manufacturer, "Lenovo");
        assert_eq!(attrs.model, "ThinkPad T480");
        assert_eq!(attrs.processor, "i5");
        assert_eq!(attrs.ram, "8GB");
        assert_eq!(attrs.hdd, "BRAK DYSKU");
        assert_eq!(attrs.graphics, "-");
        assert_eq!(attrs.resolution, "-");
        assert_eq!(attrs.touchscreen, "No");
        assert_eq!(attrs.windows_edition, "-");
        assert_eq!(attrs.device_class, "-");
    }

    #[test]
    fn test_extract_optional_segments() {
        let attrs = extract_attributes(
            "Laptop HP ProBook 450 / i5-8250U / 8GB / 256GB SSD / FHD / W11P / Klasa A",
        );
        assert_eq!(attrs.manufacturer, "HP");
        assert_eq!(attrs.model, "ProBook 450");
        assert_eq!(attrs.processor, "i5-8250U");
        assert_eq!(attrs.hdd, "256GB SSD");
        assert_eq!(attrs.resolution, "FHD");
        assert_eq!(attrs.windows_edition, "W11P");
        assert_eq!(attrs.device_class, "A");
        assert_eq!(attrs.graphics, "-");
    }

    #[test]
    fn test_extract_optional_segments_any_order() {
        let attrs = extract_attributes(
            "Laptop Dell Precision 7540 / i7-9850H / 32GB / BRAK DYSKU / Klasa B / Win11Home / \
             Quadro T2000 / 15.6\" dotykowy",
        );
        assert_eq!(attrs.device_class, "B");
        assert_eq!(attrs.windows_edition, "Win11Home");
        assert_eq!(attrs.graphics, "Quadro T2000");
        assert_eq!(attrs.resolution, "15.6\" dotykowy");
        assert_eq!(attrs.touchscreen, "Yes");
    }

    #[test]
    fn test_extract_first_resolution_and_gpu_win() {
        let attrs = extract_attributes(
            "Laptop Dell XPS 15 / i7 / 16GB / BRAK DYSKU / UHD / GeForce GTX 1650 / FHD / RTX 3050",
        );
        assert_eq!(attrs.resolution, "UHD");
        assert_eq!(attrs.graphics, "GeForce GTX 1650");
    }

    #[test]
    fn test_extract_case_sensitive_markers() {
        // "hd" in lower case is not a resolution marker, "mx" is not a GPU marker
        let attrs = extract_attributes("Laptop HP 250 / i3 / 4GB / BRAK DYSKU / hd ready / mx");
        assert_eq!(attrs.resolution, "-");
        assert_eq!(attrs.graphics, "-");
    }

    #[test]
    fn test_extract_too_few_segments() {
        assert!(extract_attributes("Laptop HP 250 / i3").is_empty());
        assert!(extract_attributes("Laptop HP 250 / i3 / 4GB").is_empty());
    }

    #[test]
    fn test_extract_head_without_manufacturer() {
        assert!(extract_attributes("Laptop / i3 / 4GB / BRAK DYSKU").is_empty());
        assert!(extract_attributes("").is_empty());
    }

    #[test]
    fn test_extract_is_deterministic() {
        let name = "Laptop HP EliteBook 840 G5 / i5-8350U / 16GB / BRAK DYSKU / FHD dotyk";
        assert_eq!(extract_attributes(name), extract_attributes(name));
    }
}
