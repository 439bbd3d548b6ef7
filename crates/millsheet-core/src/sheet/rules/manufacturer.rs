//! Manufacturer name extraction.
//!
//! Known mills are resolved through a priority table first, so every
//! OCR spelling of the same mill collapses to one canonical display
//! name. Only when no table entry matches does the extractor fall back
//! to generic company-name shapes.

use super::patterns::{MAKER_CORPORATE_SUFFIX, MAKER_LABELED, MAKER_STEEL_SUFFIX};
use super::{ExtractionMatch, FieldExtractor};

/// Canonical manufacturer names with their known surface forms: script
/// variants (製鉄/製鐵), OCR misreadings and English transliterations.
/// Table order is priority order.
pub const PRIORITY_MANUFACTURERS: &[(&str, &[&str])] = &[
    (
        "東京製鉄",
        &[
            "東京製鉄",
            "東京製鐵",
            "東京製鉄所",
            "東京製鐵所",
            "TOKYO STEEL",
            "TOKYOSTEEL",
        ],
    ),
    (
        "中山製鋼",
        &[
            "中山製鋼",
            "中山製鉄",
            "中山製鋼所",
            "中山製鉄所",
            "NAKAYAMA STEEL",
            "NAKAYAMA",
        ],
    ),
    (
        "神戸製鋼",
        &[
            "神戸製鋼",
            "神戸製鉄",
            "神戸製鋼所",
            "神戸製鉄所",
            "KOBE STEEL",
            "KOBELCO",
        ],
    ),
    (
        "日本製鉄",
        &["日本製鉄", "日本製鐵", "NIPPON STEEL", "NIPPONSTEEL"],
    ),
    (
        "JFEスチール",
        &["JFEスチール", "JFE STEEL", "JFESTEEL"],
    ),
];

/// Manufacturer extractor.
pub struct ManufacturerExtractor;

impl ManufacturerExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ManufacturerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ManufacturerExtractor {
    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch> {
        let mut results: Vec<ExtractionMatch> = Vec::new();
        let text_upper = text.to_uppercase();

        for (display_name, variants) in PRIORITY_MANUFACTURERS {
            for variant in *variants {
                if text_upper.contains(&variant.to_uppercase()) {
                    results.push(ExtractionMatch::new(*display_name, 0.95, *variant));
                    break;
                }
            }
        }

        // Generic company shapes, accepted at 2-20 characters.
        for re in [
            &*MAKER_STEEL_SUFFIX,
            &*MAKER_CORPORATE_SUFFIX,
            &*MAKER_LABELED,
        ] {
            for caps in re.captures_iter(text) {
                let m = caps.get(1).unwrap();
                let name = m.as_str().trim();
                let chars = name.chars().count();

                if !(2..=20).contains(&chars) {
                    continue;
                }
                if results.iter().any(|r| r.value == name) {
                    continue;
                }
                results.push(
                    ExtractionMatch::new(name, 0.7, m.as_str())
                        .with_position(m.start(), m.end()),
                );
            }
        }

        results
    }
}

/// Extract a manufacturer display name from text.
pub fn extract_manufacturer(text: &str) -> Option<String> {
    ManufacturerExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_from_script_variant() {
        assert_eq!(
            extract_manufacturer("東京製鐵所 ミルシート"),
            Some("東京製鉄".to_string())
        );
    }

    #[test]
    fn test_canonical_from_transliteration() {
        assert_eq!(
            extract_manufacturer("tokyo steel mfg."),
            Some("東京製鉄".to_string())
        );
        assert_eq!(
            extract_manufacturer("KOBELCO"),
            Some("神戸製鋼".to_string())
        );
    }

    #[test]
    fn test_priority_beats_generic_company() {
        // A generic corporate token must not shadow a known mill.
        let text = "㈱Example 商事\nTOKYO STEEL CO., LTD.";
        assert_eq!(extract_manufacturer(text), Some("東京製鉄".to_string()));
    }

    #[test]
    fn test_table_order_is_priority_order() {
        let text = "中山製鋼 via 神戸製鋼";
        assert_eq!(extract_manufacturer(text), Some("中山製鋼".to_string()));
    }

    #[test]
    fn test_generic_steel_suffix() {
        assert_eq!(
            extract_manufacturer("大和製鋼のミルシート"),
            Some("大和製鋼".to_string())
        );
    }

    #[test]
    fn test_labeled_fallback() {
        assert_eq!(
            extract_manufacturer("製造者: 山田鋼業"),
            Some("山田鋼業".to_string())
        );
    }

    #[test]
    fn test_overlong_generic_rejected() {
        let text = "製造者: あいうえおかきくけこさしすせそたちつてとなにぬねの";
        assert_eq!(extract_manufacturer(text), None);
    }

    #[test]
    fn test_no_manufacturer() {
        assert_eq!(extract_manufacturer("SS400 1.6x1219xC"), None);
    }
}
