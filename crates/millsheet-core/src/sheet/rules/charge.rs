//! Heat/charge number extraction.
//!
//! Labeled forms first, then bare shape heuristics. A candidate is only
//! accepted when the uppercased token is alphanumeric and 4-12
//! characters long; anything else lets the cascade continue. The shape
//! heuristics deliberately overlap with grade and dimension tokens -
//! extractors are independent and the same substring may serve two
//! fields.

use super::patterns::{CHARGE_ALPHA_DIGITS, CHARGE_DIGIT_ALPHA_DIGITS, CHARGE_LABELED};
use super::{ExtractionMatch, FieldExtractor};

/// Charge number extractor.
pub struct ChargeNoExtractor;

impl ChargeNoExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ChargeNoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ChargeNoExtractor {
    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch> {
        let mut results: Vec<ExtractionMatch> = Vec::new();

        for (re, confidence) in [
            (&*CHARGE_LABELED, 0.95),
            (&*CHARGE_ALPHA_DIGITS, 0.7),
            (&*CHARGE_DIGIT_ALPHA_DIGITS, 0.7),
        ] {
            for caps in re.captures_iter(text) {
                let m = caps.get(1).unwrap();
                let Some(charge_no) = accept(m.as_str()) else {
                    continue;
                };
                if results.iter().any(|r| r.value == charge_no) {
                    continue;
                }
                results.push(
                    ExtractionMatch::new(charge_no, confidence, m.as_str())
                        .with_position(m.start(), m.end()),
                );
            }
        }

        results
    }
}

/// Extract a charge number from text, uppercased.
pub fn extract_charge_no(text: &str) -> Option<String> {
    ChargeNoExtractor::new().extract(text).map(|m| m.value)
}

fn accept(candidate: &str) -> Option<String> {
    let charge_no = candidate.to_uppercase();
    let len = charge_no.chars().count();
    if (4..=12).contains(&len) && charge_no.chars().all(|c| c.is_alphanumeric()) {
        Some(charge_no)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_japanese() {
        assert_eq!(
            extract_charge_no("溶鋼番号: K12345"),
            Some("K12345".to_string())
        );
        assert_eq!(
            extract_charge_no("鋼番 ab1234"),
            Some("AB1234".to_string())
        );
    }

    #[test]
    fn test_labeled_ocr_misread() {
        // 溶銅 is what OCR tends to make of 溶鋼.
        assert_eq!(
            extract_charge_no("溶銅番号 7B5012"),
            Some("7B5012".to_string())
        );
    }

    #[test]
    fn test_labeled_english() {
        assert_eq!(
            extract_charge_no("CHARGE NO. E88012"),
            Some("E88012".to_string())
        );
    }

    #[test]
    fn test_shape_heuristics() {
        assert_eq!(extract_charge_no("ロット K12345"), Some("K12345".to_string()));
        assert_eq!(extract_charge_no("1A23456"), Some("1A23456".to_string()));
    }

    #[test]
    fn test_labeled_beats_shape() {
        let text = "B7777777\n溶鋼番号: K12345";
        assert_eq!(extract_charge_no(text), Some("K12345".to_string()));
    }

    #[test]
    fn test_short_candidate_continues_cascade() {
        // A 3-character labeled token fails the length check; the shape
        // heuristic later in the text still fires.
        let text = "鋼番 A12\nK554401";
        assert_eq!(extract_charge_no(text), Some("K554401".to_string()));
    }

    #[test]
    fn test_no_charge_no() {
        assert_eq!(extract_charge_no("板厚1.6 幅1219"), None);
    }
}
