//! Steel grade extraction.

use super::patterns::MATERIAL_GRADES;
use super::{ExtractionMatch, FieldExtractor};

/// Steel grade extractor.
///
/// JIS grade families are tried most specific first (`MATERIAL_GRADES`);
/// the generic `S...` catch-all only fires when no named family matched.
pub struct MaterialExtractor;

impl MaterialExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MaterialExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for MaterialExtractor {
    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch> {
        let mut results: Vec<ExtractionMatch> = Vec::new();

        for (rank, re) in MATERIAL_GRADES.iter().enumerate() {
            // The last entry is the generic catch-all.
            let confidence = if rank + 1 == MATERIAL_GRADES.len() { 0.7 } else { 0.9 };

            for caps in re.captures_iter(text) {
                let m = caps.get(1).unwrap();
                let grade = m.as_str().to_uppercase().replace(' ', "");

                if results.iter().any(|r| r.value == grade) {
                    continue;
                }
                results.push(
                    ExtractionMatch::new(grade, confidence, m.as_str())
                        .with_position(m.start(), m.end()),
                );
            }
        }

        results
    }
}

/// Extract a steel grade from text, uppercased with internal spaces removed.
pub fn extract_material(text: &str) -> Option<String> {
    MaterialExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_grade() {
        assert_eq!(extract_material("材質 SS400"), Some("SS400".to_string()));
        assert_eq!(extract_material("ss 400"), Some("SS400".to_string()));
    }

    #[test]
    fn test_rolled_sheet_grades() {
        assert_eq!(extract_material("SPHC 1.6x1219"), Some("SPHC".to_string()));
        assert_eq!(extract_material("SPCE"), Some("SPCE".to_string()));
    }

    #[test]
    fn test_stainless_with_suffix() {
        assert_eq!(extract_material("SUS316L"), Some("SUS316L".to_string()));
        assert_eq!(extract_material("SUS 304"), Some("SUS304".to_string()));
    }

    #[test]
    fn test_machining_and_alloy_grades() {
        assert_eq!(extract_material("S45C"), Some("S45C".to_string()));
        assert_eq!(extract_material("SCM435"), Some("SCM435".to_string()));
        assert_eq!(extract_material("SM490A"), Some("SM490A".to_string()));
        assert_eq!(extract_material("STKR400"), Some("STKR400".to_string()));
    }

    #[test]
    fn test_specific_family_beats_generic() {
        // SUS304 also matches the generic catch-all; the family pattern
        // must win even when the generic token appears earlier in text.
        assert_eq!(
            extract_material("SPV235 and SUS304"),
            Some("SUS304".to_string())
        );
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(extract_material("SAPH440"), Some("SAPH440".to_string()));
    }

    #[test]
    fn test_no_grade() {
        assert_eq!(extract_material("厚さ1.6 幅1219"), None);
    }
}
