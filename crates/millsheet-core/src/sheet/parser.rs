//! Mill sheet parser - runs every field extractor over one text blob.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::document::MillSheetInfo;

use super::rules::{
    extract_charge_no, extract_date, extract_dimensions, extract_manufacturer, extract_material,
};

/// Result of parsing one certificate.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Extracted record.
    pub info: MillSheetInfo,
    /// Fields that could not be extracted, as human-readable notes.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based mill sheet parser.
///
/// The five extractors are independent: each one sees the full text and
/// none of them can fail. An all-empty record means the sheet was read
/// but nothing on it was recognized; that is a valid outcome.
pub struct MillSheetParser;

impl MillSheetParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse mill sheet fields from OCR text. Never fails.
    pub fn parse(&self, text: &str) -> ParseResult {
        let start = Instant::now();

        debug!("Parsing mill sheet from {} characters of text", text.len());

        let info = MillSheetInfo {
            date: extract_date(text),
            material: extract_material(text),
            dimensions: extract_dimensions(text),
            manufacturer: extract_manufacturer(text),
            charge_no: extract_charge_no(text),
            raw_text: text.to_string(),
        };

        let warnings: Vec<String> = info
            .missing_fields()
            .iter()
            .map(|field| format!("could not extract {field}"))
            .collect();

        info!(
            "Extracted {}/5 fields",
            5 - warnings.len(),
        );

        ParseResult {
            info,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for MillSheetParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_full_sheet() {
        let text = "\
検査証明書 MILL SHEET
東京製鉄株式会社
発行日 2024.08.04
材質 SS400
寸法
1.6X1,219XCOIL
溶鋼番号: K12345
";

        let result = MillSheetParser::new().parse(text);
        let info = &result.info;

        assert_eq!(info.date.as_deref(), Some("24-08-04"));
        assert_eq!(info.material.as_deref(), Some("SS400"));
        assert_eq!(info.dimensions.as_deref(), Some("1.6x1219xC"));
        assert_eq!(info.manufacturer.as_deref(), Some("東京製鉄"));
        assert_eq!(info.charge_no.as_deref(), Some("K12345"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_parse_never_fails_on_noise() {
        let result = MillSheetParser::new().parse("!!!####$$$$\n\n\n");
        assert!(!result.info.has_fields());
        assert_eq!(result.warnings.len(), 5);
        assert_eq!(result.info.raw_text, "!!!####$$$$\n\n\n");
    }

    #[test]
    fn test_parse_empty_text() {
        let result = MillSheetParser::new().parse("");
        assert!(!result.info.has_fields());
    }

    #[test]
    fn test_populated_fields_are_trimmed_nonempty() {
        let text = "製造者: 山田鋼業 \n平成31年1月15日 SPHC t2.3 x 914 x COIL";
        let result = MillSheetParser::new().parse(text);

        for field in [
            &result.info.date,
            &result.info.material,
            &result.info.dimensions,
            &result.info.manufacturer,
            &result.info.charge_no,
        ]
        .into_iter()
        .flatten()
        {
            assert_eq!(field.trim(), field);
            assert!(!field.is_empty());
        }
    }

    #[test]
    fn test_extractors_are_independent() {
        // The grade token also fits the charge-number shape space; both
        // fields may claim their own match without interference.
        let text = "SPHC 2.3x1219xCOIL ロット K12345";
        let result = MillSheetParser::new().parse(text);
        assert_eq!(result.info.material.as_deref(), Some("SPHC"));
        assert_eq!(result.info.charge_no.as_deref(), Some("K12345"));
        assert_eq!(result.info.date, None);
    }
}
