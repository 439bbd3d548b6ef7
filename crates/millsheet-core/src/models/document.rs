//! The structured record extracted from one mill certificate.

use serde::{Deserialize, Serialize};

/// Information extracted from a single mill sheet.
///
/// Every field is independently optional: OCR output is noisy and a
/// certificate that yields none of the fields is still a valid (empty)
/// record, not an error. Populated fields are normalized and non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MillSheetInfo {
    /// Issue date in `YY-MM-DD` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Steel grade designator (SS400, SPHC, SUS304, ...), uppercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    /// Dimensions as `thickness x width[ x length]`, where length is a
    /// numeric string or `C` for coil.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,

    /// Manufacturer display name, canonical where recognized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    /// Heat/charge number, uppercase alphanumeric, 4-12 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_no: Option<String>,

    /// The original OCR text, retained for diagnostics.
    #[serde(default)]
    pub raw_text: String,
}

impl MillSheetInfo {
    /// Whether any field was extracted.
    pub fn has_fields(&self) -> bool {
        self.date.is_some()
            || self.material.is_some()
            || self.dimensions.is_some()
            || self.manufacturer.is_some()
            || self.charge_no.is_some()
    }

    /// Names of the fields that could not be extracted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.date.is_none() {
            missing.push("date");
        }
        if self.material.is_none() {
            missing.push("material");
        }
        if self.dimensions.is_none() {
            missing.push("dimensions");
        }
        if self.manufacturer.is_none() {
            missing.push("manufacturer");
        }
        if self.charge_no.is_none() {
            missing.push("charge_no");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_has_no_fields() {
        let info = MillSheetInfo::default();
        assert!(!info.has_fields());
        assert_eq!(info.missing_fields().len(), 5);
    }

    #[test]
    fn test_single_field_counts() {
        let info = MillSheetInfo {
            material: Some("SS400".to_string()),
            ..Default::default()
        };
        assert!(info.has_fields());
        assert!(!info.missing_fields().contains(&"material"));
    }

    #[test]
    fn test_optional_fields_skipped_in_json() {
        let info = MillSheetInfo {
            date: Some("24-01-15".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"date\":\"24-01-15\""));
        assert!(!json.contains("material"));
    }
}
