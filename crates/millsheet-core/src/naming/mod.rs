//! Filename synthesis from extracted mill sheet fields.

mod sanitize;
mod unique;

pub use sanitize::sanitize_for_filename;
pub use unique::make_unique;

use std::path::Path;

use crate::models::document::MillSheetInfo;

/// Build the candidate filename for a record.
///
/// Present fields are joined in fixed order - date, material,
/// dimensions, manufacturer, charge number - each sanitized, with a
/// `.pdf` suffix. A record with nothing usable falls back to the
/// original file's stem plus `_renamed`. Deterministic and free of
/// filesystem access.
pub fn build_filename(info: &MillSheetInfo, original_name: &str) -> String {
    let parts: Vec<String> = [
        &info.date,
        &info.material,
        &info.dimensions,
        &info.manufacturer,
        &info.charge_no,
    ]
    .into_iter()
    .flatten()
    .map(|field| sanitize_for_filename(field))
    .filter(|part| !part.is_empty())
    .collect();

    if parts.is_empty() {
        let stem = Path::new(original_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        format!("{}_renamed.pdf", sanitize_for_filename(stem))
    } else {
        format!("{}.pdf", parts.join("_"))
    }
}

/// Per-document naming state: the extracted record plus the original
/// filename fallback. Built once per document, used to produce the
/// candidate name and resolve it against the target directory, then
/// discarded.
pub struct NamingContext<'a> {
    info: &'a MillSheetInfo,
    original_name: &'a str,
}

impl<'a> NamingContext<'a> {
    pub fn new(info: &'a MillSheetInfo, original_name: &'a str) -> Self {
        Self {
            info,
            original_name,
        }
    }

    /// The deterministic candidate name for this document.
    pub fn candidate(&self) -> String {
        build_filename(self.info, self.original_name)
    }

    /// Resolve the candidate to a collision-free name in the directory
    /// described by `exists`.
    pub fn resolve<F>(&self, exists: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        make_unique(exists, &self.candidate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> MillSheetInfo {
        MillSheetInfo {
            date: Some("24-08-04".to_string()),
            material: Some("SS400".to_string()),
            dimensions: Some("1.6x1219xC".to_string()),
            manufacturer: Some("東京製鉄".to_string()),
            charge_no: Some("K12345".to_string()),
            raw_text: String::new(),
        }
    }

    #[test]
    fn test_fields_join_in_fixed_order() {
        assert_eq!(
            build_filename(&full_record(), "scan001.pdf"),
            "24-08-04_SS400_1.6x1219xC_東京製鉄_K12345.pdf"
        );
    }

    #[test]
    fn test_missing_fields_are_skipped() {
        let info = MillSheetInfo {
            material: Some("SPHC".to_string()),
            charge_no: Some("K12345".to_string()),
            ..Default::default()
        };
        assert_eq!(build_filename(&info, "scan001.pdf"), "SPHC_K12345.pdf");
    }

    #[test]
    fn test_empty_record_falls_back_to_original_stem() {
        let info = MillSheetInfo::default();
        assert_eq!(
            build_filename(&info, "scan001.pdf"),
            "scan001_renamed.pdf"
        );
    }

    #[test]
    fn test_fallback_stem_is_sanitized() {
        let info = MillSheetInfo::default();
        assert_eq!(
            build_filename(&info, "図面 A 1.pdf"),
            "図面_A_1_renamed.pdf"
        );
    }

    #[test]
    fn test_field_values_are_sanitized() {
        let info = MillSheetInfo {
            manufacturer: Some("山田/鋼業".to_string()),
            ..Default::default()
        };
        assert_eq!(build_filename(&info, "x.pdf"), "山田_鋼業.pdf");
    }

    #[test]
    fn test_context_resolves_against_directory() {
        let info = full_record();
        let context = NamingContext::new(&info, "scan001.pdf");
        let candidate = context.candidate();

        let taken = [candidate.clone()];
        let resolved = context.resolve(|name| taken.contains(&name.to_string()));
        assert_eq!(
            resolved,
            "24-08-04_SS400_1.6x1219xC_東京製鉄_K12345_1.pdf"
        );
    }
}
