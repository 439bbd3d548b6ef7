//! Dimension extraction.
//!
//! Dimension triples (`thickness x width x length`) are structurally
//! indistinguishable from other numeric noise on a certificate, so every
//! syntactic match is filtered through a plausibility check before it is
//! accepted. Thickness must fall in 0.1-100 mm, width in 100-5000 mm and
//! exceed the thickness; a length is either numeric (>= 100 mm) or a coil
//! marker, which normalizes to `C`.

use regex::{Captures, Regex};

use super::patterns::{
    DIM_COMMA_COIL, DIM_COMMA_LENGTH, DIM_DECIMAL_COIL, DIM_GENERIC_TRIPLE, DIM_LABELED_TW,
    DIM_OCR_SPACED, DIM_PLAIN_COIL, DIM_SECTION, DIM_T_PREFIX, DIM_TRIPLE, DIM_TW_SUFFIX,
};
use super::{ExtractionMatch, FieldExtractor};

/// How a pattern's capture groups map onto thickness/width/length.
#[derive(Debug, Clone, Copy)]
enum Groups {
    /// Five groups: OCR split the thickness decimals and width thousands.
    SpacedSplit,
    /// Three groups: thickness, width, length.
    Triple,
    /// Two groups: thickness, width.
    Pair,
}

/// Dimension patterns in priority order, most constrained first. The
/// generic triple sits near the end so the validator, not the pattern,
/// is what separates dimensions from stray number runs.
fn dimension_rules() -> [(&'static Regex, Groups, f32); 10] {
    [
        (&*DIM_OCR_SPACED, Groups::SpacedSplit, 0.9),
        (&*DIM_COMMA_COIL, Groups::Triple, 0.9),
        (&*DIM_PLAIN_COIL, Groups::Triple, 0.9),
        (&*DIM_TRIPLE, Groups::Triple, 0.9),
        (&*DIM_COMMA_LENGTH, Groups::Triple, 0.9),
        (&*DIM_DECIMAL_COIL, Groups::Triple, 0.8),
        (&*DIM_T_PREFIX, Groups::Triple, 0.8),
        (&*DIM_GENERIC_TRIPLE, Groups::Triple, 0.7),
        (&*DIM_LABELED_TW, Groups::Pair, 0.8),
        (&*DIM_TW_SUFFIX, Groups::Pair, 0.7),
    ]
}

/// Dimension extractor.
pub struct DimensionExtractor;

impl DimensionExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DimensionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DimensionExtractor {
    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch> {
        let mut results: Vec<ExtractionMatch> = Vec::new();

        // Prefer the lines around a DIMENSIONS/寸法 label, then fall back
        // to the whole sheet.
        if let Some(section) = dimension_section(text) {
            collect(&section, &mut results);
        }
        collect(text, &mut results);

        results
    }
}

/// Extract dimensions from text as `T x W[ x L]`, `x`-joined.
pub fn extract_dimensions(text: &str) -> Option<String> {
    DimensionExtractor::new().extract(text).map(|m| m.value)
}

/// The label line plus the line after it, where the value usually lands.
fn dimension_section(text: &str) -> Option<String> {
    let caps = DIM_SECTION.captures(text)?;
    let label_line = caps.get(0)?.as_str();
    let next_line = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    Some(format!("{label_line}{next_line}"))
}

fn collect(window: &str, results: &mut Vec<ExtractionMatch>) {
    for (re, groups, confidence) in dimension_rules() {
        for caps in re.captures_iter(window) {
            if let Some(dims) = accept(&caps, groups) {
                if results.iter().any(|r| r.value == dims) {
                    continue;
                }
                let m = caps.get(0).unwrap();
                results.push(ExtractionMatch::new(dims, confidence, m.as_str()));
            }
        }
    }
}

/// Validate and normalize one candidate match; `None` keeps the cascade
/// going.
fn accept(caps: &Captures, groups: Groups) -> Option<String> {
    match groups {
        Groups::SpacedSplit => {
            let thickness = format!("{}.{}", &caps[1], &caps[2]);
            let width = format!("{}{}", &caps[3], &caps[4]);
            let length = &caps[5];

            if !is_valid_dimension(&thickness, &width, Some(length)) {
                return None;
            }
            Some(format!(
                "{}x{}x{}",
                format_thickness(&thickness),
                width,
                normalize_length(length)
            ))
        }
        Groups::Triple => {
            let thickness = &caps[1];
            let width = process_width(&caps[2]);
            let length = &caps[3];

            if !is_valid_dimension(thickness, &width, Some(length)) {
                return None;
            }
            Some(format!(
                "{}x{}x{}",
                format_thickness(thickness),
                width,
                normalize_length(length)
            ))
        }
        Groups::Pair => {
            let thickness = &caps[1];
            let width = process_width(&caps[2]);

            if !is_valid_dimension(thickness, &width, None) {
                return None;
            }
            Some(format!("{}x{}", format_thickness(thickness), width))
        }
    }
}

/// Plausibility check for a dimension candidate.
///
/// A length that is neither numeric nor a coil marker is tolerated; OCR
/// garbage in the length slot should not discard an otherwise good
/// thickness/width pair.
pub fn is_valid_dimension(thickness: &str, width: &str, length: Option<&str>) -> bool {
    let t: f64 = match thickness.replace(',', "").parse() {
        Ok(v) => v,
        Err(_) => return false,
    };
    let w: f64 = match width.replace(',', "").parse() {
        Ok(v) => v,
        Err(_) => return false,
    };

    if !(0.1..=100.0).contains(&t) {
        return false;
    }
    if !(100.0..=5000.0).contains(&w) {
        return false;
    }
    if w <= t {
        return false;
    }

    if let Some(l) = length {
        if !is_coil(l) {
            if let Ok(len) = l.replace(',', "").parse::<f64>() {
                if len < 100.0 {
                    return false;
                }
            }
        }
    }

    true
}

fn is_coil(length: &str) -> bool {
    let upper = length.to_uppercase();
    upper == "COIL" || upper == "コイル" || upper == "C"
}

/// Strip the thousands comma and undo the `1.540`-for-`1540` misread.
fn process_width(width: &str) -> String {
    let width = width.replace(',', "");

    let bytes = width.as_bytes();
    let looks_misread = matches!(width.find('.'), Some(dot) if dot <= 2 && bytes.len() - dot == 4);
    if looks_misread && width.chars().filter(|c| *c == '.').count() == 1 {
        width.replace('.', "")
    } else {
        width
    }
}

/// Drop insignificant zeros: `22.00` -> `22`, `1.60` -> `1.6`.
fn format_thickness(thickness: &str) -> String {
    match thickness.parse::<f64>() {
        Ok(t) if t == t.trunc() => format!("{}", t as i64),
        Ok(t) => format!("{t:.2}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
        Err(_) => thickness.to_string(),
    }
}

fn normalize_length(length: &str) -> String {
    if is_coil(length) {
        "C".to_string()
    } else {
        length.to_string()
    }
}
