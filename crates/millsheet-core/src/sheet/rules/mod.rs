//! Rule-based field extractors for mill certificates.
//!
//! Every extractor is an ordered cascade: patterns are tried in a fixed
//! priority order (specific before generic) and the first candidate that
//! passes the field's validation wins. A candidate that matches
//! syntactically but fails validation does not stop the cascade.
//! The extractors are independent and share no state; the same substring
//! may be claimed by more than one field.

pub mod charge;
pub mod date;
pub mod dimensions;
pub mod manufacturer;
pub mod material;
pub mod patterns;

pub use charge::{ChargeNoExtractor, extract_charge_no};
pub use date::{DateExtractor, extract_date};
pub use dimensions::{DimensionExtractor, extract_dimensions, is_valid_dimension};
pub use manufacturer::{ManufacturerExtractor, extract_manufacturer};
pub use material::{MaterialExtractor, extract_material};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// Extract the highest-priority occurrence of the field.
    fn extract(&self, text: &str) -> Option<ExtractionMatch> {
        self.extract_all(text).into_iter().next()
    }

    /// Extract all accepted occurrences, highest priority first.
    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch>;
}

/// An accepted field candidate with its provenance.
///
/// All mill sheet fields normalize to strings, so the match carries the
/// normalized value directly rather than a typed payload.
#[derive(Debug, Clone)]
pub struct ExtractionMatch {
    /// Normalized field value.
    pub value: String,
    /// Confidence score (0.0 - 1.0); labeled matches rank above shape
    /// heuristics.
    pub confidence: f32,
    /// Byte position of the match in the source text, when known.
    pub position: Option<(usize, usize)>,
    /// Text fragment the value was derived from.
    pub source: String,
}

impl ExtractionMatch {
    pub fn new(value: impl Into<String>, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
