//! Issue date extraction.
//!
//! Mill sheets mix Japanese era dates, western numeric dates and English
//! month-name dates, often on the same certificate. Priority: labeled
//! issue dates, then English month-name layouts, then literal-year
//! numeric layouts, then era layouts. The output is always `YY-MM-DD`.

use regex::{Captures, Regex};

use super::patterns::{
    DATE_DASH_YMD, DATE_DOT_YMD, DATE_ENGLISH_DMY, DATE_ENGLISH_MDY, DATE_ENGLISH_YMD,
    DATE_HEISEI, DATE_JP_YMD, DATE_REIWA, DATE_REIWA_SHORT, DATE_SLASH_YMD, ISSUE_DATE_LABEL,
    NUMERIC_DATE_VALUE,
};
use super::{ExtractionMatch, FieldExtractor};

/// Japanese calendar era, used to convert era years to western years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Era {
    /// 令和 (2019-). Reiwa N = 2018 + N.
    Reiwa,
    /// 平成 (1989-2019). Heisei N = 1988 + N.
    Heisei,
}

impl Era {
    fn western_year(self, era_year: u32) -> u32 {
        match self {
            Era::Reiwa => 2018 + era_year,
            Era::Heisei => 1988 + era_year,
        }
    }
}

/// Numeric layouts in priority order, paired with the era that converts
/// the year group. `None` means the year is a literal western year.
fn numeric_rules() -> [(&'static Regex, Option<Era>); 7] {
    [
        (&*DATE_JP_YMD, None),
        (&*DATE_SLASH_YMD, None),
        (&*DATE_DASH_YMD, None),
        (&*DATE_DOT_YMD, None),
        (&*DATE_REIWA, Some(Era::Reiwa)),
        (&*DATE_REIWA_SHORT, Some(Era::Reiwa)),
        (&*DATE_HEISEI, Some(Era::Heisei)),
    ]
}

/// Issue date extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch> {
        let mut results: Vec<ExtractionMatch> = Vec::new();

        // Labeled issue dates outrank everything else on the sheet.
        for caps in ISSUE_DATE_LABEL.captures_iter(text) {
            if let Some(date) = parse_numeric_fragment(&caps[1]) {
                push_unique(&mut results, ExtractionMatch::new(date, 0.95, &caps[0]));
            }
        }

        // English month-name layouts: month-day-year, day-month-year,
        // year-month-day. An unrecognized month token rejects only that
        // candidate.
        for (re, layout) in [
            (&*DATE_ENGLISH_MDY, EnglishLayout::Mdy),
            (&*DATE_ENGLISH_DMY, EnglishLayout::Dmy),
            (&*DATE_ENGLISH_YMD, EnglishLayout::Ymd),
        ] {
            for caps in re.captures_iter(text) {
                if let Some(date) = parse_english(&caps, layout) {
                    let m = caps.get(0).unwrap();
                    push_unique(
                        &mut results,
                        ExtractionMatch::new(date, 0.9, m.as_str())
                            .with_position(m.start(), m.end()),
                    );
                }
            }
        }

        // Numeric and era layouts.
        for (re, era) in numeric_rules() {
            for caps in re.captures_iter(text) {
                if let Some(date) = parse_numeric(&caps, era) {
                    let m = caps.get(0).unwrap();
                    push_unique(
                        &mut results,
                        ExtractionMatch::new(date, 0.9, m.as_str())
                            .with_position(m.start(), m.end()),
                    );
                }
            }
        }

        results
    }
}

/// Extract the issue date from text as `YY-MM-DD`.
pub fn extract_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

#[derive(Debug, Clone, Copy)]
enum EnglishLayout {
    Mdy,
    Dmy,
    Ymd,
}

fn parse_english(caps: &Captures, layout: EnglishLayout) -> Option<String> {
    let (year, month, day) = match layout {
        EnglishLayout::Mdy => (
            caps[3].parse().ok()?,
            month_number(&caps[1])?,
            caps[2].parse().ok()?,
        ),
        EnglishLayout::Dmy => (
            caps[3].parse().ok()?,
            month_number(&caps[2])?,
            caps[1].parse().ok()?,
        ),
        EnglishLayout::Ymd => (
            caps[1].parse().ok()?,
            month_number(&caps[2])?,
            caps[3].parse().ok()?,
        ),
    };
    format_date(year, month, day)
}

fn parse_numeric(caps: &Captures, era: Option<Era>) -> Option<String> {
    let first: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;

    let year = match era {
        Some(era) => era.western_year(first),
        None => first,
    };
    format_date(year, month, day)
}

/// Parse a `YYYY sep M sep D` fragment captured next to an issue-date label.
fn parse_numeric_fragment(fragment: &str) -> Option<String> {
    let caps = NUMERIC_DATE_VALUE.captures(fragment)?;
    parse_numeric(&caps, None)
}

/// Format as `YY-MM-DD`, keeping only the last two year digits.
///
/// Month and day are range-checked but there is no day-of-month or leap
/// cross-check; OCR'd sheets are messy enough that `02-31` passes.
fn format_date(year: u32, month: u32, day: u32) -> Option<String> {
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some(format!("{:02}-{:02}-{:02}", year % 100, month, day))
}

fn month_number(token: &str) -> Option<u32> {
    match token.to_uppercase().as_str() {
        "JAN" | "JANUARY" => Some(1),
        "FEB" | "FEBRUARY" => Some(2),
        "MAR" | "MARCH" => Some(3),
        "APR" | "APRIL" => Some(4),
        "MAY" => Some(5),
        "JUN" | "JUNE" => Some(6),
        "JUL" | "JULY" => Some(7),
        "AUG" | "AUGUST" => Some(8),
        "SEP" | "SEPT" | "SEPTEMBER" => Some(9),
        "OCT" | "OCTOBER" => Some(10),
        "NOV" | "NOVEMBER" => Some(11),
        "DEC" | "DECEMBER" => Some(12),
        _ => None,
    }
}

fn push_unique(results: &mut Vec<ExtractionMatch>, candidate: ExtractionMatch) {
    if !results.iter().any(|r| r.value == candidate.value) {
        results.push(candidate);
    }
}
