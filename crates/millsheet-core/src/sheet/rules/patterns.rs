//! Common regex patterns for mill certificate extraction.
//!
//! Pattern order is encoded by the extractor that consumes them; this
//! module only names and compiles the patterns once.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Labeled issue dates (発行日 2024.08.04 etc.); the label may be
    // separated from the value by layout noise, hence the bounded window.
    pub static ref ISSUE_DATE_LABEL: Regex = Regex::new(
        r"(?i)(?:発行年月日|発行日|Date\s*of\s*Issue)[\s\S]{0,50}?(\d{4}[./-]\d{1,2}[./-]\d{1,2})"
    ).unwrap();

    // Numeric date inside a labeled fragment.
    pub static ref NUMERIC_DATE_VALUE: Regex = Regex::new(
        r"(\d{4})[./-](\d{1,2})[./-](\d{1,2})"
    ).unwrap();

    // English month-name dates: AUG . 04 . 2025, 04-AUG-2025, 2025/AUG/04.
    pub static ref DATE_ENGLISH_MDY: Regex = Regex::new(
        r"(?i)\b([A-Z]{3,9})\s*[.,/-]\s*(\d{1,2})\s*[.,/-]\s*(\d{4})\b"
    ).unwrap();

    pub static ref DATE_ENGLISH_DMY: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s*[.,/-]\s*([A-Z]{3,9})\s*[.,/-]\s*(\d{4})\b"
    ).unwrap();

    pub static ref DATE_ENGLISH_YMD: Regex = Regex::new(
        r"(?i)\b(\d{4})\s*[.,/-]\s*([A-Z]{3,9})\s*[.,/-]\s*(\d{1,2})\b"
    ).unwrap();

    // Literal-year dates: 2024年1月15日, 2024/1/15, 2024-01-15, 2024.01.15.
    pub static ref DATE_JP_YMD: Regex = Regex::new(
        r"(\d{4})年(\d{1,2})月(\d{1,2})日"
    ).unwrap();

    pub static ref DATE_SLASH_YMD: Regex = Regex::new(
        r"\b(\d{4})/(\d{1,2})/(\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_DASH_YMD: Regex = Regex::new(
        r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_DOT_YMD: Regex = Regex::new(
        r"\b(\d{4})\.(\d{1,2})\.(\d{1,2})\b"
    ).unwrap();

    // Era dates. Reiwa 1 = 2019, Heisei 1 = 1989.
    pub static ref DATE_REIWA: Regex = Regex::new(
        r"令和(\d{1,2})年(\d{1,2})月(\d{1,2})日"
    ).unwrap();

    pub static ref DATE_REIWA_SHORT: Regex = Regex::new(
        r"(?i)\bR(\d{1,2})\.(\d{1,2})\.(\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_HEISEI: Regex = Regex::new(
        r"平成(\d{1,2})年(\d{1,2})月(\d{1,2})日"
    ).unwrap();

    // Steel grade patterns, most specific family first; the generic
    // catch-all stays last so SUS/SCM/SM grades resolve to their own
    // families. OCR likes to insert a space between prefix and digits.
    pub static ref MATERIAL_GRADES: Vec<Regex> = [
        r"\b(SS\s*[234]\d{2})\b",          // structural (SS400)
        r"\b(SPH[CDE]|SPC[CDE])\b",        // hot/cold rolled sheet
        r"\b(SEC[CD])\b",                  // electro-galvanized
        r"\b(SG[CH]C)\b",                  // hot-dip galvanized
        r"\b(S\d{2}C)\b",                  // carbon steel for machining (S45C)
        r"\b(SCM\d{3})\b",                 // chrome-moly
        r"\b(SUS\s*\d{3}[A-Z]?)\b",        // stainless (SUS304, SUS316L)
        r"\b(SK\d{1,2})\b",                // carbon tool steel
        r"\b(SM\d{3}[A-C]?)\b",            // welded structural
        r"\b(STKR\d{3})\b",                // square tube
        r"\b(STK\d{3})\b",                 // round tube
        r"\b(S[A-Z]{1,3}\d{2,3}[A-Z]?)\b", // generic fallback
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
    .collect();

    // Dimension section label; the value often lands on the next line.
    pub static ref DIM_SECTION: Regex = Regex::new(
        r"(?i)(?:DIMENSIONS?|寸法)[^\n]*\n?([^\n]+)"
    ).unwrap();

    // 22. 00X1, 540XCOIL - OCR splits the thickness decimals and the
    // width thousands group with stray spaces.
    pub static ref DIM_OCR_SPACED: Regex = Regex::new(
        r"(?i)(\d{1,2})\.\s*(\d{2})\s*[xX×]\s*(\d)[,.]?\s*(\d{3})\s*[xX×]\s*(COIL|コイル|C)\b"
    ).unwrap();

    // 1.60X1,535XCOIL - comma-grouped width.
    pub static ref DIM_COMMA_COIL: Regex = Regex::new(
        r"(?i)(\d+\.?\d*)\s*[xX×]\s*(\d{1,2},\d{3})\s*[xX×]\s*(COIL|コイル|C)\b"
    ).unwrap();

    // 1.6x1535xCOIL - plain width.
    pub static ref DIM_PLAIN_COIL: Regex = Regex::new(
        r"(?i)(\d+\.?\d*)\s*[xX×]\s*(\d{3,4})\s*[xX×]\s*(COIL|コイル|C)\b"
    ).unwrap();

    // 1.6X1219X2438 - cut sheet triple.
    pub static ref DIM_TRIPLE: Regex = Regex::new(
        r"(\d+\.?\d*)\s*[xX×]\s*(\d{3,4})\s*[xX×]\s*(\d{3,4})\b"
    ).unwrap();

    // 1.6X1,219X2438 - comma-grouped width with a numeric length.
    pub static ref DIM_COMMA_LENGTH: Regex = Regex::new(
        r"(\d+\.?\d*)\s*[xX×]\s*(\d{1,2},\d{3})\s*[xX×]\s*(\d{3,5})\b"
    ).unwrap();

    // 22.00X1.540XCOIL - thousands separator misread as a decimal point.
    pub static ref DIM_DECIMAL_COIL: Regex = Regex::new(
        r"(?i)(\d{1,2}\.?\d{0,2})[xX×](\d\.\d{3})[xX×](COIL|コイル|C)\b"
    ).unwrap();

    // t1.6 x 1219 x COIL / t1.6 x 1219 x 2438.
    pub static ref DIM_T_PREFIX: Regex = Regex::new(
        r"(?i)t\s*(\d+\.?\d*)\s*[xX×]\s*(\d+\.?\d*)\s*[xX×]\s*(COIL|コイル|C|\d+\.?\d*)"
    ).unwrap();

    // Any three numbers joined by x; the validator does the real work.
    pub static ref DIM_GENERIC_TRIPLE: Regex = Regex::new(
        r"(\d+\.?\d*)\s*[xX×]\s*(\d+\.?\d*)\s*[xX×]\s*(\d+\.?\d*)"
    ).unwrap();

    // 板厚1.6 ... 幅1219 - labeled thickness/width pair.
    pub static ref DIM_LABELED_TW: Regex = Regex::new(
        r"板厚\s*(\d+\.?\d*)\s*.*?幅\s*(\d+\.?\d*)"
    ).unwrap();

    // 1.6t x 1219W - unit-suffixed pair.
    pub static ref DIM_TW_SUFFIX: Regex = Regex::new(
        r"(\d+\.?\d*)\s*[tT]\s*[xX×]\s*(\d+\.?\d*)\s*[wW]?"
    ).unwrap();

    // Labeled charge numbers; 溶銅 is a frequent OCR misread of 溶鋼.
    pub static ref CHARGE_LABELED: Regex = Regex::new(
        r"(?i)(?:溶[鋼銅]番号|CHARGE\s*N[oO]\.?|鋼番)[\s:：]*([A-Z0-9]{4,12})"
    ).unwrap();

    // Shape heuristics: K12345, AB123456, 1A23456.
    pub static ref CHARGE_ALPHA_DIGITS: Regex = Regex::new(
        r"\b([A-Z]{1,2}\d{4,8})\b"
    ).unwrap();

    pub static ref CHARGE_DIGIT_ALPHA_DIGITS: Regex = Regex::new(
        r"\b(\d{1,2}[A-Z]\d{4,6})\b"
    ).unwrap();

    // Freeform company names by steel-industry suffix.
    pub static ref MAKER_STEEL_SUFFIX: Regex = Regex::new(
        r"([^\s\n]{2,15}(?:製鉄|製鋼|製鐵))"
    ).unwrap();

    pub static ref MAKER_CORPORATE_SUFFIX: Regex = Regex::new(
        r"([^\s\n]{2,15}(?:株式会社|㈱))"
    ).unwrap();

    pub static ref MAKER_LABELED: Regex = Regex::new(
        r"(?i)(?:製造者|メーカー|manufacturer|maker)[:：]\s*([^\n]+)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        // lazy_static compiles on first access; touch each one.
        assert!(ISSUE_DATE_LABEL.is_match("発行日 2024.08.04"));
        assert!(DATE_ENGLISH_MDY.is_match("AUG . 04 . 2025"));
        assert_eq!(MATERIAL_GRADES.len(), 12);
        assert!(DIM_PLAIN_COIL.is_match("1.6x1535xCOIL"));
        assert!(CHARGE_LABELED.is_match("溶鋼番号: K12345"));
    }

    #[test]
    fn test_material_case_insensitive() {
        assert!(MATERIAL_GRADES[0].is_match("ss400"));
        assert!(MATERIAL_GRADES[6].is_match("sus 304"));
    }

    #[test]
    fn test_charge_shapes_are_case_sensitive() {
        // The shape heuristics only fire on uppercase tokens; OCR noise
        // in lowercase is too ambiguous.
        assert!(CHARGE_ALPHA_DIGITS.is_match("K12345"));
        assert!(!CHARGE_ALPHA_DIGITS.is_match("k12345"));
    }
}
