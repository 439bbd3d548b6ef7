//! Filename fragment sanitization.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LINE_BREAKS: Regex = Regex::new(r"[\r\n]+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref UNDERSCORES: Regex = Regex::new(r"_+").unwrap();
}

/// Characters that are unsafe in filenames on at least one platform.
const INVALID_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Normalize arbitrary text into a safe filename fragment.
///
/// Line breaks collapse to a space, unsafe characters and whitespace
/// become underscores, underscore runs collapse, edges are trimmed and
/// the result is capped at 50 characters. Total over every input
/// (including the empty string) and idempotent.
pub fn sanitize_for_filename(text: &str) -> String {
    let result = LINE_BREAKS.replace_all(text, " ");

    let result: String = result
        .chars()
        .map(|c| if INVALID_CHARS.contains(&c) { '_' } else { c })
        .collect();

    let result = WHITESPACE.replace_all(&result, "_");
    let result = UNDERSCORES.replace_all(&result, "_");
    let result = result.trim_matches('_');

    // The cap counts characters, not bytes; these fragments are mostly
    // Japanese. Trim again so truncation cannot leave a trailing
    // underscore, which would break idempotence.
    result
        .chars()
        .take(50)
        .collect::<String>()
        .trim_end_matches('_')
        .to_string()
}
