//! Collision-free filename resolution.

use std::path::Path;

/// Resolve `candidate` against a directory's name-existence predicate by
/// appending `_1`, `_2`, ... to the stem until the name is free.
///
/// The predicate is the caller's one window into the target directory;
/// callers processing documents concurrently must treat resolve-and-claim
/// as a single step per directory or two documents can race to the same
/// "unique" name. Directories are finite, so this terminates.
pub fn make_unique<F>(exists: F, candidate: &str) -> String
where
    F: Fn(&str) -> bool,
{
    let path = Path::new(candidate);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(candidate);
    let extension = path.extension().and_then(|s| s.to_str());

    let mut name = candidate.to_string();
    let mut counter = 1u64;

    while exists(&name) {
        name = match extension {
            Some(ext) => format!("{stem}_{counter}.{ext}"),
            None => format!("{stem}_{counter}"),
        };
        counter += 1;
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_name_unchanged() {
        assert_eq!(make_unique(|_| false, "a.pdf"), "a.pdf");
    }

    #[test]
    fn test_counter_skips_taken_names() {
        let taken = ["a.pdf", "a_1.pdf"];
        assert_eq!(
            make_unique(|name| taken.contains(&name), "a.pdf"),
            "a_2.pdf"
        );
    }

    #[test]
    fn test_counter_applies_to_stem() {
        let taken = ["24-01-15_SS400.pdf"];
        assert_eq!(
            make_unique(|name| taken.contains(&name), "24-01-15_SS400.pdf"),
            "24-01-15_SS400_1.pdf"
        );
    }

    #[test]
    fn test_extensionless_candidate() {
        let taken = ["report"];
        assert_eq!(make_unique(|name| taken.contains(&name), "report"), "report_1");
    }
}
