//! Pipeline driver: text source -> parser -> naming -> rename.
//!
//! The driver owns the sequencing and the per-document outcome
//! packaging; the collaborators that touch the outside world (OCR text
//! acquisition, filesystem renames) are injected through the
//! [`TextSource`] and [`DocumentStore`] traits so the core stays free of
//! I/O and fully testable.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{MillsheetError, Result, SourceError};
use crate::models::document::MillSheetInfo;
use crate::naming::NamingContext;
use crate::sheet::MillSheetParser;

/// Upstream collaborator: produces the text of a document's first page.
///
/// Implementations must report failure as a single error, never as
/// partial text.
pub trait TextSource {
    fn text_for(&self, document: &Path) -> Result<String>;
}

/// Downstream collaborator: name existence and renames in a target
/// directory.
pub trait DocumentStore {
    /// Whether `name` already exists in `directory`.
    fn exists(&self, directory: &Path, name: &str) -> bool;

    /// Rename (or copy) `from` to `to` within the same directory.
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
}

/// A successfully processed document.
#[derive(Debug, Clone)]
pub struct RenamedDocument {
    /// Original filename.
    pub original_name: String,
    /// Collision-free new filename.
    pub new_name: String,
    /// Record extracted from the document text.
    pub info: MillSheetInfo,
}

/// Per-document outcome. One document failing never aborts a batch.
#[derive(Debug)]
pub enum ProcessOutcome {
    Renamed(RenamedDocument),
    Failed {
        original_name: String,
        error: MillsheetError,
    },
}

impl ProcessOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessOutcome::Renamed(_))
    }

    pub fn original_name(&self) -> &str {
        match self {
            ProcessOutcome::Renamed(doc) => &doc.original_name,
            ProcessOutcome::Failed { original_name, .. } => original_name,
        }
    }
}

/// Sequences one document through extraction, naming and renaming.
pub struct Pipeline<S, D> {
    source: S,
    store: D,
    parser: MillSheetParser,
}

impl<S: TextSource, D: DocumentStore> Pipeline<S, D> {
    pub fn new(source: S, store: D) -> Self {
        Self {
            source,
            store,
            parser: MillSheetParser::new(),
        }
    }

    /// Extract and name a document without renaming it.
    ///
    /// Empty text from the source is the one hard failure here: with no
    /// text there is nothing to name the document after.
    pub fn preview(&self, document: &Path) -> Result<RenamedDocument> {
        let original_name = document
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let text = self.source.text_for(document)?;
        if text.trim().is_empty() {
            return Err(SourceError::EmptyText.into());
        }

        let parsed = self.parser.parse(&text);
        for warning in &parsed.warnings {
            debug!("{}: {}", original_name, warning);
        }

        let directory = document.parent().unwrap_or_else(|| Path::new("."));
        let context = NamingContext::new(&parsed.info, &original_name);
        let new_name = context.resolve(|name| self.store.exists(directory, name));

        Ok(RenamedDocument {
            original_name,
            new_name,
            info: parsed.info,
        })
    }

    /// Process one document: resolve the unique name and claim it with a
    /// rename in the same step.
    ///
    /// The store's existence check and the rename are only atomic with
    /// respect to other documents when callers drive one directory from
    /// a single task; this driver does not serialize across threads.
    pub fn process(&self, document: &Path) -> ProcessOutcome {
        match self.rename_document(document) {
            Ok(renamed) => {
                info!("{} -> {}", renamed.original_name, renamed.new_name);
                ProcessOutcome::Renamed(renamed)
            }
            Err(error) => {
                warn!("{}: {}", document.display(), error);
                ProcessOutcome::Failed {
                    original_name: document
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    error,
                }
            }
        }
    }

    /// Process a batch sequentially; failures are collected, not raised.
    pub fn process_batch(&self, documents: &[PathBuf]) -> Vec<ProcessOutcome> {
        documents.iter().map(|doc| self.process(doc)).collect()
    }

    fn rename_document(&self, document: &Path) -> Result<RenamedDocument> {
        let renamed = self.preview(document)?;
        let directory = document.parent().unwrap_or_else(|| Path::new("."));
        self.store
            .rename(document, &directory.join(&renamed.new_name))?;
        Ok(renamed)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    use super::*;

    struct FixedTexts(HashMap<PathBuf, String>);

    impl TextSource for FixedTexts {
        fn text_for(&self, document: &Path) -> Result<String> {
            self.0
                .get(document)
                .cloned()
                .ok_or_else(|| SourceError::Unreadable(document.display().to_string()).into())
        }
    }

    /// In-memory directory that records renames and claims new names,
    /// the way a real directory would.
    struct MemoryStore {
        names: RefCell<HashSet<String>>,
        renames: RefCell<Vec<(PathBuf, PathBuf)>>,
    }

    impl MemoryStore {
        fn with_names(names: &[&str]) -> Self {
            Self {
                names: RefCell::new(names.iter().map(|n| n.to_string()).collect()),
                renames: RefCell::new(Vec::new()),
            }
        }
    }

    impl DocumentStore for MemoryStore {
        fn exists(&self, _directory: &Path, name: &str) -> bool {
            self.names.borrow().contains(name)
        }

        fn rename(&self, from: &Path, to: &Path) -> Result<()> {
            let to_name = to.file_name().unwrap().to_string_lossy().into_owned();
            self.names.borrow_mut().insert(to_name);
            self.renames
                .borrow_mut()
                .push((from.to_path_buf(), to.to_path_buf()));
            Ok(())
        }
    }

    fn texts(entries: &[(&str, &str)]) -> FixedTexts {
        FixedTexts(
            entries
                .iter()
                .map(|(path, text)| (PathBuf::from(path), text.to_string()))
                .collect(),
        )
    }

    const SHEET: &str = "発行日 2024.08.04\nSS400\n1.6x1219xCOIL\n東京製鉄\n溶鋼番号: K12345";

    #[test]
    fn test_process_renames_with_extracted_fields() {
        let pipeline = Pipeline::new(
            texts(&[("in/scan001.pdf", SHEET)]),
            MemoryStore::with_names(&[]),
        );

        let outcome = pipeline.process(Path::new("in/scan001.pdf"));
        match outcome {
            ProcessOutcome::Renamed(doc) => {
                assert_eq!(doc.original_name, "scan001.pdf");
                assert_eq!(doc.new_name, "24-08-04_SS400_1.6x1219xC_東京製鉄_K12345.pdf");
            }
            ProcessOutcome::Failed { error, .. } => panic!("unexpected failure: {error}"),
        }
    }

    #[test]
    fn test_unrecognized_sheet_falls_back_to_stem() {
        let pipeline = Pipeline::new(
            texts(&[("in/scan001.pdf", "nothing recognizable here")]),
            MemoryStore::with_names(&[]),
        );

        let preview = pipeline.preview(Path::new("in/scan001.pdf")).unwrap();
        assert_eq!(preview.new_name, "scan001_renamed.pdf");
        assert!(!preview.info.has_fields());
    }

    #[test]
    fn test_empty_text_is_a_hard_failure() {
        let pipeline = Pipeline::new(
            texts(&[("in/blank.pdf", "   \n\n  ")]),
            MemoryStore::with_names(&[]),
        );

        let outcome = pipeline.process(Path::new("in/blank.pdf"));
        match outcome {
            ProcessOutcome::Failed {
                original_name,
                error,
            } => {
                assert_eq!(original_name, "blank.pdf");
                assert!(matches!(
                    error,
                    MillsheetError::Source(SourceError::EmptyText)
                ));
            }
            ProcessOutcome::Renamed(doc) => panic!("unexpected rename to {}", doc.new_name),
        }
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let pipeline = Pipeline::new(
            texts(&[("in/a.pdf", SHEET), ("in/blank.pdf", "")]),
            MemoryStore::with_names(&[]),
        );

        let outcomes = pipeline.process_batch(&[
            PathBuf::from("in/a.pdf"),
            PathBuf::from("in/blank.pdf"),
            PathBuf::from("in/missing.pdf"),
        ]);

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_success());
        assert!(!outcomes[1].is_success());
        assert!(!outcomes[2].is_success());
        assert_eq!(outcomes[2].original_name(), "missing.pdf");
    }

    #[test]
    fn test_identical_sheets_resolve_to_distinct_names() {
        // Two certificates with the same fields in one directory: the
        // second must see the first's claimed name and take _1.
        let pipeline = Pipeline::new(
            texts(&[("in/a.pdf", SHEET), ("in/b.pdf", SHEET)]),
            MemoryStore::with_names(&[]),
        );

        let outcomes =
            pipeline.process_batch(&[PathBuf::from("in/a.pdf"), PathBuf::from("in/b.pdf")]);

        let names: Vec<_> = outcomes
            .iter()
            .map(|o| match o {
                ProcessOutcome::Renamed(doc) => doc.new_name.clone(),
                ProcessOutcome::Failed { error, .. } => panic!("unexpected failure: {error}"),
            })
            .collect();

        assert_eq!(names[0], "24-08-04_SS400_1.6x1219xC_東京製鉄_K12345.pdf");
        assert_eq!(names[1], "24-08-04_SS400_1.6x1219xC_東京製鉄_K12345_1.pdf");
    }

    #[test]
    fn test_existing_names_are_skipped() {
        let pipeline = Pipeline::new(
            texts(&[("in/scan001.pdf", "junk text")]),
            MemoryStore::with_names(&["scan001_renamed.pdf", "scan001_renamed_1.pdf"]),
        );

        let preview = pipeline.preview(Path::new("in/scan001.pdf")).unwrap();
        assert_eq!(preview.new_name, "scan001_renamed_2.pdf");
    }
}
