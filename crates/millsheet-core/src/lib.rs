//! Core library for mill sheet renaming.
//!
//! This crate provides:
//! - Field extraction from OCR'd mill certificate text (issue date, steel
//!   grade, dimensions, manufacturer, charge number)
//! - Filename synthesis with sanitization and collision-free resolution
//! - A pipeline driver that wires injected text-source and rename
//!   collaborators around the pure core
//!
//! The core performs no I/O itself: it consumes one string of document
//! text and produces a structured record plus a filename string.

pub mod error;
pub mod models;
pub mod naming;
pub mod pipeline;
pub mod sheet;

pub use error::{MillsheetError, RenameError, Result, SourceError};
pub use models::config::MillsheetConfig;
pub use models::document::MillSheetInfo;
pub use naming::{NamingContext, build_filename, make_unique, sanitize_for_filename};
pub use pipeline::{DocumentStore, Pipeline, ProcessOutcome, RenamedDocument, TextSource};
pub use sheet::{MillSheetParser, ParseResult};
