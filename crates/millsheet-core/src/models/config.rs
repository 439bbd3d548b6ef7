//! Configuration structures for the renaming pipeline.
//!
//! Directories and file patterns are always passed in explicitly by the
//! caller; the core never reads them from the environment.

use serde::{Deserialize, Serialize};

/// Main configuration for the millsheet pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MillsheetConfig {
    /// Upstream text-source configuration.
    pub source: SourceConfig,

    /// Renaming configuration.
    pub rename: RenameConfig,
}

/// Settings handed to the external OCR/rasterization collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// DPI for rendering the certificate page before text detection.
    pub render_dpi: u32,

    /// Page to read (1-indexed); mill sheets carry everything on page one.
    pub page: u32,

    /// Language hints for the text detection service.
    pub language_hints: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            render_dpi: 300,
            page: 1,
            language_hints: vec!["ja".to_string(), "en".to_string()],
        }
    }
}

/// Settings for the rename step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Extension of the sidecar file holding a document's OCR text.
    pub text_suffix: String,

    /// Keep processing the batch when a single document fails.
    pub continue_on_error: bool,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            text_suffix: "txt".to_string(),
            continue_on_error: true,
        }
    }
}

impl MillsheetConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
