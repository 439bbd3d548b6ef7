//! Rename command - process PDFs against their sidecar OCR text.
//!
//! The OCR service itself lives outside this tool; it leaves one text
//! dump next to each PDF (`scan001.pdf` -> `scan001.txt`). This command
//! wires that sidecar reader and the local filesystem into the core
//! pipeline and renames each PDF in place.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use millsheet_core::error::{RenameError, Result, SourceError};
use millsheet_core::models::config::MillsheetConfig;
use millsheet_core::pipeline::{DocumentStore, Pipeline, ProcessOutcome, TextSource};

/// Arguments for the rename command.
#[derive(Args)]
pub struct RenameArgs {
    /// Input PDF files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Extension of the sidecar OCR text files
    #[arg(short, long)]
    text_suffix: Option<String>,

    /// Show the new names without renaming anything
    #[arg(long)]
    dry_run: bool,

    /// Write a summary CSV next to the processed files
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Stop at the first failed document
    #[arg(long)]
    fail_fast: bool,
}

/// Reads the OCR text dump sitting next to a document.
struct SidecarTextSource {
    suffix: String,
}

impl TextSource for SidecarTextSource {
    fn text_for(&self, document: &Path) -> Result<String> {
        let sidecar = document.with_extension(&self.suffix);
        fs::read_to_string(&sidecar).map_err(|e| {
            SourceError::Unreadable(format!("{}: {}", sidecar.display(), e)).into()
        })
    }
}

/// The real filesystem as the rename collaborator.
struct FsStore;

impl DocumentStore for FsStore {
    fn exists(&self, directory: &Path, name: &str) -> bool {
        directory.join(name).exists()
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        if !from.exists() {
            return Err(RenameError::SourceMissing(from.display().to_string()).into());
        }
        fs::rename(from, to)
            .map_err(|e| RenameError::Failed(format!("{} -> {}: {}", from.display(), to.display(), e)).into())
    }
}

pub async fn run(args: RenameArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        MillsheetConfig::from_file(Path::new(path))?
    } else {
        MillsheetConfig::default()
    };

    let text_suffix = args
        .text_suffix
        .clone()
        .unwrap_or(config.rename.text_suffix)
        .trim_start_matches('.')
        .to_string();

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("pdf")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching PDF files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pipeline = Pipeline::new(SidecarTextSource { suffix: text_suffix }, FsStore);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut outcomes = Vec::with_capacity(files.len());

    for path in &files {
        debug!("Processing {}", path.display());

        let outcome = if args.dry_run {
            match pipeline.preview(path) {
                Ok(doc) => ProcessOutcome::Renamed(doc),
                Err(error) => ProcessOutcome::Failed {
                    original_name: path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    error,
                },
            }
        } else {
            pipeline.process(path)
        };

        if !outcome.is_success() {
            warn!("Failed to process {}", path.display());
            if args.fail_fast {
                pb.finish_and_clear();
                if let ProcessOutcome::Failed { error, .. } = &outcome {
                    anyhow::bail!("Processing failed: {error}");
                }
            }
        }

        outcomes.push(outcome);
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    // Per-file results
    println!();
    for outcome in &outcomes {
        match outcome {
            ProcessOutcome::Renamed(doc) => {
                println!("{} {}", style("✓").green(), doc.original_name);
                println!("    → {}", style(&doc.new_name).bold());
            }
            ProcessOutcome::Failed {
                original_name,
                error,
            } => {
                println!("{} {}", style("✗").red(), original_name);
                println!("    {}", style(error).red());
            }
        }
    }

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &outcomes)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = outcomes.iter().filter(|o| o.is_success()).count();
    let failed = outcomes.len() - successful;

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed{}",
        style(successful).green(),
        style(failed).red(),
        if args.dry_run { " (dry run)" } else { "" }
    );

    Ok(())
}

fn write_summary(path: &Path, outcomes: &[ProcessOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "original_name",
        "status",
        "new_name",
        "date",
        "material",
        "dimensions",
        "manufacturer",
        "charge_no",
        "error",
    ])?;

    for outcome in outcomes {
        match outcome {
            ProcessOutcome::Renamed(doc) => {
                wtr.write_record([
                    doc.original_name.as_str(),
                    "success",
                    doc.new_name.as_str(),
                    doc.info.date.as_deref().unwrap_or(""),
                    doc.info.material.as_deref().unwrap_or(""),
                    doc.info.dimensions.as_deref().unwrap_or(""),
                    doc.info.manufacturer.as_deref().unwrap_or(""),
                    doc.info.charge_no.as_deref().unwrap_or(""),
                    "",
                ])?;
            }
            ProcessOutcome::Failed {
                original_name,
                error,
            } => {
                wtr.write_record([
                    original_name.as_str(),
                    "error",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    &error.to_string(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
