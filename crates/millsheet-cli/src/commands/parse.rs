//! Parse command - extract fields from a single OCR text dump.

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use millsheet_core::models::document::MillSheetInfo;
use millsheet_core::naming::build_filename;
use millsheet_core::sheet::MillSheetParser;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input OCR text file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Original document name used for the fallback filename
    #[arg(short = 'n', long)]
    original_name: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Extracted record plus the name it would produce.
#[derive(Serialize)]
struct ParseReport<'a> {
    #[serde(flatten)]
    info: &'a MillSheetInfo,
    candidate_name: String,
    warnings: &'a [String],
}

pub async fn run(args: ParseArgs, _config_path: Option<&str>) -> anyhow::Result<()> {
    let text = if args.input.as_os_str() == "-" {
        io::read_to_string(io::stdin().lock())?
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        fs::read_to_string(&args.input)?
    };

    if text.trim().is_empty() {
        anyhow::bail!("Input contains no text");
    }

    info!("Parsing {} characters of OCR text", text.len());

    let result = MillSheetParser::new().parse(&text);

    // The fallback name defaults to the text file's own stem.
    let original_name = args.original_name.clone().unwrap_or_else(|| {
        let stem = args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        format!("{stem}.pdf")
    });

    let report = ParseReport {
        info: &result.info,
        candidate_name: build_filename(&result.info, &original_name),
        warnings: &result.warnings,
    };

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string(&report)?,
        OutputFormat::Csv => format_csv(&report)?,
        OutputFormat::Text => format_text(&report),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{rendered}");
    }

    Ok(())
}

fn format_csv(report: &ParseReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "date",
        "material",
        "dimensions",
        "manufacturer",
        "charge_no",
        "candidate_name",
    ])?;

    let info = report.info;
    wtr.write_record([
        info.date.as_deref().unwrap_or(""),
        info.material.as_deref().unwrap_or(""),
        info.dimensions.as_deref().unwrap_or(""),
        info.manufacturer.as_deref().unwrap_or(""),
        info.charge_no.as_deref().unwrap_or(""),
        &report.candidate_name,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &ParseReport) -> String {
    let mut output = String::new();
    let missing = style("not found").dim().to_string();
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| missing.clone());

    output.push_str(&format!("Date:         {}\n", field(&report.info.date)));
    output.push_str(&format!("Material:     {}\n", field(&report.info.material)));
    output.push_str(&format!("Dimensions:   {}\n", field(&report.info.dimensions)));
    output.push_str(&format!("Manufacturer: {}\n", field(&report.info.manufacturer)));
    output.push_str(&format!("Charge no:    {}\n", field(&report.info.charge_no)));
    output.push('\n');
    output.push_str(&format!("New filename: {}\n", report.candidate_name));

    output
}
