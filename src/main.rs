//! railml-export - CLI tool to export editor scenes as RailML documents.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use railml_export::config::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use railml_export::{
    build_document, generate_text_summary, generate_validation_report, parse_scene_file,
    validate_document_str, validate_export_data, CanvasDimensions, ExportOptions,
};

/// Export railway track-layout scenes as RailML JSON and validate them.
#[derive(Parser, Debug)]
#[command(name = "railml-export")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input scene JSON file path
    #[arg(short, long, required_unless_present = "check")]
    input: Option<PathBuf>,

    /// Output RailML JSON file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_WIDTH)]
    width: f64,

    /// Canvas height in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_HEIGHT)]
    height: f64,

    /// Infrastructure id (generated from the export time if omitted)
    #[arg(long)]
    id: Option<String>,

    /// Infrastructure name
    #[arg(long)]
    name: Option<String>,

    /// Skip validation of the generated document
    #[arg(long)]
    no_validate: bool,

    /// Also write a plain-text validation report next to the output
    #[arg(long)]
    report: bool,

    /// Print a plain-text summary of the scene instead of exporting
    #[arg(long)]
    summary: bool,

    /// Validate an existing RailML JSON document and print the report
    #[arg(long, conflicts_with = "input")]
    check: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Some(path) = &args.check {
        return check_document(path);
    }

    let input = args
        .input
        .as_deref()
        .context("An input scene file is required")?;

    info!("Processing: {}", input.display());

    let scene = parse_scene_file(input)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    info!(
        "Parsed {} track(s) and {} component(s)",
        scene.tracks.len(),
        scene.components.len()
    );

    let canvas = CanvasDimensions::new(args.width, args.height);

    if args.summary {
        print!("{}", generate_text_summary(&scene, &canvas, Utc::now()));
        return Ok(());
    }

    validate_export_data(&scene).log();

    let options = ExportOptions {
        infrastructure_id: args.id.clone(),
        infrastructure_name: args.name.clone(),
        validate: !args.no_validate,
        ..ExportOptions::new(canvas)
    };

    let document = build_document(&scene, &options);
    let json = serde_json::to_string_pretty(&document).context("Failed to serialize document")?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input));

    std::fs::write(&output_path, &json)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!("Generated: {}", output_path.display());

    let Some(validation) = &document.railml.metadata.validation_result else {
        if args.report {
            warn!("No validation report written: validation was skipped");
        }
        return Ok(());
    };

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    if args.report {
        let report_path = report_path(&output_path);
        std::fs::write(&report_path, generate_validation_report(validation))
            .with_context(|| format!("Failed to write {}", report_path.display()))?;
        info!("Report: {}", report_path.display());
    }

    if !validation.is_valid {
        anyhow::bail!("Validation failed");
    }

    Ok(())
}

/// Validate an existing document and print its report.
fn check_document(path: &Path) -> Result<()> {
    info!("Checking: {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let result = validate_document_str(&content);
    print!("{}", generate_validation_report(&result));

    if !result.is_valid {
        anyhow::bail!("Validation failed");
    }

    Ok(())
}

/// `<dir>/<stem>.railml.json` next to the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scene");
    input.with_file_name(format!("{}.railml.json", stem))
}

/// Output path with a trailing `.json` replaced by `-validation-report.txt`.
fn report_path(output: &Path) -> PathBuf {
    let output = output.to_string_lossy();
    let base = output.strip_suffix(".json").unwrap_or(&output);
    PathBuf::from(format!("{}-validation-report.txt", base))
}
