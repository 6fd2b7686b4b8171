//! Batch processing command for multiple fragment dumps.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use idocr_core::models::config::InputConfig;
use idocr_core::{DocumentProcessor, ProcessOutcome};

use super::config::load_config;
use super::process::{format_outcome, process_dump, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching fragment dumps (*.json)
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Skip the blur and contrast checks for dumps with a sibling image
    #[arg(long)]
    no_quality: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    outcome: Option<ProcessOutcome>,
    error: Option<String>,
    processing_time_ms: u64,
}

impl ProcessResult {
    fn status(&self) -> &'static str {
        match &self.outcome {
            Some(ProcessOutcome::Rejected(_)) => "rejected",
            Some(_) => "success",
            None => "error",
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.no_quality {
        config.quality.enabled = false;
    }

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let processor = DocumentProcessor::from_config(&config);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let image = sibling_image(&path, &config.input);
        if let Some(image) = &image {
            debug!("Gating {} on {}", path.display(), image.display());
        }

        let result = process_dump(&path, image.as_deref(), &processor, &config);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(outcome) => {
                results.push(ProcessResult {
                    path,
                    outcome: Some(outcome),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        outcome: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();

    for result in &results {
        if let (Some(outcome), Some(output_dir)) = (&result.outcome, &args.output_dir) {
            let output_name = result.path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document");

            let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));
            fs::write(&output_path, format_outcome(outcome, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args.output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let count = |status: &str| results.iter().filter(|r| r.status() == status).count();

    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} extracted, {} rejected, {} failed",
        style(count("success")).green(),
        style(count("rejected")).yellow(),
        style(count("error")).red()
    );

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Image next to the dump with the same stem and an accepted extension.
fn sibling_image(dump: &Path, policy: &InputConfig) -> Option<PathBuf> {
    policy
        .allowed_extensions
        .iter()
        .map(|ext| dump.with_extension(ext))
        .find(|candidate| candidate.is_file())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "document_type",
        "number",
        "name",
        "dob",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time = result.processing_time_ms.to_string();

        let (document_type, number, name, dob, error) = match &result.outcome {
            Some(ProcessOutcome::Aadhaar(record)) => (
                "aadhaar",
                record.aadhaar_number.clone(),
                record.name.clone(),
                record.dob.clone(),
                None,
            ),
            Some(ProcessOutcome::Pan(record)) => (
                "pan",
                record.pan_number.clone(),
                record.name.clone(),
                record.dob.clone(),
                None,
            ),
            Some(ProcessOutcome::Rejected(rejection)) => {
                ("unknown", None, None, None, Some(rejection.to_string()))
            }
            None => ("", None, None, None, result.error.clone()),
        };

        wtr.write_record([
            filename,
            result.status(),
            document_type,
            number.as_deref().unwrap_or(""),
            name.as_deref().unwrap_or(""),
            dob.as_deref().unwrap_or(""),
            time.as_str(),
            error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
