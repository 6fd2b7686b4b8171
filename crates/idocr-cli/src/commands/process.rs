//! Process command - extract fields from a single OCR fragment dump.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use idocr_core::models::config::IdOcrConfig;
use idocr_core::ocr::load_image;
use idocr_core::{DocumentProcessor, ProcessOutcome, RecordedOcr};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// OCR fragment dump (JSON array of {bbox, text, confidence})
    #[arg(required = true)]
    input: PathBuf,

    /// Card image the fragments were recognized from, for the quality gate
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip the blur and contrast checks
    #[arg(long)]
    no_quality: bool,
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

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.no_quality {
        config.quality.enabled = false;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let processor = DocumentProcessor::from_config(&config);
    let outcome = process_dump(&args.input, args.image.as_deref(), &processor, &config)?;

    let output = format_outcome(&outcome, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if let Some(rejection) = outcome.rejection() {
        anyhow::bail!("{}", rejection);
    }

    Ok(())
}

/// Run one fragment dump through the pipeline, gating on its image when given.
pub fn process_dump(
    input: &Path,
    image: Option<&Path>,
    processor: &DocumentProcessor,
    config: &IdOcrConfig,
) -> anyhow::Result<ProcessOutcome> {
    let engine = RecordedOcr::from_file(input)
        .map_err(|e| anyhow::anyhow!("Failed to read fragments from {}: {}", input.display(), e))?;
    debug!("Loaded {} fragments", engine.fragments().len());

    match image {
        Some(image_path) => {
            let image = load_image(image_path, &config.input)
                .map_err(|e| anyhow::anyhow!("Rejected image {}: {}", image_path.display(), e))?;
            Ok(processor.scan(&engine, &image)?)
        }
        None => {
            let mut fragments = engine.into_fragments();
            Ok(processor.process(&mut fragments))
        }
    }
}

pub fn format_outcome(outcome: &ProcessOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Csv => format_csv(outcome),
        OutputFormat::Text => Ok(format_text(outcome)),
    }
}

/// Field labels and values in output order.
fn outcome_fields(outcome: &ProcessOutcome) -> Vec<(&'static str, String)> {
    let value = |field: &Option<String>| field.clone().unwrap_or_default();

    match outcome {
        ProcessOutcome::Aadhaar(record) => vec![
            ("aadhaar_number", value(&record.aadhaar_number)),
            ("name", value(&record.name)),
            ("dob", value(&record.dob)),
            ("gender", value(&record.gender)),
        ],
        ProcessOutcome::Pan(record) => vec![
            ("document_type", record.document_type.clone()),
            ("pan_number", value(&record.pan_number)),
            ("name", value(&record.name)),
            ("fathers_name", value(&record.fathers_name)),
            ("dob", value(&record.dob)),
        ],
        ProcessOutcome::Rejected(rejection) => vec![("error", rejection.to_string())],
    }
}

fn format_csv(outcome: &ProcessOutcome) -> anyhow::Result<String> {
    let fields = outcome_fields(outcome);
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(fields.iter().map(|(label, _)| *label))?;
    wtr.write_record(fields.iter().map(|(_, value)| value.as_str()))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(outcome: &ProcessOutcome) -> String {
    let mut output = format!("Document: {}\n", outcome.document_type());

    for (label, value) in outcome_fields(outcome) {
        if label == "document_type" {
            continue;
        }
        let value = if value.is_empty() { "-" } else { value.as_str() };
        output.push_str(&format!("  {:<15} {}\n", format!("{}:", label), value));
    }

    output
}
