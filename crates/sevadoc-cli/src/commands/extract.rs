//! Extract command - OCR a single document image and extract its fields.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use sevadoc_core::{
    create_recognizer, DocumentProcessor, DocumentType, ProcessOutcome, UNREADABLE_MESSAGE,
};

use super::load_config;
use super::output::{format_outcome, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input image (PNG, JPEG, ...)
    #[arg(required = true)]
    input: PathBuf,

    /// Document type (aadhaar, pan, electricity_bill, gas_bill, property_doc)
    #[arg(short, long)]
    doc_type: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.models.model_dir = model_dir.clone();
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    if args.doc_type.parse::<DocumentType>().is_err() {
        eprintln!(
            "{} Unknown document type '{}', returning raw text",
            style("ℹ").blue(),
            args.doc_type
        );
    }

    info!("Processing file: {}", args.input.display());

    let bytes = fs::read(&args.input)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Running OCR...");

    let doc_type = args.doc_type.clone();
    let outcome = tokio::task::spawn_blocking(move || -> anyhow::Result<ProcessOutcome> {
        let recognizer = create_recognizer(&config)
            .map_err(|e| anyhow::anyhow!("Failed to load OCR models: {}", e))?;
        let processor = DocumentProcessor::new(recognizer, &config);
        Ok(processor.process(&bytes, &doc_type))
    })
    .await??;

    pb.finish_and_clear();

    let output = format_outcome(&outcome, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if outcome.is_unreadable() {
        anyhow::bail!("{}: {}", UNREADABLE_MESSAGE, args.input.display());
    }

    Ok(())
}
