//! Batch processing command for multiple document images.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use sevadoc_core::{create_recognizer, DocumentProcessor, DocumentType, ProcessOutcome};

use super::load_config;
use super::output::{format_outcome, OutputFormat};

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "webp", "tiff", "tif", "bmp"];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input images
    #[arg(required = true)]
    input: String,

    /// Document type shared by all inputs
    #[arg(short, long)]
    doc_type: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    outcome: Option<ProcessOutcome>,
    error: Option<String>,
    processing_time_ms: u64,
}

impl FileResult {
    fn status(&self) -> &'static str {
        match &self.outcome {
            Some(outcome) if outcome.is_unreadable() => "unreadable",
            Some(_) => "success",
            None => "error",
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.models.model_dir = model_dir.clone();
    }

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let doc_type = args.doc_type.clone();
    let continue_on_error = args.continue_on_error;
    let progress = pb.clone();

    let results = tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<FileResult>> {
        let recognizer = create_recognizer(&config)
            .map_err(|e| anyhow::anyhow!("Failed to load OCR models: {}", e))?;
        let processor = DocumentProcessor::new(recognizer, &config);

        let mut results = Vec::with_capacity(files.len());
        for path in files {
            let file_start = Instant::now();
            let outcome = fs::read(&path).map(|bytes| processor.process(&bytes, &doc_type));
            let processing_time_ms = file_start.elapsed().as_millis() as u64;

            match outcome {
                Ok(outcome) => results.push(FileResult {
                    path,
                    outcome: Some(outcome),
                    error: None,
                    processing_time_ms,
                }),
                Err(e) if continue_on_error => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    results.push(FileResult {
                        path,
                        outcome: None,
                        error: Some(e.to_string()),
                        processing_time_ms,
                    });
                }
                Err(e) => {
                    error!("Failed to read {}: {}", path.display(), e);
                    anyhow::bail!("Processing failed: {}", e);
                }
            }

            progress.inc(1);
        }
        Ok(results)
    })
    .await??;

    pb.finish_with_message("Complete");

    if let Some(output_dir) = &args.output_dir {
        let mut used_names = HashSet::new();
        if args.summary {
            used_names.insert("summary.csv".to_string());
        }

        for result in &results {
            let Some(outcome) = &result.outcome else {
                continue;
            };

            let output_name =
                output_file_name(&result.path, args.format.extension(), &mut used_names);
            let output_path = output_dir.join(output_name);

            fs::write(&output_path, format_outcome(outcome, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &args.doc_type, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = results.iter().filter(|r| r.status() == "success").count();
    let failed: Vec<_> = results.iter().filter(|r| r.status() != "success").collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            let reason = match (&result.error, &result.outcome) {
                (Some(error), _) => error.clone(),
                (None, Some(outcome)) => outcome.to_map().remove("error").unwrap_or_default(),
                (None, None) => "unknown error".to_string(),
            };
            println!("  - {}: {}", result.path.display(), reason);
        }
    }

    Ok(())
}

/// Output file name for an input: its stem plus the format extension, with a
/// `-2`, `-3`, ... suffix when an earlier input already took the name.
fn output_file_name(path: &Path, extension: &str, used: &mut HashSet<String>) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");

    let mut name = format!("{}.{}", stem, extension);
    let mut n = 1;
    while used.contains(&name) {
        n += 1;
        name = format!("{}-{}.{}", stem, n, extension);
    }

    if n > 1 {
        warn!("Output name for {} already taken, writing {}", path.display(), name);
    }
    used.insert(name.clone());
    name
}

/// Summary columns: file, status, one column per field, timing, error.
fn summary_columns(doc_type: &str) -> Vec<&'static str> {
    match doc_type.parse::<DocumentType>() {
        Ok(doc_type) => doc_type.fields().to_vec(),
        Err(_) => vec!["raw_text"],
    }
}

fn write_summary(path: &Path, doc_type: &str, results: &[FileResult]) -> anyhow::Result<()> {
    let columns = summary_columns(doc_type);
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(columns.iter().copied());
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let mut map = result
            .outcome
            .as_ref()
            .map(ProcessOutcome::to_map)
            .unwrap_or_default();

        let mut record = vec![filename.to_string(), result.status().to_string()];
        record.extend(columns.iter().map(|c| map.remove(*c).unwrap_or_default()));
        record.push(result.processing_time_ms.to_string());
        record.push(
            result
                .error
                .clone()
                .or_else(|| map.remove("error"))
                .unwrap_or_default(),
        );
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
