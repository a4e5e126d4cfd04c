//! Models command - inspect OCR model files.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use sevadoc_core::SevadocConfig;

use super::load_config;

/// Arguments for the models command.
#[derive(Args)]
pub struct ModelsArgs {
    #[command(subcommand)]
    command: ModelsCommand,

    /// Model directory (overrides configuration)
    #[arg(short, long, global = true)]
    model_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ModelsCommand {
    /// Check which model files are present
    Status,

    /// Show the model directory
    Path,
}

/// A model file the recognizer needs.
struct ModelFile {
    role: String,
    path: PathBuf,
}

pub async fn run(args: ModelsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(model_dir) = args.model_dir {
        config.models.model_dir = model_dir;
    }

    match args.command {
        ModelsCommand::Status => check_status(&config),
        ModelsCommand::Path => show_path(&config),
    }
}

/// Every file loaded for the configured scripts.
fn required_files(config: &SevadocConfig) -> Vec<ModelFile> {
    let mut files = vec![ModelFile {
        role: "detection".to_string(),
        path: config.model_path(&config.models.detection_model),
    }];

    for script in &config.ocr.scripts {
        let (recognition, dictionary) = config.recognition_paths(*script);
        files.push(ModelFile {
            role: format!("{} recognition", script),
            path: recognition,
        });
        files.push(ModelFile {
            role: format!("{} dictionary", script),
            path: dictionary,
        });
    }

    files
}

fn check_status(config: &SevadocConfig) -> anyhow::Result<()> {
    println!("{}", style("Model Status").bold());
    println!("Model directory: {}", style(config.models.model_dir.display()).cyan());
    println!();

    if config.ocr.scripts.is_empty() {
        println!("{} No recognition scripts configured", style("⚠").yellow());
        return Ok(());
    }

    let mut all_present = true;
    let mut total_size: u64 = 0;

    for file in required_files(config) {
        let (status, size_str) = match file_size(&file.path) {
            Some(size) => {
                total_size += size;
                (style("✓").green(), format_size(size))
            }
            None => {
                all_present = false;
                (style("✗").red(), "missing".to_string())
            }
        };

        let name = file
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        println!("    {} {:<24} {:<25} {:>10}", status, file.role, name, size_str);
    }

    println!();
    if all_present {
        println!(
            "{} Ready ({} total)",
            style("✓").green(),
            format_size(total_size)
        );
    } else {
        println!(
            "{} Place the missing files in {} or point 'models.model_dir' at them",
            style("⚠").yellow(),
            config.models.model_dir.display()
        );
    }

    Ok(())
}

fn show_path(config: &SevadocConfig) -> anyhow::Result<()> {
    let model_dir = &config.models.model_dir;

    println!("Model directory: {}", model_dir.display());

    if model_dir.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
    }

    Ok(())
}

fn file_size(path: &Path) -> Option<u64> {
    fs::metadata(path).ok().filter(|m| m.is_file()).map(|m| m.len())
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1_000_000_000 {
        format!("{:.1}GB", bytes as f64 / 1_000_000_000.0)
    } else if bytes >= 1_000_000 {
        format!("{:.1}MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1}KB", bytes as f64 / 1_000.0)
    } else {
        format!("{}B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sevadoc_core::Script;

    #[test]
    fn test_required_files_follow_scripts() {
        let mut config = SevadocConfig::default();
        config.ocr.scripts = vec![Script::Devanagari];

        let roles: Vec<String> = required_files(&config).into_iter().map(|f| f.role).collect();
        assert_eq!(
            roles,
            vec!["detection", "devanagari recognition", "devanagari dictionary"]
        );
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(2_500), "2.5KB");
        assert_eq!(format_size(12_300_000), "12.3MB");
    }
}
