//! Text command - extract fields from already recognized text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use sevadoc_core::{DocumentParser, UNREADABLE_MESSAGE};

use super::load_config;
use super::output::{format_outcome, OutputFormat};

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Text file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Document type (aadhaar, pan, electricity_bill, gas_bill, property_doc)
    #[arg(short, long)]
    doc_type: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: TextArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        fs::read_to_string(&args.input)?
    };

    info!("Extracting {} fields from {} characters", args.doc_type, text.len());

    let parser = DocumentParser::with_config(&config.extraction);
    let outcome = parser.parse_tag(&text, &args.doc_type);

    println!("{}", format_outcome(&outcome, args.format)?.trim_end());

    if outcome.is_unreadable() {
        anyhow::bail!("{}", UNREADABLE_MESSAGE);
    }

    Ok(())
}
