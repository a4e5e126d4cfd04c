//! Rendering of processing outcomes.

use sevadoc_core::ProcessOutcome;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain `key: value` lines
    Text,
}

impl OutputFormat {
    /// File extension for outputs written in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_outcome(outcome: &ProcessOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(outcome)?),
        OutputFormat::Csv => format_csv(outcome),
        OutputFormat::Text => Ok(format_text(outcome)),
    }
}

fn format_csv(outcome: &ProcessOutcome) -> anyhow::Result<String> {
    let map = outcome.to_map();
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(map.keys())?;
    wtr.write_record(map.values())?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(outcome: &ProcessOutcome) -> String {
    let map = outcome.to_map();
    if map.is_empty() {
        return "No fields found\n".to_string();
    }

    let mut output = String::new();
    for (key, value) in &map {
        output.push_str(&format!("{}: {}\n", key, value));
    }
    output
}
