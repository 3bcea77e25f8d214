//! Normalize command - extract fields from a saved service response.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use mortgage_core::DocumentResponse;

use super::load_config;
use super::output::{FormatOptions, OutputFormat, format_record, to_json};

/// Arguments for the normalize command.
#[derive(Args)]
pub struct NormalizeArgs {
    /// Saved document service response (JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also write the JSON record to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append loan analysis to text output
    #[arg(long)]
    analyze: bool,
}

pub fn run(args: NormalizeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Normalizing response: {}", args.input.display());

    let content = fs::read_to_string(&args.input)?;
    let response = DocumentResponse::from_json(&content).map_err(|e| {
        anyhow::anyhow!("{} is not a document service response: {}", args.input.display(), e)
    })?;

    let record = mortgage_core::normalize(response);

    if let Some(output_path) = &args.output {
        fs::write(output_path, to_json(&record, config.output.pretty_json)?)?;
        eprintln!(
            "{} Record written to {}",
            style("✓").green(),
            output_path.display()
        );
    }

    let options = FormatOptions {
        format: args.format,
        pretty_json: config.output.pretty_json,
        analyze: args.analyze || config.output.analyze,
    };
    println!("{}", format_record(&record, options)?);

    Ok(())
}
