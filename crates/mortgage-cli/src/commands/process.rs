//! Process command - submit a single statement and extract its fields.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use mortgage_core::DocumentServiceClient;

use super::load_config;
use super::output::{FormatOptions, OutputFormat, format_record, to_json};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input statement file (PDF or image)
    #[arg(required_unless_present = "url", conflicts_with = "url")]
    input: Option<PathBuf>,

    /// Process a document at this URL instead of a local file
    #[arg(long)]
    url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also write the JSON record to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the raw service response instead of the summary
    #[arg(long)]
    raw: bool,

    /// Append loan analysis to text output
    #[arg(long)]
    analyze: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let client = DocumentServiceClient::from_env(&config.service)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(120));

    let response = match (&args.input, &args.url) {
        (Some(path), _) => {
            info!("Processing file: {}", path.display());
            pb.set_message(format!("Submitting {}...", path.display()));
            client.acquire(path).await
        }
        (None, Some(url)) => {
            info!("Processing URL: {}", url);
            pb.set_message(format!("Submitting {}...", url));
            client.acquire_from_url(url).await
        }
        (None, None) => anyhow::bail!("Provide an input file or --url"),
    };

    pb.finish_and_clear();
    let response = response?;

    let record = mortgage_core::normalize(response);

    if let Some(output_path) = &args.output {
        fs::write(output_path, to_json(&record, config.output.pretty_json)?)?;
        eprintln!(
            "{} Record written to {}",
            style("✓").green(),
            output_path.display()
        );
    }

    if args.raw {
        println!("{}", to_json(&record.raw_response, config.output.pretty_json)?);
    } else {
        let options = FormatOptions {
            format: args.format,
            pretty_json: config.output.pretty_json,
            analyze: args.analyze || config.output.analyze,
        };
        println!("{}", format_record(&record, options)?);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
