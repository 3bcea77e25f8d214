//! Batch processing command for multiple statements.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use mortgage_core::{DocumentResponse, DocumentServiceClient, MortgageRecord};

use super::load_config;
use super::output::{CSV_HEADER, FormatOptions, OutputFormat, csv_row, format_record};

const DOCUMENT_EXTENSIONS: [&str; 8] = ["pdf", "png", "jpg", "jpeg", "tiff", "tif", "bmp", "webp"];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching the input files
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

    /// Number of documents in flight at once
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Treat inputs as saved service responses (JSON) and skip the service
    #[arg(long)]
    offline: bool,

    /// Append loan analysis to text output
    #[arg(long)]
    analyze: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    record: Option<MortgageRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file() && accepts(p, args.offline))
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

    let client = if args.offline {
        None
    } else {
        Some(DocumentServiceClient::from_env(&config.service)?)
    };

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut pending = stream::iter(files)
        .map(|path| {
            let client = client.clone();
            async move {
                let file_start = Instant::now();
                let result = match &client {
                    Some(client) => client.process_file(&path).await.map_err(anyhow::Error::from),
                    None => normalize_saved(&path),
                };
                (path, result, file_start.elapsed().as_millis() as u64)
            }
        })
        .buffer_unordered(args.jobs.max(1));

    let mut results = Vec::new();

    while let Some((path, result, processing_time_ms)) = pending.next().await {
        match result {
            Ok(record) => {
                results.push(ProcessResult {
                    path,
                    record: Some(record),
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
                        record: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    overall_pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    // Completion order is arbitrary; report in path order
    results.sort_by(|a, b| a.path.cmp(&b.path));

    let successful: Vec<_> = results.iter().filter(|r| r.record.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        let options = FormatOptions {
            format: args.format,
            pretty_json: config.output.pretty_json,
            analyze: args.analyze || config.output.analyze,
        };

        for result in &successful {
            if let Some(record) = &result.record {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("statement");

                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_record(record, options)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
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

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

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

fn accepts(path: &Path, offline: bool) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if offline {
        ext == "json"
    } else {
        DOCUMENT_EXTENSIONS.contains(&ext.as_str())
    }
}

fn normalize_saved(path: &Path) -> anyhow::Result<MortgageRecord> {
    let content = fs::read_to_string(path)?;
    let response = DocumentResponse::from_json(&content)?;
    Ok(mortgage_core::normalize(response))
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(CSV_HEADER);
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let mut row = vec![filename];
        match &result.record {
            Some(record) => {
                row.push("success".to_string());
                row.extend(csv_row(record));
            }
            None => {
                row.push("error".to_string());
                row.extend(CSV_HEADER.iter().map(|_| String::new()));
            }
        }
        row.push(result.processing_time_ms.to_string());
        row.push(result.error.clone().unwrap_or_default());

        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts() {
        assert!(accepts(Path::new("a/statement.PDF"), false));
        assert!(accepts(Path::new("scan.jpeg"), false));
        assert!(!accepts(Path::new("response.json"), false));
        assert!(accepts(Path::new("response.json"), true));
        assert!(!accepts(Path::new("statement.pdf"), true));
    }

    #[test]
    fn test_summary_rows_align() {
        let dir = tempfile::tempdir().unwrap();
        let summary = dir.path().join("summary.csv");

        let results = vec![
            ProcessResult {
                path: PathBuf::from("ok.json"),
                record: Some(mortgage_core::normalize(DocumentResponse::default())),
                error: None,
                processing_time_ms: 3,
            },
            ProcessResult {
                path: PathBuf::from("bad.json"),
                record: None,
                error: Some("boom".to_string()),
                processing_time_ms: 1,
            },
        ];

        write_summary(&summary, &results).unwrap();

        let mut reader = csv::Reader::from_path(&summary).unwrap();
        let width = reader.headers().unwrap().len();
        assert_eq!(width, CSV_HEADER.len() + 4);

        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == width));
        assert_eq!(&rows[1][1], "error");
        assert_eq!(&rows[1][width - 1], "boom");
    }
}
