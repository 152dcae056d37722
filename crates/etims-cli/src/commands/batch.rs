//! Batch processing command for multiple invoice files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use etims_core::ExtractionResult;

use super::{build_pipeline, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file JSON results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let pipeline = build_pipeline(config)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "png" | "jpg" | "jpeg")
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
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let extraction = pipeline.extract(&path);

        if extraction.extraction_success {
            results.push(FileResult {
                path: path.clone(),
                result: Some(extraction),
                error: None,
            });
        } else {
            let error_msg = extraction
                .extraction_errors
                .first()
                .cloned()
                .unwrap_or_else(|| "extraction failed".to_string());

            if args.continue_on_error {
                warn!("Failed to process {}: {}", path.display(), error_msg);
                results.push(FileResult {
                    path: path.clone(),
                    result: Some(extraction),
                    error: Some(error_msg),
                });
            } else {
                error!("Failed to process {}: {}", path.display(), error_msg);
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    // Write per-file outputs
    if let Some(ref output_dir) = args.output_dir {
        for file_result in results.iter().filter(|r| r.error.is_none()) {
            if let Some(ref extraction) = file_result.result {
                let output_name = file_result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("invoice");
                let output_path = output_dir.join(format!("{}.json", output_name));

                fs::write(&output_path, serde_json::to_string_pretty(extraction)?)?;
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

    let successful = results.iter().filter(|r| r.error.is_none()).count();
    let failed = results.len() - successful;

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
        style(failed).red()
    );

    if failed > 0 {
        println!();
        println!("{}", style("Failed files:").red());
        for file_result in results.iter().filter(|r| r.error.is_some()) {
            println!(
                "  - {}: {}",
                file_result.path.display(),
                file_result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Write a one-row-per-file CSV summary.
fn write_summary(path: &PathBuf, results: &[FileResult]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record([
        "file",
        "invoice_number",
        "invoice_amount",
        "invoice_date",
        "supplier_kra_pin",
        "buyer_kra_pin",
        "extraction_success",
        "error",
    ])?;

    for file_result in results {
        let fields = file_result.result.as_ref().map(|r| &r.fields);
        writer.write_record([
            file_result.path.display().to_string(),
            fields
                .and_then(|f| f.invoice_number.clone())
                .unwrap_or_default(),
            fields
                .and_then(|f| f.invoice_amount.map(|a| a.to_string()))
                .unwrap_or_default(),
            fields
                .and_then(|f| f.invoice_date.map(|d| d.to_string()))
                .unwrap_or_default(),
            fields
                .and_then(|f| f.supplier_kra_pin.clone())
                .unwrap_or_default(),
            fields
                .and_then(|f| f.buyer_kra_pin.clone())
                .unwrap_or_default(),
            file_result
                .result
                .as_ref()
                .map(|r| r.extraction_success.to_string())
                .unwrap_or_else(|| "false".to_string()),
            file_result.error.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
