//! Process command - extract invoice fields from a single file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use etims_core::ExtractionResult;

use super::{build_pipeline, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show extraction confidence scores
    #[arg(long)]
    show_confidence: bool,
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

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let pipeline = build_pipeline(config)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Processing {}", args.input.display()));

    let result = pipeline.extract(&args.input);

    pb.finish_with_message("Done");

    if !result.extraction_errors.is_empty() {
        eprintln!("{}", style("Extraction issues:").yellow());
        for error in &result.extraction_errors {
            eprintln!("  - {}", error);
        }
    }

    let output = format_result(&result, args.format)?;

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

    if args.show_confidence {
        println!();
        let scores = &result.confidence_scores;
        println!("{} Confidence scores:", style("ℹ").blue());
        println!("  invoice_number:   {:.2}", scores.invoice_number);
        println!("  invoice_amount:   {:.2}", scores.invoice_amount);
        println!("  invoice_date:     {:.2}", scores.invoice_date);
        println!("  due_date:         {:.2}", scores.due_date);
        println!("  supplier_kra_pin: {:.2}", scores.supplier_kra_pin);
        println!("  buyer_kra_pin:    {:.2}", scores.buyer_kra_pin);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if !result.extraction_success {
        anyhow::bail!("Extraction failed: core fields missing");
    }

    Ok(())
}

/// Render an extraction result in the requested output format.
pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "invoice_number",
        "invoice_amount",
        "invoice_date",
        "due_date",
        "supplier_kra_pin",
        "buyer_kra_pin",
        "buyer_name",
        "seller_name",
        "extraction_success",
    ])?;
    writer.write_record([
        result.fields.invoice_number.clone().unwrap_or_default(),
        result
            .fields
            .invoice_amount
            .map(|a| a.to_string())
            .unwrap_or_default(),
        result
            .fields
            .invoice_date
            .map(|d| d.to_string())
            .unwrap_or_default(),
        result
            .fields
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_default(),
        result.fields.supplier_kra_pin.clone().unwrap_or_default(),
        result.fields.buyer_kra_pin.clone().unwrap_or_default(),
        result.fields.buyer_details.name.clone().unwrap_or_default(),
        result.fields.seller_details.name.clone().unwrap_or_default(),
        result.extraction_success.to_string(),
    ])?;

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV output: {e}"))?;
    Ok(String::from_utf8(bytes)?)
}

fn format_text(result: &ExtractionResult) -> String {
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());

    let mut lines = vec![
        format!("Invoice number:  {}", show(&result.fields.invoice_number)),
        format!(
            "Amount:          {}",
            result
                .fields
                .invoice_amount
                .map(|a| format!("KES {a}"))
                .unwrap_or_else(|| "-".to_string())
        ),
        format!(
            "Invoice date:    {}",
            result
                .fields
                .invoice_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string())
        ),
        format!(
            "Due date:        {}",
            result
                .fields
                .due_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string())
        ),
        format!("Supplier PIN:    {}", show(&result.fields.supplier_kra_pin)),
        format!("Buyer PIN:       {}", show(&result.fields.buyer_kra_pin)),
        format!("Buyer:           {}", show(&result.fields.buyer_details.name)),
        format!("Seller:          {}", show(&result.fields.seller_details.name)),
    ];

    lines.push(format!(
        "Status:          {}",
        if result.extraction_success {
            "extracted"
        } else {
            "incomplete"
        }
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use etims_core::EtimsParser;

    fn sample_result() -> ExtractionResult {
        EtimsParser::new()
            .parse("SCU ID: ABC12345\nTotal Amount: KES 60,000.00\nDate Created: 2025-12-17")
    }

    #[test]
    fn test_json_format_round_trips() {
        let output = format_result(&sample_result(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["invoice_number"], "ABC12345");
        assert_eq!(value["extraction_success"], true);
    }

    #[test]
    fn test_csv_format_has_header_and_row() {
        let output = format_result(&sample_result(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = output.trim_end().lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("invoice_number,"));
        assert!(lines[1].contains("ABC12345"));
        assert!(lines[1].contains("60000.00"));
    }

    #[test]
    fn test_text_format_marks_missing_fields() {
        let output = format_result(&sample_result(), OutputFormat::Text).unwrap();
        assert!(output.contains("ABC12345"));
        assert!(output.contains("Supplier PIN:    -"));
        assert!(output.contains("Status:          extracted"));
    }
}
