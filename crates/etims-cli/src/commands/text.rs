//! Text command - recognize text without field extraction.

use std::path::PathBuf;

use clap::Args;
use console::style;

use super::{build_pipeline, load_config};

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Input file (PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Emit the full result as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

pub fn run(args: TextArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let pipeline = build_pipeline(config)?;

    let result = pipeline.extract_text(&args.input);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for error in &result.errors {
            eprintln!("{} {}", style("!").yellow(), error);
        }
        if result.success {
            println!("{}", result.text);
            eprintln!(
                "{} {} pages, confidence {:.2}",
                style("ℹ").blue(),
                result.pages,
                result.confidence
            );
        }
    }

    if !result.success {
        anyhow::bail!("No text could be extracted from {}", args.input.display());
    }

    Ok(())
}
