//! Extract command - fill the report fields from a single file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use super::output::{render, OutputFormat};
use super::{extract_document, load_config, read_input, resolve_provider, ExtractOptions};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or text), or `-` for stdin
    #[arg(required = true)]
    input: String,

    /// Extraction provider: rules, openai or ollama
    #[arg(short, long)]
    provider: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum PDF pages to read (0 = all)
    #[arg(long)]
    max_pages: Option<usize>,

    /// Include the extraction trace
    #[arg(long)]
    debug: bool,

    /// Render every schema field, absent ones as empty strings
    #[arg(long)]
    schema_only: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(max_pages) = args.max_pages {
        config.pdf.max_pages = max_pages;
    }

    let provider = resolve_provider(args.provider.as_deref(), &config)?;
    info!("Extracting {} with provider {}", args.input, provider);

    let document = read_input(&args.input, &config)?;
    if document.text.trim().is_empty() {
        eprintln!("{} No text found in {}", style("⚠").yellow(), args.input);
    }

    let options = ExtractOptions {
        provider,
        include_trace: args.debug || config.output.include_trace,
        schema_only: args.schema_only,
    };
    let report = extract_document(&args.input, document, options, &config).await?;

    let output = render(&report, args.format, &config.output.missing_placeholder)?;

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

    debug!(
        "Filled {} fields in {:?}",
        report.values.filled(),
        start.elapsed()
    );

    Ok(())
}
