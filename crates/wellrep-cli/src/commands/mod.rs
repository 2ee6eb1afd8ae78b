//! Subcommands and the input/extraction plumbing they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod fields;
pub mod output;

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use wellrep_core::models::config::WellrepConfig;
use wellrep_core::pdf::read_document;
use wellrep_core::{Field, PdfText, ProviderKind, ReportParser, RuleProvider};

use crate::remote::RemoteProvider;
use output::{ExtractionReport, ReportValues};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wellrep")
        .join("config.json")
}

/// Load the explicit config file, else the default one if it exists, else
/// defaults. Environment overrides are applied last.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<WellrepConfig> {
    let mut config = match path {
        Some(path) => WellrepConfig::from_file(path)?,
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                WellrepConfig::from_file(&default_path)?
            } else {
                WellrepConfig::default()
            }
        }
    };
    config.apply_env();
    Ok(config)
}

/// Read report text from a PDF, a text file, or stdin (`-`).
pub fn read_input(input: &str, config: &WellrepConfig) -> anyhow::Result<PdfText> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(PdfText::manual(text));
    }

    let path = Path::new(input);
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    Ok(read_document(path, &config.pdf)?)
}

/// Resolve the provider name from the command line or configuration.
pub fn resolve_provider(requested: Option<&str>, config: &WellrepConfig) -> anyhow::Result<ProviderKind> {
    let name = requested.unwrap_or(&config.provider.default);
    Ok(name.parse::<ProviderKind>()?)
}

/// Options controlling one extraction.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    pub provider: ProviderKind,
    pub include_trace: bool,
    pub schema_only: bool,
}

/// Run the selected provider over `document` and assemble the report.
pub async fn extract_document(
    source: &str,
    document: PdfText,
    options: ExtractOptions,
    config: &WellrepConfig,
) -> anyhow::Result<ExtractionReport> {
    debug!("Extracting {} with provider {}", source, options.provider);

    let (values, trace) = if options.provider.is_remote() {
        let remote = RemoteProvider::from_config(options.provider, &config.provider)?;
        let map = remote.extract(&document.text, &Field::SCHEMA).await?;
        (ReportValues::Schema(map), None)
    } else {
        let extraction = RuleProvider::default().engine().parse(&document.text);
        let values = if options.schema_only {
            ReportValues::Schema(extraction.to_schema_map(&Field::SCHEMA))
        } else {
            ReportValues::Present(extraction.values)
        };
        (values, options.include_trace.then_some(extraction.trace))
    };

    Ok(ExtractionReport {
        source: source.to_string(),
        provider: options.provider.as_str().to_string(),
        meta: document,
        values,
        trace,
    })
}
