//! Output document and its JSON, CSV and text renderings.

use serde::Serialize;

use wellrep_core::{DebugTrace, Field, FieldMap, PdfText, ValueSet};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Extracted values, either only those found or the full schema.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReportValues {
    Present(ValueSet),
    Schema(FieldMap),
}

impl ReportValues {
    /// Rows for tabular output. Absent and empty values are `None`.
    pub fn rows(&self) -> Vec<(Field, Option<&str>)> {
        match self {
            ReportValues::Present(values) => Field::ALL
                .iter()
                .map(|&field| (field, values.get(field)))
                .filter(|(field, value)| Field::SCHEMA.contains(field) || value.is_some())
                .collect(),
            ReportValues::Schema(map) => map
                .iter()
                .map(|(field, value)| (field, Some(value).filter(|v| !v.is_empty())))
                .collect(),
        }
    }

    /// Number of fields with a value.
    pub fn filled(&self) -> usize {
        match self {
            ReportValues::Present(values) => values.len(),
            ReportValues::Schema(map) => map.filled(),
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match self {
            ReportValues::Present(values) => values.get(field),
            ReportValues::Schema(map) => map.get(field).filter(|v| !v.is_empty()),
        }
    }
}

/// Everything produced for one input.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub source: String,
    pub provider: String,
    pub meta: PdfText,
    pub values: ReportValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<DebugTrace>,
}

pub fn render(report: &ExtractionReport, format: OutputFormat, placeholder: &str) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report, placeholder)),
    }
}

fn format_csv(report: &ExtractionReport) -> anyhow::Result<String> {
    let rows = report.values.rows();
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(rows.iter().map(|(field, _)| field.as_str()))?;
    wtr.write_record(rows.iter().map(|(_, value)| value.unwrap_or("")))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &ExtractionReport, placeholder: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Source: {}\n", report.source));
    output.push_str(&format!(
        "Provider: {} ({}, {} characters)\n",
        report.provider,
        report.meta.method.as_str(),
        report.meta.length
    ));
    output.push('\n');

    let rows = report.values.rows();
    let width = rows.iter().map(|(f, _)| f.label().chars().count()).max().unwrap_or(0);
    for (field, value) in rows {
        output.push_str(&format!(
            "{:<width$}  {}\n",
            field.label(),
            value.unwrap_or(placeholder),
            width = width
        ));
    }

    if let Some(trace) = &report.trace {
        output.push_str("\nTrace:\n");
        for line in trace.lines() {
            output.push_str(&format!("  {}\n", line));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wellrep_core::{ReportParser, RuleEngine};

    fn report(text: &str) -> ExtractionReport {
        let extraction = RuleEngine::new().parse(text);
        ExtractionReport {
            source: "poco.txt".to_string(),
            provider: "rules".to_string(),
            meta: PdfText::manual(text),
            values: ReportValues::Present(extraction.values),
            trace: Some(extraction.trace),
        }
    }

    #[test]
    fn test_csv_has_schema_header() {
        let csv = render(&report("SPT-115"), OutputFormat::Csv, "-").unwrap();
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("well_name,"));
        assert_eq!(header.split(',').count(), Field::SCHEMA.len());
        assert!(lines.next().unwrap().starts_with("SPT-115,"));
    }

    #[test]
    fn test_text_uses_placeholder() {
        let text = render(&report("SPT-115"), OutputFormat::Text, "Não presente no PDF").unwrap();
        assert!(text.contains("SPT-115"));
        assert!(text.contains("Não presente no PDF"));
        assert!(text.contains("well_name => SPT-115 (SPT)"));
    }

    #[test]
    fn test_json_omits_missing_trace() {
        let mut report = report("SPT-115");
        report.trace = None;
        let json: serde_json::Value =
            serde_json::from_str(&render(&report, OutputFormat::Json, "").unwrap()).unwrap();
        assert_eq!(json["values"]["well_name"], "SPT-115");
        assert_eq!(json["meta"]["method"], "text_manual");
        assert!(json.get("trace").is_none());
    }
}
