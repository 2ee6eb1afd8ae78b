//! Ordered audit log of extraction decisions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::report::Field;

/// Append-only log with one line per capture or correction.
///
/// Lines read `<field> => <value> (<source>)` and are kept in evaluation
/// order. Nothing in the engine reads the trace back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebugTrace {
    lines: Vec<String>,
}

impl DebugTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a captured or corrected value.
    pub fn record(&mut self, field: Field, value: &str, source: &str) {
        tracing::trace!(%field, value, source, "field captured");
        self.lines.push(format!("{} => {} ({})", field, value, source));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Newline-joined rendering.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for DebugTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_format() {
        let mut trace = DebugTrace::new();
        trace.record(Field::TubingOd, "2.441", "OD");
        trace.record(Field::WellName, "SPT-115", "SPT");

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.render(), "tubing_od => 2.441 (OD)\nwell_name => SPT-115 (SPT)");
        assert_eq!(
            serde_json::to_string(&trace).unwrap(),
            r#"["tubing_od => 2.441 (OD)","well_name => SPT-115 (SPT)"]"#
        );
    }
}
