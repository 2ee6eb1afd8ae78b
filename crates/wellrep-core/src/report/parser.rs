//! Rule engine combining anchor rules, depth resolution, pump search and
//! cross-field corrections.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::models::report::{Field, FieldMap, ValueSet};

use super::rules::{
    anchors::{apply_anchor_rules, ANCHOR_RULES},
    corrections::{apply_corrections, CORRECTIONS},
    depths::{resolve_depths, DepthMarker},
    pump::resolve_pump_depth,
};
use super::trace::DebugTrace;

/// Values and trace produced by one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Extracted fields, in evaluation order.
    pub values: ValueSet,
    /// One line per capture or correction.
    pub trace: DebugTrace,
}

impl Extraction {
    /// Render the requested fields, absent ones as empty strings.
    pub fn to_schema_map(&self, fields: &[Field]) -> FieldMap {
        FieldMap::from_lookup(fields, |f| self.values.get(f).map(str::to_string))
    }
}

/// Trait for report parsing.
///
/// Parsing never fails: unknown text yields an empty extraction.
pub trait ReportParser {
    fn parse(&self, text: &str) -> Extraction;
}

/// Deterministic rule-based extractor.
///
/// Holds no per-call state, so one engine can be shared between threads.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    /// Whether the OD/ID/COMP/PROFD block may supply the pump depth.
    pump_block_fallback: bool,
    /// Whether cross-field corrections run.
    corrections: bool,
}

impl RuleEngine {
    /// Create an engine with every stage enabled.
    pub fn new() -> Self {
        Self {
            pump_block_fallback: true,
            corrections: true,
        }
    }

    pub fn with_pump_block_fallback(mut self, enabled: bool) -> Self {
        self.pump_block_fallback = enabled;
        self
    }

    pub fn with_corrections(mut self, enabled: bool) -> Self {
        self.corrections = enabled;
        self
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportParser for RuleEngine {
    fn parse(&self, text: &str) -> Extraction {
        let start = Instant::now();
        info!("Extracting report fields from {} characters of text", text.len());

        let mut values = ValueSet::new();
        let mut trace = DebugTrace::new();

        let captured = apply_anchor_rules(&ANCHOR_RULES, text, &mut values, &mut trace);
        debug!("anchor rules captured {} values", captured);

        resolve_depths(&DepthMarker::tubing(), text, &mut values, &mut trace);
        resolve_pump_depth(text, self.pump_block_fallback, &mut values, &mut trace);

        if self.corrections {
            values = apply_corrections(CORRECTIONS, values, &mut trace);
        }

        debug!(
            "Extracted {} fields in {:?}",
            values.len(),
            start.elapsed()
        );

        Extraction { values, trace }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REPORT: &str = r#"
        RELATÓRIO DE COMPLETAÇÃO - POÇO SPT-115
        Mesa rotativa: 5,20 m

        REVESTIMENTO DE PRODUÇÃO 5 1/2" J-55
        PESO DO REVESTIMENTO 17,0 lb/pé
        SAPATA 1.480,00

        TUBOS DE PRODUÇÃO 2 7/8" EU
        OD 2,875   ID 2,441
        COMP 9,65  PROFD 1.200,5
        PROFD 980,0
        PROFD 1.350,31

        HASTE POLIDA 1 1/4" x 26'
        ÂNCORA DE TUBOS 1.290,0
        PARTE SUPERIOR DA BOMBA
          assentada a 1.310,40 m
        INTERVALO CANHONEADO 1.402,5 a 1.410,0
        TAMPÃO 1.455,00
    "#;

    #[test]
    fn test_parse_full_report() {
        let extraction = RuleEngine::new().parse(REPORT);
        let v = &extraction.values;

        assert_eq!(v.get(Field::WellName), Some("SPT-115"));
        assert_eq!(v.get(Field::KbOffset), Some("5.20"));
        assert_eq!(v.get(Field::CasingOd), Some("5 1/2"));
        assert_eq!(v.get(Field::CasingWeight), Some("17.0"));
        assert_eq!(v.get(Field::CasingBottom), Some("1480.00"));
        assert_eq!(v.get(Field::TubingOd), Some("2.875"));
        assert_eq!(v.get(Field::TubingId), Some("2.441"));
        assert_eq!(v.get(Field::TubingAvgJointLength), Some("9.65"));
        assert_eq!(v.get(Field::TubingTop), Some("980"));
        assert_eq!(v.get(Field::TubingBottom), Some("1350.31"));
        assert_eq!(v.get(Field::RodString), Some("1 1/4\""));
        assert_eq!(v.get(Field::TubingAnchor), Some("1290.0"));
        assert_eq!(v.get(Field::PcPumpDepth), Some("1310.4"));
        assert_eq!(v.get(Field::PerforationTop), Some("1402.5"));
        assert_eq!(v.get(Field::PerforationBottom), Some("1410.0"));
        assert_eq!(v.get(Field::Plugback), Some("1455.00"));
        assert_eq!(extraction.trace.len(), v.len());
    }

    #[test]
    fn test_empty_text() {
        let extraction = RuleEngine::new().parse("");
        assert!(extraction.values.is_empty());
        assert!(extraction.trace.is_empty());
    }

    #[test]
    fn test_inner_diameter_discards_weight() {
        let extraction = RuleEngine::new().parse("PESO 6,5\nOD 2.441\nID 2,992");
        assert_eq!(extraction.values.get(Field::TubingOd), Some("2.441"));
        assert_eq!(extraction.values.get(Field::TubingId), Some("2.992"));
        assert_eq!(extraction.values.get(Field::TubingWeight), None);
        assert_eq!(
            extraction.trace.lines().last().map(String::as_str),
            Some("tubing_weight => 6.5 (discarded: tubing_id present)")
        );
    }

    #[test]
    fn test_corrections_can_be_disabled() {
        let extraction = RuleEngine::new()
            .with_corrections(false)
            .parse("PESO 2,441");
        assert_eq!(extraction.values.get(Field::TubingWeight), Some("2.441"));

        let extraction = RuleEngine::new().parse("PESO 2,441");
        assert_eq!(extraction.values.get(Field::TubingWeight), None);
        assert_eq!(extraction.values.get(Field::TubingId), Some("2.441"));
    }

    #[test]
    fn test_schema_map_renders_absence() {
        let extraction = RuleEngine::new().parse("SPT-7");
        let map = extraction.to_schema_map(&Field::SCHEMA);
        assert_eq!(map.len(), Field::SCHEMA.len());
        assert_eq!(map.get(Field::WellName), Some("SPT-7"));
        assert_eq!(map.get(Field::Plugback), Some(""));
    }
}
