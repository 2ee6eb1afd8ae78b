//! Declarative anchor-and-capture rule table.
//!
//! Each rule pairs a labeled anchor with a target field. A single loop walks
//! the table; adding, reordering or disabling a rule never touches control
//! flow.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::numbers::{normalize_depth, normalize_number};
use super::patterns::*;
use crate::models::report::{Field, ValueSet};
use crate::report::trace::DebugTrace;

/// How a matched capture group becomes a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    /// Canonicalized numeric literal. A lone `.` stays a decimal point.
    Numeric,
    /// Canonicalized depth in meters. A `.` before three digits groups.
    Depth,
    /// Trimmed text, fractions preserved as written.
    Verbatim,
    /// Digits rendered as `<prefix>-<digits>`.
    Identifier { prefix: &'static str },
    /// Two depth groups: the lower bound goes to the rule's field, the
    /// upper bound to `upper`.
    Range { upper: Field },
}

/// One extraction rule.
#[derive(Debug, Clone)]
pub struct AnchorRule {
    pub field: Field,
    pub pattern: &'static Regex,
    pub capture: CaptureKind,
    /// Lower runs first. Rules of a later priority only fill fields that are
    /// still empty.
    pub priority: u8,
    /// Short description written to the trace.
    pub source: &'static str,
}

impl AnchorRule {
    fn new(field: Field, pattern: &'static Regex, capture: CaptureKind, source: &'static str) -> Self {
        Self {
            field,
            pattern,
            capture,
            priority: 0,
            source,
        }
    }

    fn fallback(mut self) -> Self {
        self.priority = 1;
        self
    }

    /// Apply the rule, returning the `(field, value)` pairs it produced.
    fn capture(&self, text: &str) -> Vec<(Field, String)> {
        let Some(caps) = self.pattern.captures(text) else {
            return Vec::new();
        };

        match self.capture {
            CaptureKind::Numeric => group(&caps, 1)
                .map(|v| vec![(self.field, normalize_number(v))])
                .unwrap_or_default(),
            CaptureKind::Depth => group(&caps, 1)
                .map(|v| vec![(self.field, normalize_depth(v))])
                .unwrap_or_default(),
            CaptureKind::Verbatim => group(&caps, 1)
                .map(|v| vec![(self.field, v.to_string())])
                .unwrap_or_default(),
            CaptureKind::Identifier { prefix } => group(&caps, 1)
                .map(|v| vec![(self.field, format!("{}-{}", prefix, v))])
                .unwrap_or_default(),
            CaptureKind::Range { upper } => match (group(&caps, 1), group(&caps, 2)) {
                (Some(low), Some(high)) => vec![
                    (self.field, normalize_depth(low)),
                    (upper, normalize_depth(high)),
                ],
                _ => Vec::new(),
            },
        }
    }
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> Option<&'t str> {
    caps.get(index)
        .map(|m| m.as_str().trim())
        .filter(|v| !v.is_empty())
}

lazy_static! {
    /// Rule table in evaluation order (priority, then table order).
    pub static ref ANCHOR_RULES: Vec<AnchorRule> = {
        use CaptureKind::*;

        let mut rules = vec![
            AnchorRule::new(Field::WellName, &WELL_NAME, Identifier { prefix: "SPT" }, "SPT"),
            AnchorRule::new(Field::TubingOd, &OUTER_DIAMETER, Numeric, "OD"),
            AnchorRule::new(Field::TubingId, &INNER_DIAMETER, Numeric, "ID"),
            AnchorRule::new(Field::TubingAvgJointLength, &JOINT_LENGTH, Numeric, "COMP"),
            AnchorRule::new(Field::TubingAvgJointLength, &LET_DOWN, Numeric, "LET DOWN").fallback(),
            AnchorRule::new(Field::RodString, &ROD_STRING, Verbatim, "HASTE POLIDA"),
            AnchorRule::new(Field::CasingWeight, &CASING_WEIGHT, Numeric, "PESO DO REVESTIMENTO"),
            AnchorRule::new(Field::TubingWeight, &TUBING_WEIGHT, Numeric, "PESO"),
            AnchorRule::new(Field::KbOffset, &KB_OFFSET, Numeric, "MESA ROTATIVA"),
            AnchorRule::new(Field::CasingOd, &CASING_OD_TEXT, Verbatim, "texto revestimento"),
            AnchorRule::new(Field::CasingTop, &CASING_TOP, Depth, "TOPO DO REVESTIMENTO"),
            AnchorRule::new(Field::CasingBottom, &CASING_BOTTOM, Depth, "SAPATA"),
            AnchorRule::new(Field::TubingAnchor, &TUBING_ANCHOR, Depth, "ÂNCORA"),
            AnchorRule::new(Field::Plugback, &PLUGBACK, Depth, "TAMPÃO"),
            AnchorRule::new(
                Field::PerforationTop,
                &PERFORATION,
                Range { upper: Field::PerforationBottom },
                "CANHONEADO",
            ),
            AnchorRule::new(Field::TubingOd, &TUBING_OD_TEXT, Verbatim, "texto").fallback(),
        ];

        rules.sort_by_key(|r| r.priority);
        rules
    };
}

/// Run every anchor rule against the full text.
///
/// A rule only writes fields that are still absent, so the first rule to
/// match a field wins. Returns the number of values written.
pub fn apply_anchor_rules(
    rules: &[AnchorRule],
    text: &str,
    values: &mut ValueSet,
    trace: &mut DebugTrace,
) -> usize {
    let mut written = 0;

    for rule in rules {
        if values.contains(rule.field) {
            continue;
        }

        for (field, value) in rule.capture(text) {
            if values.contains(field) {
                continue;
            }
            trace.record(field, &value, rule.source);
            values.insert(field, value);
            written += 1;
        }
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(text: &str) -> (ValueSet, DebugTrace) {
        let mut values = ValueSet::new();
        let mut trace = DebugTrace::new();
        apply_anchor_rules(&ANCHOR_RULES, text, &mut values, &mut trace);
        (values, trace)
    }

    #[test]
    fn test_table_is_sorted_by_priority() {
        let priorities: Vec<u8> = ANCHOR_RULES.iter().map(|r| r.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn test_well_name() {
        let (values, _) = run("Relatório de completação do poço spt 115 - campo X");
        assert_eq!(values.get(Field::WellName), Some("SPT-115"));
    }

    #[test]
    fn test_outer_and_inner_diameter() {
        let (values, trace) = run("OD 2.441\nalgo\nID 2,992");
        assert_eq!(values.get(Field::TubingOd), Some("2.441"));
        assert_eq!(values.get(Field::TubingId), Some("2.992"));
        assert_eq!(trace.lines()[0], "tubing_od => 2.441 (OD)");
    }

    #[test]
    fn test_joint_length_primary_wins() {
        let (values, trace) = run("LET DOWN 9,10\nCOMP 9,65");
        assert_eq!(values.get(Field::TubingAvgJointLength), Some("9.65"));
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn test_joint_length_secondary() {
        let (values, trace) = run("LET\nDOWN 9,10");
        assert_eq!(values.get(Field::TubingAvgJointLength), Some("9.10"));
        assert_eq!(trace.lines(), ["tubing_avg_joint_length => 9.10 (LET DOWN)"]);
    }

    #[test]
    fn test_rod_string_is_verbatim() {
        let (values, _) = run("HASTE POLIDA 1 1/4\" x 26'");
        assert_eq!(values.get(Field::RodString), Some("1 1/4\""));
    }

    #[test]
    fn test_textual_tubing_od_is_fallback_only() {
        let (values, _) = run("TUBOS DE PRODUÇÃO 2 7/8\" EU");
        assert_eq!(values.get(Field::TubingOd), Some("2 7/8"));

        let (values, _) = run("TUBOS DE PRODUÇÃO 2 7/8\" EU\nOD 2,875");
        assert_eq!(values.get(Field::TubingOd), Some("2.875"));
    }

    #[test]
    fn test_perforation_range_writes_both_fields() {
        let (values, trace) = run("Intervalo canhoneado 1.402,5 a 1.410,0 m");
        assert_eq!(values.get(Field::PerforationTop), Some("1402.5"));
        assert_eq!(values.get(Field::PerforationBottom), Some("1410.0"));
        assert_eq!(trace.len(), 2);
    }

    #[test]
    fn test_dotted_thousands_depths() {
        let (values, _) = run("TAMPÃO 1.455\nSAPATA 1.480\nÂNCORA 1.310,40\nCANHONEADO 1.402 a 1.410");
        assert_eq!(values.get(Field::Plugback), Some("1455"));
        assert_eq!(values.get(Field::CasingBottom), Some("1480"));
        assert_eq!(values.get(Field::TubingAnchor), Some("1310.40"));
        assert_eq!(values.get(Field::PerforationTop), Some("1402"));
        assert_eq!(values.get(Field::PerforationBottom), Some("1410"));
    }

    #[test]
    fn test_weights() {
        let (values, _) = run("PESO DO REVESTIMENTO 17,0 lb/pé\nPESO NOMINAL 6,5");
        assert_eq!(values.get(Field::CasingWeight), Some("17.0"));
        assert_eq!(values.get(Field::TubingWeight), Some("6.5"));
    }

    #[test]
    fn test_no_anchors() {
        let (values, trace) = run("Texto sem nenhum rótulo conhecido 123,45.");
        assert!(values.is_empty());
        assert!(trace.is_empty());
    }
}
