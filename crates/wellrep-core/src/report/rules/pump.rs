//! Pump depth search: keyword proximity window with a structural fallback.

use super::numbers::{normalize_depth, render_depth};
use super::patterns::{NUMBER, PUMP_ANCHOR, PUMP_BLOCK, PUMP_WINDOW_CHARS};
use crate::models::report::{Field, ValueSet};
use crate::report::trace::DebugTrace;

/// Where the pump depth was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PumpDepthSource {
    /// First number after a pump keyword (the matched keyword).
    Keyword(String),
    /// Trailing PROFD value of an OD/ID/COMP/PROFD block.
    StructuralBlock,
}

impl PumpDepthSource {
    fn describe(&self) -> String {
        match self {
            PumpDepthSource::Keyword(anchor) => format!("near '{}'", anchor),
            PumpDepthSource::StructuralBlock => "fallback OD/ID/COMP/PROFD block".to_string(),
        }
    }
}

/// Locate the pump depth in `text`.
///
/// Keyword occurrences are tried in text order and the first one with a
/// number inside its window wins. The structural block is only consulted
/// when no pump keyword appears at all.
pub fn find_pump_depth(text: &str, allow_block_fallback: bool) -> Option<(String, PumpDepthSource)> {
    let mut saw_keyword = false;

    for anchor in PUMP_ANCHOR.find_iter(text) {
        saw_keyword = true;
        if let Some(literal) = first_number_in_window(&text[anchor.end()..], PUMP_WINDOW_CHARS) {
            let keyword = anchor
                .as_str()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_uppercase();
            return Some((canonical_depth(literal), PumpDepthSource::Keyword(keyword)));
        }
    }

    if saw_keyword {
        tracing::debug!("pump keyword present without a number in range");
        return None;
    }
    if !allow_block_fallback {
        return None;
    }

    PUMP_BLOCK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| (canonical_depth(m.as_str()), PumpDepthSource::StructuralBlock))
}

/// First numeric literal starting within `max_chars` characters of `haystack`.
fn first_number_in_window(haystack: &str, max_chars: usize) -> Option<&str> {
    let limit = haystack
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(haystack.len());

    NUMBER
        .find(haystack)
        .filter(|m| m.start() <= limit)
        .map(|m| m.as_str())
}

fn canonical_depth(literal: &str) -> String {
    let canonical = normalize_depth(literal);
    render_depth(&canonical).unwrap_or(canonical)
}

/// Fill `pc_pump_depth` unless it is already set.
pub fn resolve_pump_depth(
    text: &str,
    allow_block_fallback: bool,
    values: &mut ValueSet,
    trace: &mut DebugTrace,
) -> bool {
    if values.contains(Field::PcPumpDepth) {
        return false;
    }

    match find_pump_depth(text, allow_block_fallback) {
        Some((depth, source)) => {
            trace.record(Field::PcPumpDepth, &depth, &source.describe());
            values.insert(Field::PcPumpDepth, depth);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keyword_window() {
        let text = "INSTALADA BOMBA TUBULAR\nmodelo XYZ\nprofundidade 2441,00 m";
        let (depth, source) = find_pump_depth(text, true).unwrap();
        assert_eq!(depth, "2441");
        assert_eq!(source, PumpDepthSource::Keyword("BOMBA TUBULAR".to_string()));
    }

    #[test]
    fn test_parte_superior_da_bomba() {
        let text = "Parte superior da\nbomba a 1.234,50 m";
        let (depth, source) = find_pump_depth(text, true).unwrap();
        assert_eq!(depth, "1234.5");
        assert_eq!(source, PumpDepthSource::Keyword("PARTE SUPERIOR DA BOMBA".to_string()));
    }

    #[test]
    fn test_number_outside_window_is_ignored() {
        let text = format!("BOMBA{}2441", " ".repeat(PUMP_WINDOW_CHARS + 1));
        assert_eq!(find_pump_depth(&text, true), None);

        let text = format!("BOMBA{}2441", " ".repeat(PUMP_WINDOW_CHARS));
        assert_eq!(find_pump_depth(&text, true).map(|(d, _)| d).as_deref(), Some("2441"));
    }

    #[test]
    fn test_later_keyword_can_supply_number() {
        let text = format!("BOMBA{}x\nBOMBA 1500", " ".repeat(PUMP_WINDOW_CHARS + 5));
        assert_eq!(find_pump_depth(&text, true).map(|(d, _)| d).as_deref(), Some("1500"));
    }

    #[test]
    fn test_structural_block_fallback() {
        let text = "OD 2,875  ID 2,441\nCOMP 9,65 PROFD 1.350,00";
        let (depth, source) = find_pump_depth(text, true).unwrap();
        assert_eq!(depth, "1350");
        assert_eq!(source, PumpDepthSource::StructuralBlock);
        assert_eq!(find_pump_depth(text, false), None);
    }

    #[test]
    fn test_structural_block_takes_last_depth_in_range() {
        let text = "OD 2,875 ID 2,441 COMP 9,58\nPROFD 1.200,5\nPROFD 980,0\nPROFD 1.350,31";
        let (depth, source) = find_pump_depth(text, true).unwrap();
        assert_eq!(depth, "1350.31");
        assert_eq!(source, PumpDepthSource::StructuralBlock);

        let far = format!("OD 2,875 ID 2,441 COMP 9,58\nPROFD 1.200,5{}PROFD 1.350,31", " ".repeat(90));
        assert_eq!(find_pump_depth(&far, true).map(|(d, _)| d).as_deref(), Some("1200.5"));
    }

    #[test]
    fn test_keyword_depth_with_dotted_thousands() {
        let (depth, _) = find_pump_depth("BOMBA TUBULAR a 1.310 m", true).unwrap();
        assert_eq!(depth, "1310");
    }

    #[test]
    fn test_block_gap_is_bounded() {
        let text = format!("OD 2,875 {} ID 2,441 COMP 9,65 PROFD 1350", "x".repeat(100));
        assert_eq!(find_pump_depth(&text, true), None);
    }

    #[test]
    fn test_trace_distinguishes_paths() {
        let mut values = ValueSet::new();
        let mut trace = DebugTrace::new();
        resolve_pump_depth("OD 2,875 ID 2,441 COMP 9,65 PROFD 1350", true, &mut values, &mut trace);
        assert_eq!(trace.lines(), ["pc_pump_depth => 1350 (fallback OD/ID/COMP/PROFD block)"]);

        let mut values = ValueSet::new();
        let mut trace = DebugTrace::new();
        resolve_pump_depth("BOMBA TUBULAR 2441,00", true, &mut values, &mut trace);
        assert_eq!(trace.lines(), ["pc_pump_depth => 2441 (near 'BOMBA TUBULAR')"]);
        assert_eq!(values.get(Field::PcPumpDepth), Some("2441"));
    }
}
