//! Top/bottom resolution for repeated depth markers.

use regex::Regex;

use super::numbers::{format_depth, normalize_depth, parse_canonical};
use super::patterns::DEPTH_MARKER;
use crate::models::report::{Field, ValueSet};
use crate::report::trace::DebugTrace;

/// A label that repeats through the report and bounds an interval.
#[derive(Debug, Clone, Copy)]
pub struct DepthMarker {
    pub pattern: &'static Regex,
    pub top: Field,
    pub bottom: Field,
    pub source: &'static str,
}

impl DepthMarker {
    /// The PROFD marker bounding the tubing string.
    pub fn tubing() -> Self {
        Self {
            pattern: &DEPTH_MARKER,
            top: Field::TubingTop,
            bottom: Field::TubingBottom,
            source: "PROFD",
        }
    }
}

/// Resolved interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extremes {
    pub top: String,
    pub bottom: String,
    /// `false` when some literal did not parse and textual order was used.
    pub numeric: bool,
}

/// Resolve canonical literals to top (minimum) and bottom (maximum).
///
/// If any literal fails to parse, the first occurrence is the top and the
/// last one the bottom.
pub fn resolve_extremes(canonical: &[String]) -> Option<Extremes> {
    let (first, last) = (canonical.first()?, canonical.last()?);

    let parsed: Option<Vec<_>> = canonical.iter().map(|c| parse_canonical(c)).collect();
    match parsed {
        Some(numbers) => {
            let min = numbers.iter().min()?;
            let max = numbers.iter().max()?;
            Some(Extremes {
                top: format_depth(*min),
                bottom: format_depth(*max),
                numeric: true,
            })
        }
        None => Some(Extremes {
            top: first.clone(),
            bottom: last.clone(),
            numeric: false,
        }),
    }
}

/// Collect every occurrence of `marker` and write its top/bottom fields.
pub fn resolve_depths(
    marker: &DepthMarker,
    text: &str,
    values: &mut ValueSet,
    trace: &mut DebugTrace,
) -> bool {
    let literals: Vec<String> = marker
        .pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| normalize_depth(m.as_str())))
        .collect();

    tracing::debug!("{} occurrences of {}", literals.len(), marker.source);

    let Some(extremes) = resolve_extremes(&literals) else {
        return false;
    };

    let (top_source, bottom_source) = if extremes.numeric {
        (format!("{} min", marker.source), format!("{} max", marker.source))
    } else {
        (
            format!("{} first, textual order", marker.source),
            format!("{} last, textual order", marker.source),
        )
    };

    trace.record(marker.top, &extremes.top, &top_source);
    trace.record(marker.bottom, &extremes.bottom, &bottom_source);
    values.insert(marker.top, extremes.top);
    values.insert(marker.bottom, extremes.bottom);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_extremes_ignore_text_order() {
        let extremes = resolve_extremes(&strings(&["1200.5", "980.0", "1350.31"])).unwrap();
        assert_eq!(extremes.top, "980");
        assert_eq!(extremes.bottom, "1350.31");
        assert!(extremes.numeric);
    }

    #[test]
    fn test_single_occurrence() {
        let extremes = resolve_extremes(&strings(&["1350.00"])).unwrap();
        assert_eq!(extremes.top, "1350");
        assert_eq!(extremes.bottom, "1350");
    }

    #[test]
    fn test_unparsable_falls_back_to_text_order() {
        let extremes = resolve_extremes(&strings(&["1200.5", "1.5.3", "980"])).unwrap();
        assert_eq!(extremes.top, "1200.5");
        assert_eq!(extremes.bottom, "980");
        assert!(!extremes.numeric);
    }

    #[test]
    fn test_empty() {
        assert_eq!(resolve_extremes(&[]), None);
    }

    #[test]
    fn test_resolve_from_text() {
        let text = "PROFD 1.200,5\n...\nPROFD 980,0\n...\nprofd\n1350,31";
        let mut values = ValueSet::new();
        let mut trace = DebugTrace::new();

        assert!(resolve_depths(&DepthMarker::tubing(), text, &mut values, &mut trace));
        assert_eq!(values.get(Field::TubingTop), Some("980"));
        assert_eq!(values.get(Field::TubingBottom), Some("1350.31"));
        assert_eq!(
            trace.lines(),
            [
                "tubing_top => 980 (PROFD min)",
                "tubing_bottom => 1350.31 (PROFD max)",
            ]
        );
    }

    #[test]
    fn test_dotted_thousands_marker() {
        let text = "PROFD 980,0\nPROFD 1.350";
        let mut values = ValueSet::new();
        let mut trace = DebugTrace::new();

        assert!(resolve_depths(&DepthMarker::tubing(), text, &mut values, &mut trace));
        assert_eq!(values.get(Field::TubingTop), Some("980"));
        assert_eq!(values.get(Field::TubingBottom), Some("1350"));
    }

    #[test]
    fn test_unparsable_marker_uses_text_order() {
        lazy_static::lazy_static! {
            static ref ODD_MARKER: Regex = Regex::new(r"PROFD\s*([0-9.,]+)").unwrap();
        }
        let marker = DepthMarker {
            pattern: &ODD_MARKER,
            ..DepthMarker::tubing()
        };
        let text = "PROFD 1.200,5\nPROFD 1,5,3\nPROFD 980";
        let mut values = ValueSet::new();
        let mut trace = DebugTrace::new();

        assert!(resolve_depths(&marker, text, &mut values, &mut trace));
        assert_eq!(values.get(Field::TubingTop), Some("1200.5"));
        assert_eq!(values.get(Field::TubingBottom), Some("980"));
        assert_eq!(
            trace.lines(),
            [
                "tubing_top => 1200.5 (PROFD first, textual order)",
                "tubing_bottom => 980 (PROFD last, textual order)",
            ]
        );
    }

    #[test]
    fn test_no_marker() {
        let mut values = ValueSet::new();
        let mut trace = DebugTrace::new();
        assert!(!resolve_depths(&DepthMarker::tubing(), "sem profundidade", &mut values, &mut trace));
        assert!(values.is_empty());
        assert!(trace.is_empty());
    }
}
