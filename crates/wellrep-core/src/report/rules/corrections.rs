//! Cross-field corrections applied to a completed value set.
//!
//! Corrections never look at the text. Each one is a plain function over the
//! value set, and the list is applied after every capture rule has run.

use crate::models::report::{Field, ValueSet};
use crate::report::trace::DebugTrace;

/// A named correction.
pub type Correction = fn(ValueSet, &mut DebugTrace) -> ValueSet;

/// Weight literals that are really inner diameters in PROFD-block reports.
pub const DIAMETER_MISREAD_AS_WEIGHT: &[&str] = &["2,441", "2.441"];

/// Corrections in application order. They commute: the first only fires when
/// `tubing_id` is present, the second only when it is absent.
pub const CORRECTIONS: &[(&str, Correction)] = &[
    ("drop_weight_when_inner_diameter_known", drop_weight_when_inner_diameter_known),
    ("reassign_diameter_misread_as_weight", reassign_diameter_misread_as_weight),
];

/// The ID and weight patterns collide in the tubing block layout, so a
/// captured inner diameter discards the weight guess.
pub fn drop_weight_when_inner_diameter_known(mut values: ValueSet, trace: &mut DebugTrace) -> ValueSet {
    if values.contains(Field::TubingId) {
        if let Some(weight) = values.remove(Field::TubingWeight) {
            trace.record(
                Field::TubingWeight,
                &weight,
                "discarded: tubing_id present",
            );
        }
    }
    values
}

/// `2,441` captured as a weight is the inner diameter of 2 7/8" tubing.
pub fn reassign_diameter_misread_as_weight(mut values: ValueSet, trace: &mut DebugTrace) -> ValueSet {
    if values.contains(Field::TubingId) {
        return values;
    }

    let misread = values
        .get(Field::TubingWeight)
        .is_some_and(|w| DIAMETER_MISREAD_AS_WEIGHT.contains(&w));

    if misread {
        if let Some(weight) = values.remove(Field::TubingWeight) {
            trace.record(Field::TubingId, &weight, "corrected: tubing_weight 2,441 is tubing_id");
            values.insert(Field::TubingId, weight);
        }
    }
    values
}

/// Apply a correction list in order.
pub fn apply_corrections(
    corrections: &[(&str, Correction)],
    mut values: ValueSet,
    trace: &mut DebugTrace,
) -> ValueSet {
    for (name, correction) in corrections {
        let before = trace.len();
        values = correction(values, trace);
        if trace.len() != before {
            tracing::debug!(correction = *name, "correction applied");
        }
    }
    values
}
