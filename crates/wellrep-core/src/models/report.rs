//! Well-completion report field schema and extracted value containers.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A field of the well-completion report schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    WellName,
    KbOffset,
    CasingOd,
    CasingWeight,
    CasingTop,
    CasingBottom,
    TubingOd,
    TubingId,
    TubingWeight,
    TubingTop,
    TubingBottom,
    TubingAvgJointLength,
    RodString,
    TubingAnchor,
    PcPumpDepth,
    PerforationTop,
    PerforationBottom,
    Plugback,
}

impl Field {
    /// Every field the engine knows about.
    pub const ALL: [Field; 18] = [
        Field::WellName,
        Field::KbOffset,
        Field::CasingOd,
        Field::CasingWeight,
        Field::CasingTop,
        Field::CasingBottom,
        Field::TubingOd,
        Field::TubingId,
        Field::TubingWeight,
        Field::TubingTop,
        Field::TubingBottom,
        Field::TubingAvgJointLength,
        Field::RodString,
        Field::TubingAnchor,
        Field::PcPumpDepth,
        Field::PerforationTop,
        Field::PerforationBottom,
        Field::Plugback,
    ];

    /// Fields of the completion form filled in for operators.
    ///
    /// `tubing_id` is an engine-side field used for disambiguation and is not
    /// part of the form.
    pub const SCHEMA: [Field; 17] = [
        Field::WellName,
        Field::KbOffset,
        Field::CasingOd,
        Field::CasingWeight,
        Field::CasingTop,
        Field::CasingBottom,
        Field::TubingOd,
        Field::TubingWeight,
        Field::TubingTop,
        Field::TubingBottom,
        Field::TubingAvgJointLength,
        Field::RodString,
        Field::TubingAnchor,
        Field::PcPumpDepth,
        Field::PerforationTop,
        Field::PerforationBottom,
        Field::Plugback,
    ];

    /// The snake_case wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::WellName => "well_name",
            Field::KbOffset => "kb_offset",
            Field::CasingOd => "casing_od",
            Field::CasingWeight => "casing_weight",
            Field::CasingTop => "casing_top",
            Field::CasingBottom => "casing_bottom",
            Field::TubingOd => "tubing_od",
            Field::TubingId => "tubing_id",
            Field::TubingWeight => "tubing_weight",
            Field::TubingTop => "tubing_top",
            Field::TubingBottom => "tubing_bottom",
            Field::TubingAvgJointLength => "tubing_avg_joint_length",
            Field::RodString => "rod_string",
            Field::TubingAnchor => "tubing_anchor",
            Field::PcPumpDepth => "pc_pump_depth",
            Field::PerforationTop => "perforation_top",
            Field::PerforationBottom => "perforation_bottom",
            Field::Plugback => "plugback",
        }
    }

    /// Human-readable label, used by text output.
    pub fn label(&self) -> &'static str {
        match self {
            Field::WellName => "Well",
            Field::KbOffset => "KB offset",
            Field::CasingOd => "Casing OD",
            Field::CasingWeight => "Casing weight",
            Field::CasingTop => "Casing top",
            Field::CasingBottom => "Casing bottom",
            Field::TubingOd => "Tubing OD",
            Field::TubingId => "Tubing ID",
            Field::TubingWeight => "Tubing weight",
            Field::TubingTop => "Tubing top",
            Field::TubingBottom => "Tubing bottom",
            Field::TubingAvgJointLength => "Avg joint length",
            Field::RodString => "Rod string",
            Field::TubingAnchor => "Tubing anchor",
            Field::PcPumpDepth => "PC pump depth",
            Field::PerforationTop => "Perforation top",
            Field::PerforationBottom => "Perforation bottom",
            Field::Plugback => "Plugback",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == name)
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}

/// Insertion-ordered mapping from field to extracted value.
///
/// Only successfully extracted fields are present. Overwriting a field keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueSet {
    entries: Vec<(Field, String)>,
}

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.entries.iter().any(|(f, _)| *f == field)
    }

    /// Insert or overwrite a value, returning the previous one.
    pub fn insert(&mut self, field: Field, value: impl Into<String>) -> Option<String> {
        let value = value.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((field, value));
                None
            }
        }
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        let idx = self.entries.iter().position(|(f, _)| *f == field)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

impl Serialize for ValueSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

/// A value map restricted to a caller-supplied field list.
///
/// Every requested field is present, absent values are empty strings. This is
/// the shape shared by every extraction provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(Field, String)>,
}

impl FieldMap {
    /// Build a map for `fields`, looking each value up with `lookup`.
    pub fn from_lookup<F>(fields: &[Field], mut lookup: F) -> Self
    where
        F: FnMut(Field) -> Option<String>,
    {
        let mut entries: Vec<(Field, String)> = Vec::with_capacity(fields.len());
        for &field in fields {
            if entries.iter().any(|(f, _)| *f == field) {
                continue;
            }
            entries.push((field, lookup(field).unwrap_or_default()));
        }
        Self { entries }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields with a non-empty value.
    pub fn filled(&self) -> usize {
        self.entries.iter().filter(|(_, v)| !v.is_empty()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_round_trips_through_name() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>(), Ok(field));
        }
        assert!("casing_id".parse::<Field>().is_err());
    }

    #[test]
    fn test_value_set_keeps_insertion_order() {
        let mut values = ValueSet::new();
        values.insert(Field::TubingOd, "2.875");
        values.insert(Field::WellName, "SPT-115");
        values.insert(Field::TubingOd, "2.441");

        let order: Vec<Field> = values.iter().map(|(f, _)| f).collect();
        assert_eq!(order, vec![Field::TubingOd, Field::WellName]);
        assert_eq!(values.get(Field::TubingOd), Some("2.441"));

        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"tubing_od":"2.441","well_name":"SPT-115"}"#);
    }

    #[test]
    fn test_value_set_remove() {
        let mut values = ValueSet::new();
        values.insert(Field::TubingWeight, "6.5");
        assert_eq!(values.remove(Field::TubingWeight), Some("6.5".to_string()));
        assert_eq!(values.remove(Field::TubingWeight), None);
        assert!(values.is_empty());
    }

    #[test]
    fn test_field_map_fills_absent_with_empty() {
        let map = FieldMap::from_lookup(&[Field::WellName, Field::Plugback, Field::WellName], |f| {
            (f == Field::WellName).then(|| "SPT-7".to_string())
        });
        assert_eq!(map.len(), 2);
        assert_eq!(map.filled(), 1);
        assert_eq!(map.get(Field::Plugback), Some(""));
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"well_name":"SPT-7","plugback":""}"#
        );
    }
}
