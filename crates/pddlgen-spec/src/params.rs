//! Typed parameter records.
//!
//! A plugin parser turns the free-form `rest` arguments into a [`ParamSet`]:
//! an insertion-ordered list of named, typed values. The same record feeds
//! generator template substitution and the `dict:` metadata field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a plugin argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
    /// Free text.
    #[default]
    String,
    /// Boolean switch (`--name`), false unless given.
    Flag,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Int => write!(f, "int"),
            ParamKind::Float => write!(f, "float"),
            ParamKind::String => write!(f, "string"),
            ParamKind::Flag => write!(f, "flag"),
        }
    }
}

/// A parsed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
    Flag(bool),
}

impl ParamValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Str(_) => ParamKind::String,
            ParamValue::Flag(_) => ParamKind::Flag,
        }
    }

    /// Converts a manifest default into a value of the given kind.
    ///
    /// Integral JSON numbers are accepted for float arguments; everything else
    /// must match the declared kind exactly.
    pub fn from_json(kind: ParamKind, value: &serde_json::Value) -> Option<Self> {
        match kind {
            ParamKind::Int => value.as_i64().map(ParamValue::Int),
            ParamKind::Float => value.as_f64().map(ParamValue::Float),
            ParamKind::String => value.as_str().map(|s| ParamValue::Str(s.to_string())),
            ParamKind::Flag => value.as_bool().map(ParamValue::Flag),
        }
    }

    /// Renders the value as a JSON value for the metadata `dict:` field.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ParamValue::Int(i) => serde_json::Value::from(*i),
            ParamValue::Float(x) => serde_json::Number::from_f64(*x)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(format_float(*x))),
            ParamValue::Str(s) => serde_json::Value::String(s.clone()),
            ParamValue::Flag(b) => serde_json::Value::Bool(*b),
        }
    }
}

/// Text handed to generators: `3`, `0.5`, `1.0`, `grid`, `true`.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => f.write_str(&format_float(*x)),
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// Shortest round-trip form, keeping a trailing `.0` on integral values.
fn format_float(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

/// Insertion-ordered set of named parameter values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParamSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value. Re-inserting a name replaces the value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Looks up a value by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy with `seed` appended as the final entry.
    pub fn with_seed(&self, seed: i64) -> Self {
        let mut out = self.clone();
        out.entries.retain(|(n, _)| n != "seed");
        out.entries.push(("seed".to_string(), ParamValue::Int(seed)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_matches_generator_text() {
        assert_eq!(ParamValue::Int(3).to_string(), "3");
        assert_eq!(ParamValue::Int(-2).to_string(), "-2");
        assert_eq!(ParamValue::Float(0.5).to_string(), "0.5");
        assert_eq!(ParamValue::Float(1.0).to_string(), "1.0");
        assert_eq!(ParamValue::Float(0.1).to_string(), "0.1");
        assert_eq!(ParamValue::Str("grid".into()).to_string(), "grid");
        assert_eq!(ParamValue::Flag(true).to_string(), "true");
    }

    #[test]
    fn test_from_json_checks_kind() {
        let three = serde_json::json!(3);
        assert_eq!(ParamValue::from_json(ParamKind::Int, &three), Some(ParamValue::Int(3)));
        assert_eq!(
            ParamValue::from_json(ParamKind::Float, &three),
            Some(ParamValue::Float(3.0))
        );
        assert_eq!(ParamValue::from_json(ParamKind::String, &three), None);
        assert_eq!(ParamValue::from_json(ParamKind::Int, &serde_json::json!(0.5)), None);
        assert_eq!(
            ParamValue::from_json(ParamKind::Flag, &serde_json::json!(false)),
            Some(ParamValue::Flag(false))
        );
    }

    #[test]
    fn test_param_set_preserves_insertion_order() {
        let params = ParamSet::new()
            .with("x", ParamValue::Int(3))
            .with("y", ParamValue::Int(4))
            .with("ratio_goal_cells", ParamValue::Float(0.5));
        let names: Vec<_> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "y", "ratio_goal_cells"]);
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut params = ParamSet::new()
            .with("a", ParamValue::Int(1))
            .with("b", ParamValue::Int(2));
        params.insert("a", ParamValue::Int(10));
        let entries: Vec<_> = params.iter().map(|(n, v)| (n.to_string(), v.clone())).collect();
        assert_eq!(
            entries,
            vec![
                ("a".to_string(), ParamValue::Int(10)),
                ("b".to_string(), ParamValue::Int(2)),
            ]
        );
    }

    #[test]
    fn test_with_seed_appends_last() {
        let params = ParamSet::new().with("x", ParamValue::Int(3)).with_seed(7);
        let names: Vec<_> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "seed"]);
        assert_eq!(params.get("seed"), Some(&ParamValue::Int(7)));
    }

    #[test]
    fn test_with_seed_keeps_full_range() {
        for seed in [i64::MIN, -1, 0, i64::MAX] {
            let params = ParamSet::new().with_seed(seed);
            assert_eq!(params.get("seed"), Some(&ParamValue::Int(seed)));
        }
    }
}
