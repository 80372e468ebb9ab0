use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A single raw cell, tagged with the type it arrived as.
///
/// Upstream producers are inconsistent: the same column can hold a native boolean in
/// one export, the number `1` in another and the text `"True"` in a third. The tag is
/// kept so that each consumer can apply its own equality rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Maps a JSON value onto a scalar. Arrays and objects carry no meaning for any
    /// column and are absorbed as `Null`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Bool(*b),
            Value::Number(n) => n.as_f64().map(Scalar::Number).unwrap_or(Scalar::Null),
            Value::String(s) => Scalar::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Scalar::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// The textual form of the value, or `None` for `Null`.
    ///
    /// Integral numbers render without a fractional part (`1`, never `1.0`), booleans
    /// render lower-case.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Number(n) => Some(format_number(*n)),
            Scalar::Text(s) => Some(s.clone()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n.is_sign_positive() { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        // Covers -0.0 as well.
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Number(f64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value as f64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

/// One untyped input row as produced by the ingestion transport (CSV line or JSON object).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RawRow {
    fields: HashMap<String, Scalar>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any previous value under the same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Scalar>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Returns the cell for `name`. A present-but-null cell is reported as absent.
    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for RawRow {
    fn from(object: Map<String, Value>) -> Self {
        let fields = object
            .iter()
            .map(|(k, v)| (k.clone(), Scalar::from_json(v)))
            .collect();
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { fields }
    }
}
