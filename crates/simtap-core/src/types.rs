use crate::error::SimtapError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DataValue {
    Null,
    Int64(i64),
    Float64(f64),
    Bool(bool),
    String(String),
    /// Aggregated cell whose group held differing values, in row order.
    List(Vec<DataValue>),
}

impl DataValue {
    /// Value equality used for grouping and uniformity checks.
    ///
    /// Unlike `PartialEq`, `NaN` matches `NaN` so that a column of missing
    /// floats still collapses to a single value.
    pub fn same_as(&self, other: &DataValue) -> bool {
        match (self, other) {
            (DataValue::Float64(a), DataValue::Float64(b)) => {
                (a.is_nan() && b.is_nan()) || a == b
            }
            (DataValue::List(a), DataValue::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_as(y))
            }
            _ => self == other,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Types a bare text token.
    ///
    /// A number is only produced when it prints back to the exact token, so
    /// `007`, `1e3`, `nan` or ids wider than i64 stay as the original text.
    pub fn infer(token: &str) -> DataValue {
        if let Ok(v) = token.parse::<i64>() {
            if v.to_string() == token {
                return DataValue::Int64(v);
            }
        }
        if let Ok(v) = token.parse::<f64>() {
            if v.is_finite() && v.to_string() == token {
                return DataValue::Float64(v);
            }
        }
        DataValue::String(token.to_string())
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Null => Ok(()),
            DataValue::Int64(v) => write!(f, "{v}"),
            DataValue::Float64(v) => write!(f, "{v}"),
            DataValue::Bool(v) => write!(f, "{v}"),
            DataValue::String(v) => f.write_str(v),
            DataValue::List(values) => {
                f.write_str("[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    pub description: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataRow {
    pub values: Vec<DataValue>,
}

impl DataRow {
    pub fn new(values: Vec<DataValue>) -> Self {
        Self { values }
    }

    /// Value at `idx`, with cells past the end of a short row reading as null.
    pub fn get(&self, idx: usize) -> &DataValue {
        self.values.get(idx).unwrap_or(&DataValue::Null)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TabularResult {
    pub columns: Vec<Column>,
    pub rows: Vec<DataRow>,
}

impl TabularResult {
    pub fn new(columns: Vec<Column>, rows: Vec<DataRow>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, SimtapError> {
        self.column_index(name)
            .ok_or_else(|| SimtapError::ColumnNotFound(name.to_string()))
    }

    pub fn column_values(&self, name: &str) -> Result<Vec<&DataValue>, SimtapError> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(|row| row.get(idx)).collect())
    }
}

/// Catalogue source token, e.g. a Gaia DR3 source id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full catalogue name, e.g. `Gaia DR3 ` + `4295806720`.
    pub fn with_prefix(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self::new(value.to_string())
    }
}
