use crate::types::{Column, DataRow, DataValue, TabularResult};
use serde::{Deserialize, Serialize};

/// Column layout of one remote table, as reported by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<Column>,
}

impl TableSchema {
    pub fn from_result(name: impl Into<String>, result: &TabularResult) -> Self {
        Self {
            name: name.into(),
            columns: result.columns.clone(),
        }
    }

    /// One row per column: `colname`, `dtype`, `description`.
    pub fn describe(&self) -> TabularResult {
        let columns = vec![
            Column::new("colname", "char"),
            Column::new("dtype", "char"),
            Column::new("description", "char"),
        ];
        let rows = self
            .columns
            .iter()
            .map(|c| {
                DataRow::new(vec![
                    DataValue::String(c.name.clone()),
                    DataValue::String(c.data_type.clone()),
                    c.description
                        .clone()
                        .map(DataValue::String)
                        .unwrap_or(DataValue::Null),
                ])
            })
            .collect();
        TabularResult { columns, rows }
    }
}
