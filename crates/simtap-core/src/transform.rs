use crate::error::SimtapError;
use crate::types::{Column, DataRow, DataValue, TabularResult};
use std::collections::HashMap;

/// Hashable stand-in for a `DataValue`, consistent with `DataValue::same_as`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GroupKey {
    Null,
    Int(i64),
    Float(u64),
    Bool(bool),
    Str(String),
    List(Vec<GroupKey>),
}

impl From<&DataValue> for GroupKey {
    fn from(value: &DataValue) -> Self {
        match value {
            DataValue::Null => GroupKey::Null,
            DataValue::Int64(v) => GroupKey::Int(*v),
            DataValue::Float64(v) => {
                let canonical = if v.is_nan() {
                    f64::NAN
                } else if *v == 0.0 {
                    0.0
                } else {
                    *v
                };
                GroupKey::Float(canonical.to_bits())
            }
            DataValue::Bool(v) => GroupKey::Bool(*v),
            DataValue::String(v) => GroupKey::Str(v.clone()),
            DataValue::List(values) => GroupKey::List(values.iter().map(GroupKey::from).collect()),
        }
    }
}

/// Stacks results row-wise.
///
/// Columns are the union of every input's columns in first-appearance order;
/// a row from an input lacking a column holds `Null` there.
pub fn concat(results: Vec<TabularResult>) -> TabularResult {
    let mut columns: Vec<Column> = Vec::new();
    for result in &results {
        for column in &result.columns {
            if !columns.iter().any(|c| c.name == column.name) {
                columns.push(column.clone());
            }
        }
    }

    let mut rows = Vec::with_capacity(results.iter().map(TabularResult::len).sum());
    for result in results {
        let mapping: Vec<Option<usize>> = columns
            .iter()
            .map(|c| result.column_index(&c.name))
            .collect();
        for row in result.rows {
            let values = mapping
                .iter()
                .map(|src| match src {
                    Some(idx) => row.get(*idx).clone(),
                    None => DataValue::Null,
                })
                .collect();
            rows.push(DataRow { values });
        }
    }
    TabularResult { columns, rows }
}

/// Collapses rows sharing a value in `key_column` into one row per key.
///
/// Groups keep first-appearance order. Within a group each other column
/// becomes the shared value when every row agrees, else a `List` of all the
/// group's values in row order. The key column is placed first.
pub fn aggregate(result: &TabularResult, key_column: &str) -> Result<TabularResult, SimtapError> {
    let key_idx = result.require_column(key_column)?;

    let mut slots: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<Vec<&DataRow>> = Vec::new();
    for row in &result.rows {
        let slot = *slots.entry(GroupKey::from(row.get(key_idx))).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(row);
    }

    let other_columns: Vec<usize> = (0..result.columns.len()).filter(|idx| *idx != key_idx).collect();
    let mut columns = Vec::with_capacity(result.columns.len());
    columns.push(result.columns[key_idx].clone());
    columns.extend(other_columns.iter().map(|idx| result.columns[*idx].clone()));

    let rows = groups
        .into_iter()
        .map(|members| {
            let mut values = Vec::with_capacity(columns.len());
            values.push(members[0].get(key_idx).clone());
            for idx in &other_columns {
                values.push(collapse(members.iter().map(|row| row.get(*idx))));
            }
            DataRow { values }
        })
        .collect();

    Ok(TabularResult { columns, rows })
}

fn collapse<'a>(values: impl Iterator<Item = &'a DataValue>) -> DataValue {
    let values: Vec<&DataValue> = values.collect();
    let Some(first) = values.first() else {
        return DataValue::Null;
    };
    if values.iter().all(|v| first.same_as(v)) {
        (*first).clone()
    } else {
        DataValue::List(values.iter().map(|v| (*v).clone()).collect())
    }
}

/// Returns a copy of `result` with `column` moved to the front.
pub fn move_column_first(result: &TabularResult, column: &str) -> Result<TabularResult, SimtapError> {
    let idx = result.require_column(column)?;
    let mut order = Vec::with_capacity(result.columns.len());
    order.push(idx);
    order.extend((0..result.columns.len()).filter(|i| *i != idx));

    let columns = order.iter().map(|i| result.columns[*i].clone()).collect();
    let rows = result
        .rows
        .iter()
        .map(|row| DataRow {
            values: order.iter().map(|i| row.get(*i).clone()).collect(),
        })
        .collect();
    Ok(TabularResult { columns, rows })
}
