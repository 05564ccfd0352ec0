use crate::error::SimtapError;
use crate::types::{Column, DataRow, DataValue, Identifier, TabularResult};
use std::path::Path;
use tracing::debug;

/// Reads a whitespace-delimited target list whose first line is the header.
pub fn load_target_list(path: impl AsRef<Path>) -> Result<TabularResult, SimtapError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let table = parse_target_list(&contents)?;
    debug!(path = %path.display(), rows = table.len(), "loaded target list");
    Ok(table)
}

pub fn parse_target_list(contents: &str) -> Result<TabularResult, SimtapError> {
    let mut lines = contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Ok(TabularResult::empty());
    };
    let names: Vec<&str> = header.split_whitespace().collect();

    let mut rows = Vec::new();
    for (line_no, line) in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() > names.len() {
            return Err(SimtapError::Parse(format!(
                "line {}: expected {} fields, saw {}",
                line_no + 1,
                names.len(),
                tokens.len()
            )));
        }
        let mut values: Vec<DataValue> = tokens.into_iter().map(DataValue::infer).collect();
        values.resize(names.len(), DataValue::Null);
        rows.push(DataRow { values });
    }

    let columns = names
        .iter()
        .enumerate()
        .map(|(idx, name)| Column::new(*name, infer_type(rows.iter().map(|r| r.get(idx)))))
        .collect();
    Ok(TabularResult { columns, rows })
}

fn infer_type<'a>(values: impl Iterator<Item = &'a DataValue>) -> &'static str {
    let mut data_type = "long";
    for value in values {
        match value {
            DataValue::Null | DataValue::Int64(_) => {}
            DataValue::Float64(_) => data_type = "double",
            _ => return "char",
        }
    }
    data_type
}

/// Identifiers from one column of a target table, skipping empty cells.
pub fn identifiers(table: &TabularResult, column: &str) -> Result<Vec<Identifier>, SimtapError> {
    Ok(table
        .column_values(column)?
        .into_iter()
        .filter(|value| !value.is_null())
        .map(|value| Identifier::new(value.to_string()))
        .collect())
}
