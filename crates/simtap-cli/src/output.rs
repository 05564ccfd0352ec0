use clap::ValueEnum;
use serde_json::{json, Map, Value};
use simtap_core::types::{DataValue, TabularResult};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Tsv,
    Json,
}

pub fn write_result<W: Write>(out: &mut W, result: &TabularResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Tsv => write_tsv(out, result),
        OutputFormat::Json => write_json(out, result),
    }
}

fn write_tsv<W: Write>(out: &mut W, result: &TabularResult) -> anyhow::Result<()> {
    writeln!(out, "{}", result.column_names().join("\t"))?;
    for row in &result.rows {
        let cells: Vec<String> = (0..result.columns.len())
            .map(|idx| row.get(idx).to_string().replace(['\t', '\n'], " "))
            .collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }
    Ok(())
}

/// Array of objects, one per row, keys in column order.
fn write_json<W: Write>(out: &mut W, result: &TabularResult) -> anyhow::Result<()> {
    let records: Vec<Value> = result
        .rows
        .iter()
        .map(|row| {
            let record: Map<String, Value> = result
                .columns
                .iter()
                .enumerate()
                .map(|(idx, column)| (column.name.clone(), to_json(row.get(idx))))
                .collect();
            Value::Object(record)
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &records)?;
    writeln!(out)?;
    Ok(())
}

fn to_json(value: &DataValue) -> Value {
    match value {
        DataValue::Null => Value::Null,
        DataValue::Int64(v) => json!(v),
        DataValue::Float64(v) => serde_json::Number::from_f64(*v).map_or(Value::Null, Value::Number),
        DataValue::Bool(v) => json!(v),
        DataValue::String(v) => json!(v),
        DataValue::List(values) => Value::Array(values.iter().map(to_json).collect()),
    }
}
