use crate::messages::{FieldKind, FieldMeta, TapTable};
use serde_json::Value;
use simtap_core::error::SimtapError;
use simtap_core::types::{Column, DataRow, DataValue, TabularResult};

const SNIPPET_LEN: usize = 200;

/// Decodes a TAP JSON document into a table.
pub fn decode_json(body: &str) -> Result<TabularResult, SimtapError> {
    let table: TapTable = serde_json::from_str(body).map_err(|err| {
        let detail = extract_query_status(body).unwrap_or_else(|| err.to_string());
        SimtapError::QueryService(format!("undecodable TAP response: {detail}"))
    })?;

    let kinds: Vec<FieldKind> = table.metadata.iter().map(FieldMeta::kind).collect();
    let columns = table
        .metadata
        .iter()
        .map(|field| Column {
            name: field.name.clone(),
            data_type: field.data_type(),
            description: field.description.clone(),
        })
        .collect();
    let rows = table
        .data
        .iter()
        .map(|record| {
            let values = kinds
                .iter()
                .enumerate()
                .map(|(idx, kind)| record.get(idx).map_or(DataValue::Null, |v| to_value(v, *kind)))
                .collect();
            DataRow { values }
        })
        .collect();
    Ok(TabularResult { columns, rows })
}

fn to_value(value: &Value, kind: FieldKind) -> DataValue {
    match value {
        Value::Null => DataValue::Null,
        Value::Bool(b) => DataValue::Bool(*b),
        Value::Number(n) => match (kind, n.as_i64()) {
            (FieldKind::Float, _) => n.as_f64().map_or(DataValue::Null, DataValue::Float64),
            (_, Some(v)) => DataValue::Int64(v),
            (_, None) => n.as_f64().map_or(DataValue::Null, DataValue::Float64),
        },
        Value::String(s) => match kind {
            FieldKind::Integer => s
                .trim()
                .parse()
                .map(DataValue::Int64)
                .unwrap_or_else(|_| DataValue::String(s.clone())),
            FieldKind::Float => s
                .trim()
                .parse()
                .map(DataValue::Float64)
                .unwrap_or_else(|_| DataValue::String(s.clone())),
            FieldKind::Bool => match s.trim() {
                "true" | "T" | "1" => DataValue::Bool(true),
                "false" | "F" | "0" => DataValue::Bool(false),
                _ => DataValue::String(s.clone()),
            },
            FieldKind::Text => DataValue::String(s.clone()),
        },
        other => DataValue::String(other.to_string()),
    }
}

/// Message of the `QUERY_STATUS` INFO element of a TAP error document.
pub fn extract_query_status(body: &str) -> Option<String> {
    let start = body.find("name=\"QUERY_STATUS\"")?;
    let rest = &body[start..];
    let open_end = rest.find('>')?;
    if rest[..open_end].ends_with('/') {
        return None;
    }
    let content = &rest[open_end + 1..];
    let close = content.find("</INFO>")?;
    let message = unescape_xml(content[..close].trim());
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Short single-line excerpt of a response body for error messages.
pub fn snippet(body: &str) -> String {
    let flat: String = body.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(SNIPPET_LEN) {
        Some((idx, _)) => format!("{}...", &flat[..idx]),
        None => flat,
    }
}
