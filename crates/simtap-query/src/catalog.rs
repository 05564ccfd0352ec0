use crate::templates::{describe_table_query, id_exists_query, list_tables_query};
use simtap_core::catalog::TableSchema;
use simtap_core::error::SimtapError;
use simtap_core::service::QueryService;
use simtap_core::types::{DataRow, TabularResult};
use tracing::{debug, info};

/// User-facing tables published by the service: `table_name`, `description`.
pub async fn list_available_tables<S>(service: &S) -> Result<TabularResult, SimtapError>
where
    S: QueryService + ?Sized,
{
    let result = service.execute_query(&list_tables_query()).await?;
    info!("Number of available tables: {}", result.len());
    project(&result, &["table_name", "description"])
}

/// Column names, types and descriptions of `table`.
pub async fn describe_columns<S>(service: &S, table: &str) -> Result<TabularResult, SimtapError>
where
    S: QueryService + ?Sized,
{
    let query = describe_table_query(table)?;
    let result = service.execute_query(&query).await?;
    Ok(TableSchema::from_result(table, &result).describe())
}

/// Whether SIMBAD knows `full_id` (e.g. `Gaia DR3 4295806720`).
///
/// A failed lookup counts as "not found".
pub async fn id_exists<S>(service: &S, full_id: &str) -> bool
where
    S: QueryService + ?Sized,
{
    match service.execute_query(&id_exists_query(full_id)).await {
        Ok(result) => !result.is_empty(),
        Err(err) => {
            debug!(full_id, "identifier lookup failed: {err}");
            false
        }
    }
}

fn project(result: &TabularResult, names: &[&str]) -> Result<TabularResult, SimtapError> {
    let indices = names
        .iter()
        .map(|name| result.require_column(name))
        .collect::<Result<Vec<_>, _>>()?;
    let columns = indices.iter().map(|idx| result.columns[*idx].clone()).collect();
    let rows = result
        .rows
        .iter()
        .map(|row| DataRow::new(indices.iter().map(|idx| row.get(*idx).clone()).collect()))
        .collect();
    Ok(TabularResult::new(columns, rows))
}
