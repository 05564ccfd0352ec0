use crate::error::SimtapError;
use crate::types::TabularResult;
use async_trait::async_trait;

/// Remote catalogue accepting ADQL text and answering with one table.
///
/// Every operation that talks to the catalogue takes an implementation of
/// this trait explicitly; there is no process-wide default instance.
#[async_trait]
pub trait QueryService: Send + Sync {
    async fn execute_query(&self, query: &str) -> Result<TabularResult, SimtapError>;
}
