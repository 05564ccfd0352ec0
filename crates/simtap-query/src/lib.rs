pub mod catalog;
pub mod parser;
pub mod runner;
pub mod templates;

pub use catalog::{describe_columns, id_exists, list_available_tables};
pub use parser::{parse_adql, validate_query};
pub use runner::{run_batch, BatchEvent, BatchObserver, BatchReport, CrossMatchRunner, TracingObserver};
pub use templates::{crossmatch_query, DEFAULT_ID_PREFIX};
