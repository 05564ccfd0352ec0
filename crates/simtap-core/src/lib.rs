pub mod catalog;
pub mod error;
pub mod service;
pub mod targets;
pub mod transform;
pub mod types;

pub use catalog::TableSchema;
pub use error::SimtapError;
pub use service::QueryService;
pub use targets::{identifiers, load_target_list, parse_target_list};
pub use transform::{aggregate, concat, move_column_first};
pub use types::{Column, DataRow, DataValue, Identifier, TabularResult};
