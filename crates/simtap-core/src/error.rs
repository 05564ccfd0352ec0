use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimtapError {
    #[error("query service error: {0}")]
    QueryService(String),
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
