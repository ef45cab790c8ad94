use crate::app::config::ConfigError;
use crate::app::initialization::InitializationError;
use crate::parser::ParseError;
use crate::store::StoreError;
use thiserror::Error;

/// Top-level error type for the patrol pipeline.
#[derive(Error, Debug)]
pub enum PatrolError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Initialization error: {0}")]
    Initialization(#[from] InitializationError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("Render error: {0}")]
    Render(#[from] serde_json::Error),
}
