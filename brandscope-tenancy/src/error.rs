// Error types for brand configuration loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load brand configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse brand configuration: {0}")]
    ParseError(String),

    #[error("Invalid brand configuration: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
