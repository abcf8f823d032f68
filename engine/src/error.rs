use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No CSV file found in '{}'", .dir.display())]
    MissingFileError { dir: PathBuf },

    #[error("Could not read '{}' under any candidate encoding: {}", .path.display(), .attempts.join("; "))]
    ReadError { path: PathBuf, attempts: Vec<String> },

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}
