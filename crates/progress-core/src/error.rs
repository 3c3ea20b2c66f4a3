use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while reading clippings and deriving progress.
#[derive(Error, Debug)]
pub enum ProgressError {
    /// The clippings file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A title or metadata line did not have the expected shape.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A timestamp string did not match the clippings calendar format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// The requested book title is absent from the clippings file.
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// Normalisation would divide by a zero book length.
    #[error("Book length is zero for {0}")]
    ZeroBookLength(String),

    /// A density estimate was requested for degenerate input.
    #[error("Cannot estimate density: {0}")]
    Density(String),

    /// A chart could not be assembled from the series.
    #[error("Cannot draw chart: {0}")]
    Chart(String),

    /// A series could not be serialised to JSON.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ProgressError {
    /// Shorthand for a [`ProgressError::Parse`] at `line`.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        ProgressError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the progress crates.
pub type Result<T> = std::result::Result<T, ProgressError>;
