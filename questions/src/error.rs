use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of questions, found {0}")]
    NotAnArray(&'static str),

    #[error("Missing CSV column(s): expected {expected}, got {actual}")]
    MissingColumns { expected: String, actual: String },

    #[error("Unsupported puzzle file version: {0}")]
    UnsupportedVersion(String),
}
