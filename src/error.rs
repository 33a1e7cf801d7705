use thiserror::Error;

/// Result type for core parsing and matrix operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while decoding validation inputs.
///
/// Mismatches and duplicates are data, not errors; they are returned in
/// reports and never surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// Input decoded, but a required key or column is missing. The message
    /// names the offending key.
    #[error("invalid structure: {0}")]
    Structure(String),

    /// Input could not be decoded at all, or a cell value is not
    /// recognizable under the boolean coercion rule.
    #[error("malformed input: {0}")]
    Format(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        // serde data errors mean well-formed JSON with a missing or
        // mistyped key; the message names the field.
        match err.classify() {
            serde_json::error::Category::Data => Error::Structure(err.to_string()),
            _ => Error::Format(err.to_string()),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Format(err.to_string())
    }
}
