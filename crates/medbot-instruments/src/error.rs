use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("malformed score range '{range}': {reason}")]
    Malformed { range: String, reason: String },
}

/// Failure to load the test catalog. Fatal at start-up.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read test catalog at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid test catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("test #{index} ({name}) is invalid: {reason}")]
    InvalidTest {
        index: usize,
        name: String,
        reason: String,
    },

    #[error("catalog must be an array of tests or an object with a `tests` array")]
    UnrecognizedShape,

    #[error("catalog contains no tests")]
    Empty,
}
