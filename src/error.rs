// Error types for the kickstart application.
// Handles job board API errors, cache errors, and configuration errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Job board API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Invalid data received: {0}")]
    InvalidData(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not determine a cache directory; pass --cache-dir")]
    NoCacheDir,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;

/// Failures shown to the user in the shared message slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    CountriesFetchFailed,
    InternshipsFetchFailed,
}

impl FetchFailure {
    /// Banner text for this failure.
    pub fn message(&self) -> &'static str {
        match self {
            FetchFailure::CountriesFetchFailed => "Error fetching countries",
            FetchFailure::InternshipsFetchFailed => "Error fetching internships",
        }
    }
}
