//! City dataset error types.

use std::path::PathBuf;

/// Errors that make the city dataset unavailable.
///
/// Fatal at startup. During a refresh the previously loaded graph stays
/// in service instead.
#[derive(Debug, thiserror::Error)]
pub enum CityDataError {
    /// Dataset file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote source returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Dataset is not a JSON array of records
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A record is missing a field or has a non-numeric coordinate
    #[error("invalid record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// Two records share a city name
    #[error("duplicate city name: {0}")]
    DuplicateCity(String),

    /// Dataset has no records
    #[error("dataset contains no cities")]
    Empty,
}
