//! Extraction error types

use playbadge_fetch::FetchError;
use thiserror::Error;

/// Errors turning a listing page into a record.
///
/// The display text is returned to badge consumers as the error message.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Listing page could not be retrieved
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Page contains no data callback blocks at all
    #[error("listing page contains no embedded data")]
    NoCallbackBlocks,

    /// No callback block references the package
    #[error("no embedded data found for {package}")]
    NoDataSegment { package: String },

    /// Matching block has no `data:` field
    #[error("embedded data for {package} has no data field")]
    MissingDataKey { package: String },

    /// Data field is not valid JSON
    #[error("embedded data is not valid JSON: {0}")]
    MalformedData(#[from] serde_json::Error),

    /// Data field parsed, but not as an array
    #[error("embedded data is not an array")]
    NotAnArray,
}

/// Result type for extraction
pub type Result<T> = std::result::Result<T, ExtractionError>;
