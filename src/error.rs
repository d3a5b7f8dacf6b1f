//! Errors raised by search operations.

use crate::sources::SourceError;

/// Errors that can occur while searching papers
///
/// Every variant is a deterministic consequence of caller input; nothing
/// here is worth retrying.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// A temporal range entry is malformed
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The requested search strategy does not exist
    #[error("Unsupported search method: {0}")]
    UnsupportedMethod(String),

    /// The sort key is not a paper field
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    /// The sort direction is neither ascending nor descending
    #[error("Invalid sort order: {0}")]
    InvalidSortOrder(String),

    /// Page size must be at least 1
    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    /// Papers could not be loaded
    #[error(transparent)]
    Source(#[from] SourceError),
}
