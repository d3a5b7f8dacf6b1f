//! Paper sources that feed the search engine.
//!
//! A [`PaperSource`] turns some raw input into the list of [`Paper`] records
//! a [`SearchEngine`](crate::engine::SearchEngine) searches over. Sources are
//! loaded once; the engine never goes back to them.
//!
//! # Input Format
//!
//! [`JsonSource`] and [`JsonFileSource`] read a JSON array of objects:
//!
//! ```json
//! [
//!   {"title": "Advances in NLP", "author": "Jane Doe", "venue": "ACL", "year": 2023, "month": 6},
//!   {"title": "Transformer Architectures", "year": 2023}
//! ]
//! ```
//!
//! Missing, `null` or wrongly typed text keys become `""`, and the same for
//! numeric keys gives `0`. Unknown keys are ignored. A bad record never fails
//! the load; only a document that is not an array is a [`SourceError::Parse`].

mod json;
mod mock;

pub use json::{build_paper_list, JsonFileSource, JsonSource};
pub use mock::{make_paper, MockSource};

use crate::models::Paper;

/// A provider of paper records
pub trait PaperSource: Send + Sync + std::fmt::Debug {
    /// Short identifier used in logs
    fn id(&self) -> &str;

    /// Load every paper this source holds
    fn load(&self) -> Result<Vec<Paper>, SourceError>;
}

/// Errors that can occur when loading papers from a source
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    /// The underlying input could not be read
    #[error("IO error: {0}")]
    Io(String),

    /// The input is not a JSON array of paper objects
    #[error("Parse error: {0}")]
    Parse(String),
}
