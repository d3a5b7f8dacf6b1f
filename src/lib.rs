//! # Paper Search
//!
//! An in-memory search engine for bibliographic records with structured
//! multi-field queries.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Paper, Query, SearchPage, etc.)
//! - [`engine`]: Query matching and result shaping
//! - [`sources`]: Loaders that turn raw input into papers
//! - [`utils`]: Terminal output helpers
//! - [`config`]: Configuration management

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use engine::SearchEngine;
pub use error::SearchError;
pub use models::{Paper, Query, QueryField, SearchOptions, SearchPage};
pub use sources::{PaperSource, SourceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
