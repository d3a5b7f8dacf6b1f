//! The in-memory search engine.
//!
//! A [`SearchEngine`] owns a read-only paper collection and answers
//! structured [`Query`] values against it:
//!
//! - [`SearchEngine::search`]: match, deduplicate and order newest first
//! - [`SearchEngine::advanced_search`]: the same, plus custom sorting and
//!   pagination into a [`SearchPage`]
//! - [`SearchEngine::build_and_search`]: load papers from JSON and run an
//!   advanced search in one call
//!
//! # Example
//!
//! ```rust
//! use paper_search::engine::SearchEngine;
//! use paper_search::models::{Query, QueryField, SearchOptions, SortField, SortOrder};
//!
//! # fn main() -> Result<(), paper_search::SearchError> {
//! let json = r#"[{"title": "Advances in NLP", "venue": "ACL", "year": 2023, "month": 6}]"#;
//! let query = Query::new()
//!     .any_of(QueryField::Venue, ["ACL"])
//!     .range(QueryField::Year, 2020, 2023);
//! let options = SearchOptions::new()
//!     .sort_by(SortField::Year)
//!     .sort_order(SortOrder::Ascending)
//!     .page_size(5);
//!
//! let page = SearchEngine::build_and_search(json, &query, &options)?;
//! assert_eq!(page.total_results, 1);
//! # Ok(())
//! # }
//! ```

pub mod matcher;
pub mod shaper;

use crate::error::SearchError;
use crate::models::{Paper, Query, SearchMethod, SearchOptions, SearchPage};
use crate::sources::{JsonSource, PaperSource};

/// Search engine over an immutable paper collection
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    papers: Vec<Paper>,
}

impl SearchEngine {
    /// Create an engine over `papers`
    pub fn new(papers: Vec<Paper>) -> Self {
        Self { papers }
    }

    /// Create an engine from everything `source` loads
    pub fn from_source(source: &dyn PaperSource) -> Result<Self, SearchError> {
        let papers = source.load()?;
        tracing::info!("Loaded {} papers from source '{}'", papers.len(), source.id());
        Ok(Self::new(papers))
    }

    /// All papers held by the engine, in load order
    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Search papers with the default method
    ///
    /// Matching papers are deduplicated and sorted by `(year, month)`,
    /// newest first.
    pub fn search(&self, query: &Query) -> Result<Vec<Paper>, SearchError> {
        self.search_with(query, SearchMethod::default())
    }

    /// Search papers with an explicit method
    pub fn search_with(&self, query: &Query, method: SearchMethod) -> Result<Vec<Paper>, SearchError> {
        let matched = match method {
            SearchMethod::Exhausted => matcher::exhausted_search(&self.papers, query)?,
        };

        tracing::debug!(
            "{} search matched {} of {} papers",
            method.as_str(),
            matched.len(),
            self.papers.len()
        );
        Ok(shaper::dedupe_and_sort(matched))
    }

    /// Search papers with a method given by name, e.g. `"exhausted"`
    pub fn search_by_name(&self, query: &Query, method: &str) -> Result<Vec<Paper>, SearchError> {
        self.search_with(query, method.parse::<SearchMethod>()?)
    }

    /// Search with custom sorting and pagination
    ///
    /// A custom sort field overrides the default `(year, month)` ordering;
    /// papers with equal keys keep their default order.
    pub fn advanced_search(
        &self,
        query: &Query,
        options: &SearchOptions,
    ) -> Result<SearchPage, SearchError> {
        if options.page_size == 0 {
            return Err(SearchError::InvalidPageSize(options.page_size));
        }

        let mut results = self.search_with(query, options.method)?;

        if let Some(field) = options.sort_by {
            shaper::sort_papers(&mut results, field, options.sort_order);
        }

        let page = shaper::paginate(results, options.page, options.page_size)?;
        tracing::info!(
            "Page {}/{} with {} of {} results",
            page.page,
            page.total_pages,
            page.papers.len(),
            page.total_results
        );
        Ok(page)
    }

    /// Build a paper list from a JSON string and immediately search it
    pub fn build_and_search(
        json: &str,
        query: &Query,
        options: &SearchOptions,
    ) -> Result<SearchPage, SearchError> {
        let engine = Self::from_source(&JsonSource::new(json))?;
        engine.advanced_search(query, options)
    }
}
