//! Core data models for papers, queries and search results.

mod paper;
mod search;

pub use paper::{Paper, PaperBuilder};
pub use search::{
    AndGroup, OrGroup, Query, QueryField, SearchMethod, SearchOptions, SearchPage, SortField,
    SortKey, SortOrder, Statement, TemporalRange, SEARCH_PRIORITY,
};
