//! Result shaping: deduplication, sorting and pagination.

use std::collections::HashSet;

use crate::error::SearchError;
use crate::models::{Paper, SearchPage, SortField, SortOrder};

/// Collapse identical papers and order by `(year, month)`, newest first.
///
/// The first occurrence of each paper is kept. Papers sharing a date keep
/// their relative order. An empty list is returned untouched.
pub fn dedupe_and_sort(papers: Vec<Paper>) -> Vec<Paper> {
    if papers.is_empty() {
        return papers;
    }

    let keep: Vec<bool> = {
        let mut seen: HashSet<&Paper> = HashSet::with_capacity(papers.len());
        papers.iter().map(|paper| seen.insert(paper)).collect()
    };

    let mut unique: Vec<Paper> = papers
        .into_iter()
        .zip(keep)
        .filter_map(|(paper, keep)| keep.then_some(paper))
        .collect();

    unique.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
    unique
}

/// Stable sort on the raw value of `field`
pub fn sort_papers(papers: &mut [Paper], field: SortField, order: SortOrder) {
    papers.sort_by(|a, b| {
        let ordering = field.key(a).cmp(&field.key(b));
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

/// Cut one page out of `papers`
///
/// Pages start at 1. Page 0 and pages past the end are empty but still
/// report the totals.
pub fn paginate(papers: Vec<Paper>, page: usize, page_size: usize) -> Result<SearchPage, SearchError> {
    if page_size == 0 {
        return Err(SearchError::InvalidPageSize(page_size));
    }

    let total_results = papers.len();
    let total_pages = total_results.div_ceil(page_size);
    let start = page.saturating_sub(1).saturating_mul(page_size);

    let papers = if page == 0 || start >= total_results {
        Vec::new()
    } else {
        papers.into_iter().skip(start).take(page_size).collect()
    };

    Ok(SearchPage {
        papers,
        total_results,
        page,
        total_pages,
    })
}
