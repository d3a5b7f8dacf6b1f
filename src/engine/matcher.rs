//! Query matching: progressive field-by-field narrowing of a paper set.

use crate::error::SearchError;
use crate::models::{OrGroup, Paper, Query, QueryField, TemporalRange, SEARCH_PRIORITY};

/// Brute-force search over every paper
///
/// Fields are evaluated in [`SEARCH_PRIORITY`] order. Each present field
/// drops the papers that fail it and hands the survivors, in their original
/// order, to the next field. A malformed temporal range aborts the whole
/// search before any paper is tested against that field.
pub fn exhausted_search(papers: &[Paper], query: &Query) -> Result<Vec<Paper>, SearchError> {
    for name in query.ignored_fields() {
        tracing::warn!("Ignoring unknown query field '{}'", name);
    }

    let mut working: Vec<&Paper> = papers.iter().collect();

    for field in SEARCH_PRIORITY {
        let Some(clause) = query.get(field) else {
            continue;
        };
        let before = working.len();

        if field.is_temporal() {
            let ranges = clause
                .groups()
                .iter()
                .map(|group| TemporalRange::parse(field, group))
                .collect::<Result<Vec<_>, _>>()?;

            working.retain(|paper| matches_ranges(paper, field, &ranges));
        } else {
            working.retain(|paper| matches_clause(paper.field_text(field).unwrap_or_default(), clause));
        }

        tracing::debug!("Filtered on {}: {} -> {} papers", field, before, working.len());
    }

    Ok(working.into_iter().cloned().collect())
}

fn matches_ranges(paper: &Paper, field: QueryField, ranges: &[TemporalRange]) -> bool {
    let value = i64::from(paper.field_number(field).unwrap_or_default());
    ranges.iter().any(|range| range.contains(value))
}

/// Whether any AND-group of `clause` fully matches `value`
pub fn matches_clause(value: &str, clause: &OrGroup) -> bool {
    let value = value.to_ascii_lowercase();

    clause.groups().iter().any(|group| {
        group
            .statements()
            .iter()
            .all(|stmt| matches_lowered(&stmt.as_str().to_ascii_lowercase(), &value))
    })
}

/// Match a single statement against a field value, ignoring ASCII case.
///
/// A statement containing a space is a phrase and matches anywhere in the
/// value. Any other statement must equal one whitespace-separated token.
pub fn statement_matches(statement: &str, value: &str) -> bool {
    matches_lowered(&statement.to_ascii_lowercase(), &value.to_ascii_lowercase())
}

fn matches_lowered(statement: &str, value: &str) -> bool {
    if statement.contains(' ') {
        value.contains(statement)
    } else {
        value.split_whitespace().any(|token| token == statement)
    }
}
