//! Query, sort and result models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::Paper;
use crate::error::SearchError;

/// A field that can be constrained by a [`Query`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryField {
    Year,
    Month,
    Venue,
    Author,
    Title,
    Abstract,
}

/// Order in which query fields are evaluated.
///
/// Temporal fields come first, so malformed ranges are rejected before any
/// text matching happens.
pub const SEARCH_PRIORITY: [QueryField; 6] = [
    QueryField::Year,
    QueryField::Month,
    QueryField::Venue,
    QueryField::Author,
    QueryField::Title,
    QueryField::Abstract,
];

impl QueryField {
    /// Field name as used in queries
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryField::Year => "year",
            QueryField::Month => "month",
            QueryField::Venue => "venue",
            QueryField::Author => "author",
            QueryField::Title => "title",
            QueryField::Abstract => "abstract",
        }
    }

    /// Look up a field by its query name
    pub fn from_name(name: &str) -> Option<Self> {
        SEARCH_PRIORITY.into_iter().find(|f| f.as_str() == name)
    }

    /// Temporal fields are matched against numeric ranges instead of statements
    pub fn is_temporal(&self) -> bool {
        matches!(self, QueryField::Year | QueryField::Month)
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single case-insensitive search statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statement(String);

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Statement {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Statement {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// Statements that must all match
///
/// For temporal fields an AND-group holds exactly two numeric statements,
/// the inclusive lower and upper bounds of a range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AndGroup(Vec<Statement>);

impl AndGroup {
    pub fn new<I, S>(statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Statement>,
    {
        Self(statements.into_iter().map(Into::into).collect())
    }

    /// Parse `"parsing+tree-crf"` into two AND-ed statements.
    ///
    /// Empty pieces are dropped, surrounding whitespace is trimmed.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.split('+')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        )
    }

    pub fn statements(&self) -> &[Statement] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Alternatives, any of which may match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrGroup(Vec<AndGroup>);

impl OrGroup {
    pub fn new(groups: Vec<AndGroup>) -> Self {
        Self(groups)
    }

    pub fn groups(&self) -> &[AndGroup] {
        &self.0
    }

    pub fn push(&mut self, group: AndGroup) {
        self.0.push(group);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<AndGroup> for OrGroup {
    fn from_iter<T: IntoIterator<Item = AndGroup>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Structured multi-field query
///
/// Maps a field name to an OR of AND-groups. For example, this JSON query
/// finds papers published at EMNLP or ACL whose title contains both
/// "parsing" and "tree-crf", or the phrase "event extraction":
///
/// ```json
/// {
///   "venue": [["EMNLP"], ["ACL"]],
///   "title": [["parsing", "tree-crf"], ["event extraction"]]
/// }
/// ```
///
/// Names that are not one of [`SEARCH_PRIORITY`] are kept but never
/// evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    clauses: BTreeMap<String, OrGroup>,
}

impl Query {
    /// Create an empty query that matches every paper
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an AND-group of statements as one more alternative for `field`
    pub fn any_of<I, S>(mut self, field: QueryField, statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Statement>,
    {
        self.push(field.as_str(), AndGroup::new(statements));
        self
    }

    /// Add an inclusive range as one more alternative for a temporal field
    pub fn range(self, field: QueryField, low: i64, high: i64) -> Self {
        self.any_of(field, [low.to_string(), high.to_string()])
    }

    /// Replace the whole clause stored under `name`
    pub fn insert(&mut self, name: impl Into<String>, group: OrGroup) {
        self.clauses.insert(name.into(), group);
    }

    /// Append an AND-group to the clause stored under `name`
    pub fn push(&mut self, name: impl Into<String>, group: AndGroup) {
        self.clauses.entry(name.into()).or_default().push(group);
    }

    /// Clause for a known field
    pub fn get(&self, field: QueryField) -> Option<&OrGroup> {
        self.clauses.get(field.as_str())
    }

    /// Names present in the query that no field answers to
    pub fn ignored_fields(&self) -> impl Iterator<Item = &str> {
        self.clauses
            .keys()
            .map(String::as_str)
            .filter(|name| QueryField::from_name(name).is_none())
    }

    /// Append every alternative of `other` to this query
    pub fn merge(mut self, other: Query) -> Self {
        for (name, groups) in other.clauses {
            for group in groups.0 {
                self.push(name.clone(), group);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Inclusive numeric range used for temporal fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalRange {
    pub low: i64,
    pub high: i64,
}

impl TemporalRange {
    /// Parse a two-statement AND-group such as `["2022", "2023"]`
    pub fn parse(field: QueryField, group: &AndGroup) -> Result<Self, SearchError> {
        match group.statements() {
            [low, high] => Ok(Self {
                low: parse_bound(field, low.as_str())?,
                high: parse_bound(field, high.as_str())?,
            }),
            other => Err(SearchError::InvalidQuery(format!(
                "{} range needs exactly 2 bounds, got {}",
                field,
                other.len()
            ))),
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.low <= value && value <= self.high
    }
}

fn parse_bound(field: QueryField, token: &str) -> Result<i64, SearchError> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SearchError::InvalidQuery(format!(
            "{} bound '{}' is not a number",
            field, token
        )));
    }
    token.parse().map_err(|_| {
        SearchError::InvalidQuery(format!("{} bound '{}' is out of range", field, token))
    })
}

/// Sort order for search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[serde(alias = "asc")]
    Ascending,
    #[default]
    #[serde(alias = "desc")]
    Descending,
}

impl FromStr for SortOrder {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(SearchError::InvalidSortOrder(s.to_string())),
        }
    }
}

/// Record field used for custom sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Title,
    Author,
    Abstract,
    Url,
    Doi,
    Venue,
    Year,
    Month,
}

impl SortField {
    pub const ALL: [SortField; 8] = [
        SortField::Title,
        SortField::Author,
        SortField::Abstract,
        SortField::Url,
        SortField::Doi,
        SortField::Venue,
        SortField::Year,
        SortField::Month,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::Abstract => "abstract",
            SortField::Url => "url",
            SortField::Doi => "doi",
            SortField::Venue => "venue",
            SortField::Year => "year",
            SortField::Month => "month",
        }
    }

    /// Raw value of this field on `paper`
    pub fn key<'a>(&self, paper: &'a Paper) -> SortKey<'a> {
        match self {
            SortField::Title => SortKey::Text(&paper.title),
            SortField::Author => SortKey::Text(&paper.author),
            SortField::Abstract => SortKey::Text(&paper.r#abstract),
            SortField::Url => SortKey::Text(&paper.url),
            SortField::Doi => SortKey::Text(&paper.doi),
            SortField::Venue => SortKey::Text(&paper.venue),
            SortField::Year => SortKey::Number(paper.year),
            SortField::Month => SortKey::Number(paper.month),
        }
    }
}

impl FromStr for SortField {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| SearchError::InvalidSortField(s.to_string()))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparable value extracted by [`SortField::key`]
///
/// Keys from the same field always share a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey<'a> {
    Number(i32),
    Text(&'a str),
}

/// Matching strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    /// Brute-force scan of every paper, field by field
    #[default]
    Exhausted,
}

impl SearchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMethod::Exhausted => "exhausted",
        }
    }
}

impl FromStr for SearchMethod {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exhausted" => Ok(SearchMethod::Exhausted),
            other => Err(SearchError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Sorting and pagination parameters for an advanced search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Custom sort field, overriding the default `(year, month)` ordering
    pub sort_by: Option<SortField>,

    /// Direction of the custom sort
    pub sort_order: SortOrder,

    /// Page number, starting from 1
    pub page: usize,

    /// Number of papers per page
    pub page_size: usize,

    /// Matching strategy
    pub method: SearchMethod,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            sort_by: None,
            sort_order: SortOrder::Descending,
            page: 1,
            page_size: 10,
            method: SearchMethod::Exhausted,
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set sort by
    pub fn sort_by(mut self, field: SortField) -> Self {
        self.sort_by = Some(field);
        self
    }

    /// Set sort order
    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    /// Set page number
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Set page size
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set matching strategy
    pub fn method(mut self, method: SearchMethod) -> Self {
        self.method = method;
        self
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Papers on the requested page
    pub papers: Vec<Paper>,

    /// Number of papers matching the query across all pages
    pub total_results: usize,

    /// Requested page number
    pub page: usize,

    /// Number of pages available
    pub total_pages: usize,
}

impl SearchPage {
    /// Whether pages after this one exist
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let names: Vec<&str> = SEARCH_PRIORITY.iter().map(|f| f.as_str()).collect();
        assert_eq!(names, ["year", "month", "venue", "author", "title", "abstract"]);
        assert!(QueryField::Year.is_temporal());
        assert!(!QueryField::Venue.is_temporal());
    }

    #[test]
    fn test_query_from_json() {
        let query: Query = serde_json::from_str(
            r#"{"venue": [["EMNLP"], ["ACL"]], "title": [["parsing", "tree-crf"], ["event extraction"]]}"#,
        )
        .unwrap();

        let venue = query.get(QueryField::Venue).unwrap();
        assert_eq!(venue.len(), 2);
        assert_eq!(venue.groups()[1].statements()[0].as_str(), "ACL");

        let title = query.get(QueryField::Title).unwrap();
        assert_eq!(title.groups()[0].len(), 2);
        assert!(query.get(QueryField::Year).is_none());
    }

    #[test]
    fn test_query_builder_appends_alternatives() {
        let query = Query::new()
            .any_of(QueryField::Venue, ["EMNLP"])
            .any_of(QueryField::Venue, ["ACL"])
            .range(QueryField::Year, 2020, 2022);

        assert_eq!(query.len(), 2);
        assert_eq!(query.get(QueryField::Venue).unwrap().len(), 2);
        let year = &query.get(QueryField::Year).unwrap().groups()[0];
        assert_eq!(year, &AndGroup::new(["2020", "2022"]));
    }

    #[test]
    fn test_ignored_fields() {
        let mut query = Query::new().any_of(QueryField::Title, ["nlp"]);
        query.push("doi", AndGroup::new(["10.1234"]));

        assert_eq!(query.ignored_fields().collect::<Vec<_>>(), vec!["doi"]);
    }

    #[test]
    fn test_query_merge() {
        let a = Query::new().any_of(QueryField::Venue, ["ACL"]);
        let b = Query::new()
            .any_of(QueryField::Venue, ["EMNLP"])
            .any_of(QueryField::Author, ["Doe"]);

        let merged = a.merge(b);
        assert_eq!(merged.get(QueryField::Venue).unwrap().len(), 2);
        assert_eq!(merged.get(QueryField::Author).unwrap().len(), 1);
    }

    #[test]
    fn test_and_group_parse() {
        let group = AndGroup::parse("parsing + tree-crf+");
        assert_eq!(group, AndGroup::new(["parsing", "tree-crf"]));
    }

    #[test]
    fn test_temporal_range_parse() {
        let range = TemporalRange::parse(QueryField::Year, &AndGroup::new(["2020", "2022"])).unwrap();
        assert_eq!(range, TemporalRange { low: 2020, high: 2022 });
        assert!(range.contains(2020));
        assert!(range.contains(2022));
        assert!(!range.contains(2023));
    }

    #[test]
    fn test_temporal_range_rejects_malformed() {
        let cases = [
            AndGroup::new(["2020"]),
            AndGroup::new(["2020", "2021", "2022"]),
            AndGroup::new(["2020", "soon"]),
            AndGroup::new(["-1", "3"]),
            AndGroup::new(["", "3"]),
            AndGroup::new(["1", "99999999999999999999999"]),
        ];

        for group in &cases {
            let err = TemporalRange::parse(QueryField::Month, group).unwrap_err();
            assert!(matches!(err, SearchError::InvalidQuery(_)), "{:?}", group);
        }
    }

    #[test]
    fn test_sort_field_from_str() {
        assert_eq!("year".parse::<SortField>().unwrap(), SortField::Year);
        assert_eq!("doi".parse::<SortField>().unwrap(), SortField::Doi);
        assert_eq!(
            "citations".parse::<SortField>().unwrap_err(),
            SearchError::InvalidSortField("citations".to_string())
        );
    }

    #[test]
    fn test_sort_key_extracts_raw_value() {
        let paper = crate::models::PaperBuilder::new("Title").year(2021).build();
        assert_eq!(SortField::Year.key(&paper), SortKey::Number(2021));
        assert_eq!(SortField::Title.key(&paper), SortKey::Text("Title"));
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!("descending".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert!(matches!(
            "sideways".parse::<SortOrder>(),
            Err(SearchError::InvalidSortOrder(_))
        ));
        assert_eq!(SortOrder::default(), SortOrder::Descending);
    }

    #[test]
    fn test_search_method_from_str() {
        assert_eq!("exhausted".parse::<SearchMethod>().unwrap(), SearchMethod::Exhausted);
        assert_eq!(
            "vector".parse::<SearchMethod>().unwrap_err(),
            SearchError::UnsupportedMethod("vector".to_string())
        );
    }

    #[test]
    fn test_search_options_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.page, 1);
        assert_eq!(options.page_size, 10);
        assert_eq!(options.sort_by, None);
        assert_eq!(options.sort_order, SortOrder::Descending);
    }

    #[test]
    fn test_search_page_has_more() {
        let page = SearchPage {
            papers: Vec::new(),
            total_results: 3,
            page: 1,
            total_pages: 2,
        };
        assert!(page.has_more());
        assert!(page.is_empty());
    }
}
