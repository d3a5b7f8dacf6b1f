//! Basic usage example for the Paper Search library.
//!
//! This example loads a few papers from JSON and runs a structured query
//! with custom sorting and pagination.

use paper_search::engine::SearchEngine;
use paper_search::models::{Query, QueryField, SearchOptions, SortField, SortOrder};
use paper_search::sources::JsonSource;

const PAPERS: &str = r#"[
    {"title": "Efficient Parsing with Tree-CRF", "author": "Jane Doe", "venue": "ACL", "year": 2023, "month": 7},
    {"title": "Document-level Event Extraction", "author": "Alice Johnson", "venue": "EMNLP", "year": 2022, "month": 12},
    {"title": "Parsing Revisited", "author": "Bob Brown", "venue": "NAACL", "year": 2021, "month": 6}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let engine = SearchEngine::from_source(&JsonSource::new(PAPERS))?;
    println!("Loaded {} papers\n", engine.len());

    // Papers at ACL or EMNLP since 2022 whose title mentions
    // ("parsing" AND "tree-crf") OR the phrase "event extraction"
    let query = Query::new()
        .range(QueryField::Year, 2022, 2030)
        .any_of(QueryField::Venue, ["ACL"])
        .any_of(QueryField::Venue, ["EMNLP"])
        .any_of(QueryField::Title, ["parsing", "tree-crf"])
        .any_of(QueryField::Title, ["event extraction"]);

    let options = SearchOptions::new()
        .sort_by(SortField::Title)
        .sort_order(SortOrder::Ascending)
        .page_size(10);

    let page = engine.advanced_search(&query, &options)?;

    for (i, paper) in page.papers.iter().enumerate() {
        println!("{}. {}", i + 1, paper.title);
        println!("   Authors: {}", paper.author);
        println!("   Venue: {} ({})", paper.venue, paper.date_label());
    }
    println!("\nPage {} of {} ({} results)", page.page, page.total_pages, page.total_results);

    Ok(())
}
