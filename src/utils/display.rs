//! Terminal display utilities for search results.

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use terminal_size::terminal_size;
use unicode_width::UnicodeWidthChar;

use crate::config::DisplayConfig;
use crate::models::SearchPage;

/// Terminal information with cached size and capabilities.
#[derive(Debug, Clone)]
pub struct Terminal {
    width: usize,
    is_tty: bool,
}

static TERMINAL_INFO: OnceLock<Terminal> = OnceLock::new();

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Get the global terminal information, initialized on first call.
pub fn terminal_info() -> &'static Terminal {
    TERMINAL_INFO.get_or_init(|| Terminal {
        width: terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(DEFAULT_WIDTH),
        is_tty: io::stdout().is_terminal(),
    })
}

/// Get the current terminal width in characters.
#[inline]
pub fn terminal_width() -> usize {
    terminal_info().width
}

/// Check if stdout is a terminal.
#[inline]
pub fn is_terminal() -> bool {
    terminal_info().is_tty
}

/// Truncate text to fit within the specified display width.
///
/// Wide characters count double. An ellipsis is appended when anything
/// was cut.
///
/// # Examples
///
/// ```
/// use paper_search::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let width_of = |c: char| c.width().unwrap_or(1);
    if text.chars().map(width_of).sum::<usize>() <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let kept: String = text
        .chars()
        .take_while(|&c| {
            used += width_of(c);
            used <= budget
        })
        .collect();

    format!("{}...", kept)
}

/// Render a page as a table
pub fn render_table(page: &SearchPage, display: &DisplayConfig) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(terminal_width().min(u16::MAX as usize) as u16)
        .set_header(vec!["Title", "Authors", "Venue", "Date"]);

    for paper in &page.papers {
        table.add_row(vec![
            Cell::new(truncate_with_ellipsis(&paper.title, display.title_width))
                .add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&paper.author_list().join(", "), display.author_width)),
            Cell::new(&paper.venue),
            Cell::new(paper.date_label()),
        ]);
    }

    format!("{table}\n{}", page_summary(page))
}

/// Render a page as plain text, one block per paper
pub fn render_plain(page: &SearchPage) -> String {
    let mut out = String::new();
    for paper in &page.papers {
        out.push_str(&format!(
            "{} - {} ({})\n",
            paper.title,
            paper.author_list().join(", "),
            paper.venue
        ));
        if !paper.url.is_empty() {
            out.push_str(&format!("  URL: {}\n", paper.url));
        }
        if !paper.doi.is_empty() {
            out.push_str(&format!("  DOI: {}\n", paper.doi));
        }
        out.push('\n');
    }
    out.push_str(&page_summary(page));
    out
}

/// One-line pagination summary
pub fn page_summary(page: &SearchPage) -> String {
    format!(
        "Page {} of {} ({} results)",
        page.page, page.total_pages, page.total_results
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaperBuilder;

    fn sample_page() -> SearchPage {
        SearchPage {
            papers: vec![PaperBuilder::new("Advances in NLP")
                .author("Jane Doe;John Smith")
                .venue("ACL")
                .doi("10.1234/paper1")
                .year(2023)
                .month(6)
                .build()],
            total_results: 3,
            page: 1,
            total_pages: 2,
        }
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
        assert_eq!(truncate_with_ellipsis("Hello", 5), "Hello");
        assert_eq!(truncate_with_ellipsis("Hello", 0), "");
        assert_eq!(truncate_with_ellipsis("Hello World", 2), "...");
    }

    #[test]
    fn test_truncate_wide_characters() {
        // each CJK character is two columns wide
        assert_eq!(truncate_with_ellipsis("日本語のテキスト", 7), "日本...");
    }

    #[test]
    fn test_page_summary() {
        assert_eq!(page_summary(&sample_page()), "Page 1 of 2 (3 results)");
    }

    #[test]
    fn test_render_plain() {
        let out = render_plain(&sample_page());
        assert!(out.starts_with("Advances in NLP - Jane Doe, John Smith (ACL)\n"));
        assert!(out.contains("  DOI: 10.1234/paper1\n"));
        assert!(!out.contains("URL:"));
    }

    #[test]
    fn test_render_table() {
        let out = render_table(&sample_page(), &DisplayConfig::default());
        assert!(out.contains("Advances in NLP"));
        assert!(out.contains("2023-06"));
        assert!(out.ends_with("Page 1 of 2 (3 results)"));
    }
}
