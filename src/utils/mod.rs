//! Utility modules supporting the command-line interface.
//!
//! - [`render_table`]: Render a results page as a terminal table
//! - [`render_plain`]: Render a results page as plain text
//! - [`truncate_with_ellipsis`]: Unicode-aware truncation for table cells

mod display;

pub use display::{
    is_terminal, page_summary, render_plain, render_table, terminal_width,
    truncate_with_ellipsis, DEFAULT_WIDTH,
};
