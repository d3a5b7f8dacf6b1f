//! Mock source for testing purposes.

use std::sync::Mutex;

use crate::models::{Paper, PaperBuilder};
use crate::sources::{PaperSource, SourceError};

/// A mock source that returns a predefined paper list.
#[derive(Debug, Default)]
pub struct MockSource {
    papers: Mutex<Vec<Paper>>,
    error: Mutex<Option<SourceError>>,
}

impl MockSource {
    /// Create a new mock source holding `papers`.
    pub fn new(papers: Vec<Paper>) -> Self {
        Self {
            papers: Mutex::new(papers),
            error: Mutex::new(None),
        }
    }

    /// Make the next loads fail with `error`.
    pub fn set_error(&self, error: SourceError) {
        if let Ok(mut guard) = self.error.lock() {
            *guard = Some(error);
        }
    }

    /// Replace the papers returned by this source.
    pub fn set_papers(&self, papers: Vec<Paper>) {
        if let Ok(mut guard) = self.papers.lock() {
            *guard = papers;
        }
    }
}

impl PaperSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn load(&self) -> Result<Vec<Paper>, SourceError> {
        let error = self
            .error
            .lock()
            .map_err(|e| SourceError::Io(e.to_string()))?;
        if let Some(err) = error.as_ref() {
            return Err(err.clone());
        }

        self.papers
            .lock()
            .map(|papers| papers.clone())
            .map_err(|e| SourceError::Io(e.to_string()))
    }
}

/// Helper function to create a mock paper for testing.
pub fn make_paper(title: &str, venue: &str, year: i32, month: i32) -> Paper {
    PaperBuilder::new(title)
        .venue(venue)
        .year(year)
        .month(month)
        .url(format!("http://example.com/{}", title.to_lowercase().replace(' ', "-")))
        .build()
}
