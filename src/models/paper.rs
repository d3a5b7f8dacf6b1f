//! Paper model representing a single bibliographic record.

use serde::{Deserialize, Serialize};

use super::search::QueryField;

/// A bibliographic record held by the search engine
///
/// Papers are created once at load time and never mutated afterwards.
/// Two papers are the same paper when every field is equal, which is what
/// result deduplication relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Paper {
    /// Paper title
    #[serde(default)]
    pub title: String,

    /// Authors, as written in the source record
    #[serde(default)]
    pub author: String,

    /// Abstract text
    #[serde(default, rename = "abstract")]
    pub r#abstract: String,

    /// Paper page URL
    #[serde(default)]
    pub url: String,

    /// Digital Object Identifier
    #[serde(default)]
    pub doi: String,

    /// Publication venue (conference or journal)
    #[serde(default)]
    pub venue: String,

    /// Publication year, `0` when unknown
    #[serde(default)]
    pub year: i32,

    /// Publication month, `0` when unknown
    #[serde(default)]
    pub month: i32,
}

impl Paper {
    /// Create a new paper with only a title set
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Text value of a searchable field.
    ///
    /// Temporal fields have no text value and return `None`.
    pub fn field_text(&self, field: QueryField) -> Option<&str> {
        match field {
            QueryField::Venue => Some(&self.venue),
            QueryField::Author => Some(&self.author),
            QueryField::Title => Some(&self.title),
            QueryField::Abstract => Some(&self.r#abstract),
            QueryField::Year | QueryField::Month => None,
        }
    }

    /// Numeric value of a temporal field, `None` for text fields.
    pub fn field_number(&self, field: QueryField) -> Option<i32> {
        match field {
            QueryField::Year => Some(self.year),
            QueryField::Month => Some(self.month),
            _ => None,
        }
    }

    /// Returns the author names as a vector
    ///
    /// Sources separate authors with either commas or semicolons.
    pub fn author_list(&self) -> Vec<&str> {
        self.author
            .split([',', ';'])
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// `YYYY-MM` style label, or just the year when the month is unknown
    pub fn date_label(&self) -> String {
        match (self.year, self.month) {
            (0, _) => String::new(),
            (year, 0) => year.to_string(),
            (year, month) => format!("{}-{:02}", year, month),
        }
    }
}

/// Builder for constructing Paper objects
#[derive(Debug, Clone, Default)]
pub struct PaperBuilder {
    paper: Paper,
}

impl PaperBuilder {
    /// Create a new builder with the title set
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            paper: Paper::new(title),
        }
    }

    /// Set authors
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.paper.author = author.into();
        self
    }

    /// Set abstract
    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.paper.r#abstract = abstract_text.into();
        self
    }

    /// Set URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.paper.url = url.into();
        self
    }

    /// Set DOI
    pub fn doi(mut self, doi: impl Into<String>) -> Self {
        self.paper.doi = doi.into();
        self
    }

    /// Set venue
    pub fn venue(mut self, venue: impl Into<String>) -> Self {
        self.paper.venue = venue.into();
        self
    }

    /// Set publication year
    pub fn year(mut self, year: i32) -> Self {
        self.paper.year = year;
        self
    }

    /// Set publication month
    pub fn month(mut self, month: i32) -> Self {
        self.paper.month = month;
        self
    }

    /// Build the Paper
    pub fn build(self) -> Paper {
        self.paper
    }
}
