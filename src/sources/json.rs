//! JSON-backed paper sources.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::PathBuf;

use super::{PaperSource, SourceError};
use crate::models::Paper;

/// Wire shape of one record
///
/// Every key is optional. A value that is `null` or of the wrong type is
/// treated like a missing key.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPaper {
    #[serde(deserialize_with = "lenient_text")]
    title: String,
    #[serde(deserialize_with = "lenient_text")]
    author: String,
    #[serde(deserialize_with = "lenient_text")]
    r#abstract: String,
    #[serde(deserialize_with = "lenient_text")]
    url: String,
    #[serde(deserialize_with = "lenient_text")]
    doi: String,
    #[serde(deserialize_with = "lenient_text")]
    venue: String,
    #[serde(deserialize_with = "lenient_number")]
    year: i32,
    #[serde(deserialize_with = "lenient_number")]
    month: i32,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        _ => String::new(),
    })
}

/// Only JSON integers that fit `i32` are kept; floats and numeric strings become `0`
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or_default())
}

impl From<RawPaper> for Paper {
    fn from(raw: RawPaper) -> Self {
        Paper {
            title: raw.title,
            author: raw.author,
            r#abstract: raw.r#abstract,
            url: raw.url,
            doi: raw.doi,
            venue: raw.venue,
            year: raw.year,
            month: raw.month,
        }
    }
}

/// Build a paper list from a JSON string
///
/// Only a document that is not a JSON array is an error. Individual records
/// never fail the load: an element that is not an object becomes an empty
/// paper, and bad values inside an object fall back to their defaults.
pub fn build_paper_list(json: &str) -> Result<Vec<Paper>, SourceError> {
    let records: Vec<Value> =
        serde_json::from_str(json).map_err(|e| SourceError::Parse(e.to_string()))?;

    let papers = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| match RawPaper::deserialize(record) {
            Ok(raw) => Paper::from(raw),
            Err(e) => {
                tracing::warn!("Record {} is not an object, using defaults: {}", index, e);
                Paper::default()
            }
        })
        .collect();

    Ok(papers)
}

/// Papers held in an in-memory JSON document
#[derive(Debug, Clone)]
pub struct JsonSource {
    json: String,
}

impl JsonSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl PaperSource for JsonSource {
    fn id(&self) -> &str {
        "json"
    }

    fn load(&self) -> Result<Vec<Paper>, SourceError> {
        let papers = build_paper_list(&self.json)?;
        tracing::debug!("Parsed {} papers from JSON input", papers.len());
        Ok(papers)
    }
}

/// Papers stored in a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PaperSource for JsonFileSource {
    fn id(&self) -> &str {
        "json-file"
    }

    fn load(&self) -> Result<Vec<Paper>, SourceError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| SourceError::Io(format!("{}: {}", self.path.display(), e)))?;

        let papers = build_paper_list(&content)?;
        tracing::info!("Loaded {} papers from {}", papers.len(), self.path.display());
        Ok(papers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaperBuilder;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"[
        {"title": "Advances in NLP", "author": "Jane Doe, John Smith", "year": 2023, "month": 6,
         "venue": "ACL", "abstract": "Recent advances.", "url": "http://example.com/paper1",
         "doi": "10.1234/paper1"},
        {"title": "Transformer Architectures", "year": 2023, "month": 9, "venue": "EMNLP"}
    ]"#;

    #[test]
    fn test_build_paper_list() {
        let papers = build_paper_list(SAMPLE).unwrap();

        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].title, "Advances in NLP");
        assert_eq!(papers[0].r#abstract, "Recent advances.");
        assert_eq!(papers[0].doi, "10.1234/paper1");
        assert_eq!(papers[1].url, "");
        assert_eq!(papers[1].doi, "");
        assert_eq!(papers[1].author, "");
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let papers = build_paper_list(r#"[{}, {"title": null, "year": null, "extra": 1}]"#).unwrap();

        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0], Paper::default());
        assert_eq!(papers[1], Paper::default());
    }

    #[test]
    fn test_rejects_non_array() {
        let err = build_paper_list(r#"{"title": "x"}"#).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_wrong_types_fall_back_to_defaults() {
        let papers = build_paper_list(
            r#"[
                {"title": "Good", "venue": "ACL", "year": 2023, "month": 6},
                {"title": "Odd", "venue": ["ACL"], "author": 7, "year": 2022.0, "month": "12"},
                {"title": "Huge", "year": 99999999999}
            ]"#,
        )
        .unwrap();

        assert_eq!(papers.len(), 3);
        assert_eq!(
            papers[0],
            PaperBuilder::new("Good").venue("ACL").year(2023).month(6).build()
        );
        assert_eq!(papers[1].title, "Odd");
        assert_eq!(papers[1].venue, "");
        assert_eq!(papers[1].author, "");
        assert_eq!((papers[1].year, papers[1].month), (0, 0));
        assert_eq!(papers[2].year, 0);
    }

    #[test]
    fn test_non_object_records_become_empty_papers() {
        let papers = build_paper_list(r#"[1, "text", null, {"title": "Kept"}]"#).unwrap();

        assert_eq!(papers.len(), 4);
        assert!(papers[..3].iter().all(|p| *p == Paper::default()));
        assert_eq!(papers[3].title, "Kept");
    }

    #[test]
    fn test_json_file_source() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let source = JsonFileSource::new(file.path());
        let papers = source.load().unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(source.id(), "json-file");
    }

    #[test]
    fn test_json_file_source_missing_file() {
        let source = JsonFileSource::new("/nonexistent/papers.json");
        assert!(matches!(source.load(), Err(SourceError::Io(_))));
    }
}
