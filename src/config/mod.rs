//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `PAPER_SEARCH_*` environment variables (nested keys joined with
//! `__`, e.g. `PAPER_SEARCH_SEARCH__DEFAULT_PAGE_SIZE=25`).

mod file_config;

pub use file_config::{default_config_path, find_config_file, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SearchError;
use crate::models::{SearchMethod, SearchOptions, SortOrder};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Table output settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults applied when a search does not set them explicitly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Papers per page
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// `asc` or `desc`
    #[serde(default = "default_sort_order")]
    pub default_sort_order: String,

    /// Matching strategy name
    #[serde(default = "default_method")]
    pub default_method: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            default_sort_order: default_sort_order(),
            default_method: default_method(),
        }
    }
}

impl SearchConfig {
    /// Search options seeded from these defaults
    pub fn options(&self) -> Result<SearchOptions, SearchError> {
        Ok(SearchOptions::new()
            .page_size(self.default_page_size)
            .sort_order(self.default_sort_order.parse::<SortOrder>()?)
            .method(self.default_method.parse::<SearchMethod>()?))
    }
}

fn default_page_size() -> usize {
    10
}

fn default_sort_order() -> String {
    "desc".to_string()
}

fn default_method() -> String {
    "exhausted".to_string()
}

/// Column widths for table output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_title_width")]
    pub title_width: usize,

    #[serde(default = "default_author_width")]
    pub author_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title_width: default_title_width(),
            author_width: default_author_width(),
        }
    }
}

fn default_title_width() -> usize {
    60
}

fn default_author_width() -> usize {
    30
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `json` for structured output, plain text otherwise
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("PAPER_SEARCH")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path).format(config::FileFormat::Toml))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from environment variables and defaults only
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(environment())
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.default_page_size, 10);
        assert_eq!(config.search.default_sort_order, "desc");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.display.title_width, 60);
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("paper-search.toml");
        std::fs::write(
            &path,
            r#"
[search]
default_page_size = 25
default_sort_order = "asc"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.search.default_page_size, 25);
        assert_eq!(config.search.default_sort_order, "asc");
        assert_eq!(config.search.default_method, "exhausted");
        assert_eq!(config.logging.format.as_deref(), Some("json"));
        assert_eq!(config.display.author_width, 30);
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config(Path::new("/nonexistent/paper-search.toml")).is_err());
    }

    #[test]
    fn test_search_config_options() {
        let config = SearchConfig {
            default_page_size: 5,
            default_sort_order: "asc".to_string(),
            default_method: "exhausted".to_string(),
        };

        let options = config.options().unwrap();
        assert_eq!(options.page_size, 5);
        assert_eq!(options.sort_order, crate::models::SortOrder::Ascending);
    }

    #[test]
    fn test_search_config_rejects_unknown_method() {
        let config = SearchConfig {
            default_method: "bm25".to_string(),
            ..Default::default()
        };

        assert_eq!(
            config.options().unwrap_err(),
            SearchError::UnsupportedMethod("bm25".to_string())
        );
    }
}
