//! Configuration file discovery and writing.
//!
//! # Configuration File Format
//!
//! ```toml
//! [search]
//! default_page_size = 10
//! default_sort_order = "desc"
//! default_method = "exhausted"
//!
//! [display]
//! title_width = 60
//! author_width = 30
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use super::Config;

const LOCAL_CONFIG: &str = "paper-search.toml";

/// Per-user configuration path, e.g. `~/.config/paper-search/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("paper-search")
        .join("config.toml")
}

/// First existing config file: `./paper-search.toml`, then the per-user path
pub fn find_config_file() -> Option<PathBuf> {
    [PathBuf::from(LOCAL_CONFIG), default_config_path()]
        .into_iter()
        .find(|path| path.is_file())
}

impl Config {
    /// Save configuration to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::tempdir;

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.search.default_page_size = 3;
        config.logging.level = "warn".to_string();
        config.save(&path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.search.default_page_size, 3);
        assert_eq!(loaded.logging.level, "warn");
    }

    #[test]
    fn test_default_config_path() {
        let path = default_config_path();
        assert!(path.ends_with("paper-search/config.toml"));
    }
}
