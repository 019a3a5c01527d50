use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "refbook.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// A book: where its sources live and in which order they are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub title: Option<String>,
    /// Word used in chapter references, e.g. "Lecture" gives "Lecture 2".
    pub chapname: String,
    pub appendix_name: String,
    /// Directory holding the document trees; relative to the config file.
    pub srcdir: PathBuf,
    /// Chapter files relative to `srcdir`, in reading order.
    pub chapters: Vec<String>,
    pub appendices: Vec<String>,
    /// Number blocks within top-level sections of unnumbered documents.
    pub sectnums: bool,
    pub max_depth: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            title: None,
            chapname: "Chapter".to_string(),
            appendix_name: "Appendix".to_string(),
            srcdir: PathBuf::from("."),
            chapters: Vec::new(),
            appendices: Vec::new(),
            sectnums: false,
            max_depth: 20,
        }
    }
}

impl BookConfig {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: BookConfig =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde, then anchor at the config file's directory
        let srcdir = Self::expand_path(&config.srcdir).unwrap_or(config.srcdir);
        config.srcdir = match config_path.parent() {
            Some(dir) if srcdir.is_relative() => dir.join(srcdir),
            _ => srcdir,
        };

        Ok(Some(config))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let config_file = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&config_file, content).unwrap();
        config_file
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: BookConfig = toml::from_str(r#"chapters = ["01.json"]"#).unwrap();

        assert_eq!(config.chapname, "Chapter");
        assert_eq!(config.appendix_name, "Appendix");
        assert_eq!(config.max_depth, 20);
        assert!(!config.sectnums);
        assert_eq!(config.chapters, vec!["01.json"]);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = BookConfig::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_srcdir_is_relative_to_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(
            &temp_dir,
            r#"
title = "Discrete Mathematics"
chapname = "Lecture"
srcdir = "trees"
chapters = ["index.json", "01-sets.json"]
appendices = ["app-a.json"]
"#,
        );

        let config = BookConfig::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.srcdir, temp_dir.path().join("trees"));
        assert_eq!(config.title.as_deref(), Some("Discrete Mathematics"));
        assert_eq!(config.chapname, "Lecture");
        assert_eq!(config.appendices, vec!["app-a.json"]);
    }

    #[test]
    fn test_srcdir_with_env_var() {
        unsafe {
            env::set_var("REFBOOK_TEST_SRC", "/books/discrete");
        }
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(&temp_dir, r#"srcdir = "$REFBOOK_TEST_SRC/trees""#);

        let config = BookConfig::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.srcdir, PathBuf::from("/books/discrete/trees"));
        unsafe {
            env::remove_var("REFBOOK_TEST_SRC");
        }
    }

    #[test]
    fn test_srcdir_with_tilde() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(&temp_dir, r#"srcdir = "~/book""#);

        let config = BookConfig::load_from_path(&config_file).unwrap().unwrap();

        let srcdir = config.srcdir.to_string_lossy();
        assert!(!srcdir.starts_with('~'));
        assert!(srcdir.ends_with("book"));
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(&temp_dir, "chapters = 3");

        let err = BookConfig::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join(DEFAULT_CONFIG_FILE);
        let test_config = BookConfig {
            srcdir: PathBuf::from("/tmp/book"),
            chapters: vec!["index.json".to_string()],
            sectnums: true,
            ..BookConfig::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = BookConfig::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
