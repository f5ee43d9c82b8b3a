//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

use crate::core::Project;

/// Catalog configuration with layered hierarchy
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Database file (relative paths resolve against the project root)
    pub database: Option<PathBuf>,

    /// Default output format for listings
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(project: Option<&Project>) -> Self {
        let mut config = Config::default();

        // 1. Global user config (~/.config/warband/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 2. Project config (.warband/config.yaml)
        if let Some(project) = project {
            if let Some(project_config) = Self::read_file(&project.config_dir().join("config.yaml"))
            {
                config.merge(project_config);
            }
        }

        // 3. Environment variables
        if let Ok(db) = std::env::var("WARBAND_DB") {
            if !db.is_empty() {
                config.database = Some(PathBuf::from(db));
            }
        }
        if let Ok(format) = std::env::var("WARBAND_FORMAT") {
            if !format.is_empty() {
                config.default_format = Some(format);
            }
        }

        config
    }

    fn read_file(path: &std::path::Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Option<Config>>(&contents) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                None
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "warband")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            database: Some(PathBuf::from("a.db")),
            default_format: Some("table".to_string()),
        };
        base.merge(Config {
            database: Some(PathBuf::from("b.db")),
            default_format: None,
        });

        assert_eq!(base.database, Some(PathBuf::from("b.db")));
        assert_eq!(base.default_format.as_deref(), Some("table"));
    }

    #[test]
    fn test_commented_config_parses_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "# only comments\n# database: x.db\n").unwrap();

        assert_eq!(Config::read_file(&path), None);
    }

    #[test]
    fn test_reads_database_key() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "database: data/items.db\n").unwrap();

        let config = Config::read_file(&path).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("data/items.db")));
    }
}
