//! Configuration file discovery and loading.
//!
//! This module finds the yardplan configuration files and loads them with
//! their precedence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Name of the user configuration file inside the data directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// Name of the shared yard configuration file.
pub const PROJECT_CONFIG_FILE: &str = "yardplan.yaml";

/// Name of the machine-local yard configuration file.
pub const LOCAL_CONFIG_FILE: &str = "yardplan.local.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from the known locations.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use yardplan::config::ConfigLoader;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all configuration files.
    ///
    /// Searches for:
    /// 1. `config.yaml` in the data directory (precedence 1)
    /// 2. `yardplan.yaml` walking up from `working_dir` (precedence 2)
    /// 3. `yardplan.local.yaml` next to it (precedence 3)
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or parsed.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(data_dir)? {
            sources.push(user_config);
        }

        sources.extend(Self::discover_project_configs(working_dir)?);
        sources.sort_by_key(|s| s.precedence);

        Ok(sources)
    }

    fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = match data_dir {
            Some(dir) => dir.join(USER_CONFIG_FILE),
            None => crate::store::default_data_dir()?.join(USER_CONFIG_FILE),
        };

        if !config_path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Discover yard configurations by walking up directories.
    ///
    /// Stops at the first directory holding either file.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        let mut configs = Vec::new();
        let mut current = start_dir.to_path_buf();

        loop {
            for (name, precedence) in [(PROJECT_CONFIG_FILE, 2), (LOCAL_CONFIG_FILE, 3)] {
                let path = current.join(name);
                if path.exists() {
                    let config = Self::load_file(&path)?;
                    configs.push(ConfigSource {
                        path,
                        precedence,
                        config,
                    });
                }
            }

            if !configs.is_empty() || !current.pop() {
                break;
            }
        }

        Ok(configs)
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("failed to read configuration file: {e}"),
        })?;

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("invalid YAML: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        assert!(ConfigLoader::load_file(Path::new("/nonexistent/yardplan.yaml")).is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        fs::write(&path, "grid: [unterminated").unwrap();
        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "models: [Golf]\n").unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.models(), ["Golf"]);
    }

    #[test]
    fn test_discover_no_configs() {
        let temp_dir = TempDir::new().unwrap();
        let configs = ConfigLoader::discover_project_configs(temp_dir.path()).unwrap();
        assert!(configs.is_empty());
    }

    #[test]
    fn test_discover_both_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILE), "models: [Golf]\n").unwrap();
        fs::write(temp_dir.path().join(LOCAL_CONFIG_FILE), "models: [Polo]\n").unwrap();

        let configs = ConfigLoader::discover_project_configs(temp_dir.path()).unwrap();
        assert_eq!(configs.len(), 2);
        let local = configs.iter().find(|c| c.precedence == 3).unwrap();
        assert_eq!(local.config.models(), ["Polo"]);
    }

    #[test]
    fn test_discover_stops_at_first_config() {
        let temp_dir = TempDir::new().unwrap();
        let child = temp_dir.path().join("office");
        fs::create_dir(&child).unwrap();
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILE), "models: [Golf]\n").unwrap();

        let configs = ConfigLoader::discover_project_configs(&child).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].precedence, 2);
    }

    #[test]
    fn test_load_all_includes_data_dir_config() {
        let data_dir = TempDir::new().unwrap();
        let work_dir = TempDir::new().unwrap();
        fs::write(data_dir.path().join(USER_CONFIG_FILE), "grid: {rows: 5}\n").unwrap();
        fs::write(work_dir.path().join(LOCAL_CONFIG_FILE), "grid: {columns: 9}\n").unwrap();

        let sources = ConfigLoader::load_all(work_dir.path(), Some(data_dir.path())).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].precedence, 1);
        assert_eq!(sources[1].precedence, 3);
    }
}
