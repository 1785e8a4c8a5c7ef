use anyhow::{Context, Result};
use chrono::Datelike;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::plans::models::{Priority, Status};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub planning: PlanningSettings,
    #[serde(default)]
    pub personnel: PersonnelSettings,
    #[serde(default)]
    pub inspect: InspectSettings,
    #[serde(default)]
    pub http: HttpSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningSettings {
    #[serde(default = "default_planning_base_url")]
    pub base_url: String,
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default)]
    pub default_priority: Priority,
    #[serde(default)]
    pub default_status: Status,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonnelSettings {
    #[serde(default = "default_personnel_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub renewal_file: Option<PathBuf>,
    #[serde(default = "default_overwrite_existing")]
    pub overwrite_existing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectSettings {
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
    #[serde(default = "default_preview_columns")]
    pub preview_columns: usize,
    #[serde(default)]
    pub expected_headers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_planning_base_url() -> String {
    "http://localhost:8094".to_string()
}

fn default_personnel_base_url() -> String {
    "http://localhost:8089".to_string()
}

fn default_year() -> i32 {
    chrono::Local::now().year()
}

fn default_overwrite_existing() -> bool {
    true
}

fn default_preview_rows() -> usize {
    3
}

fn default_preview_columns() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for PlanningSettings {
    fn default() -> Self {
        Self {
            base_url: default_planning_base_url(),
            year: default_year(),
            default_priority: Priority::default(),
            default_status: Status::default(),
        }
    }
}

impl Default for PersonnelSettings {
    fn default() -> Self {
        Self {
            base_url: default_personnel_base_url(),
            renewal_file: None,
            overwrite_existing: default_overwrite_existing(),
        }
    }
}

impl Default for InspectSettings {
    fn default() -> Self {
        Self {
            file: None,
            preview_rows: default_preview_rows(),
            preview_columns: default_preview_columns(),
            expected_headers: Vec::new(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Config {
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("isg-tools")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".isg-tools")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Resolve an explicit path or fall back to the per-user location
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_config_path(),
        }
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!(
            "Loaded config: planning={}, personnel={}, year={}",
            config.planning.base_url, config.personnel.base_url, config.planning.year
        );
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        debug!("Saving config to: {:?}", config_path);

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
                info!("Created config directory: {:?}", parent);
            }
        }

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_legacy_constants() {
        let config = Config::default();

        assert_eq!(config.planning.base_url, "http://localhost:8094");
        assert_eq!(config.personnel.base_url, "http://localhost:8089");
        assert!(config.personnel.overwrite_existing);
        assert_eq!(config.planning.default_priority, Priority::Medium);
        assert_eq!(config.planning.default_status, Status::Planned);
        assert_eq!(config.inspect.preview_rows, 3);
        assert_eq!(config.inspect.preview_columns, 10);
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [planning]
            year = 2025

            [personnel]
            overwrite_existing = false
            renewal_file = "/tmp/renewal.xlsx"
            "#,
        )
        .unwrap();

        assert_eq!(config.planning.year, 2025);
        assert_eq!(config.planning.base_url, "http://localhost:8094");
        assert!(!config.personnel.overwrite_existing);
        assert_eq!(
            config.personnel.renewal_file,
            Some(PathBuf::from("/tmp/renewal.xlsx"))
        );
        assert_eq!(config.http.connect_timeout_secs, 10);
    }

    #[test]
    fn test_enum_values_in_file() {
        let config: Config = toml::from_str(
            r#"
            [planning]
            default_priority = "High"
            default_status = "InProgress"
            "#,
        )
        .unwrap();

        assert_eq!(config.planning.default_priority, Priority::High);
        assert_eq!(config.planning.default_status, Status::InProgress);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.planning.base_url, "http://localhost:8094");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.planning.year = 2030;
        config.inspect.expected_headers = vec!["T.C. Kimlik No".to_string()];
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.planning.year, 2030);
        assert_eq!(loaded.inspect.expected_headers, vec!["T.C. Kimlik No"]);
    }

    #[test]
    fn test_unparsable_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[planning\nyear = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.toml"));
    }
}
