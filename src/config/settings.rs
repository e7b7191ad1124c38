use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::GradeScale;

const DB_PATH_ENV: &str = "CRAGBOOK_DB";

fn default_gym() -> String {
    "Home Gym".to_string()
}
fn default_recent_climbs() -> usize {
    8
}
fn default_tick_rate_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Used by `login` when no e-mail argument is given.
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimbingConfig {
    #[serde(default = "default_gym")]
    pub default_gym: String,
    /// Ordered weakest to strongest. Shared by grade validation and every
    /// ranking in the stats engine.
    #[serde(default)]
    pub grade_scale: GradeScale,
}

impl Default for ClimbingConfig {
    fn default() -> Self {
        Self {
            default_gym: default_gym(),
            grade_scale: GradeScale::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_recent_climbs")]
    pub recent_climbs: usize,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            recent_climbs: default_recent_climbs(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub user: UserConfig,
    #[serde(default)]
    pub climbing: ClimbingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "cragbook")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::data_dir()?.join("cragbook.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Parsing config.toml")
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.climbing.default_gym, "Home Gym");
        assert_eq!(config.climbing.grade_scale, GradeScale::default());
        assert_eq!(config.display.recent_climbs, 8);
        assert!(config.user.email.is_none());
    }

    #[test]
    fn custom_grade_scale() {
        let config = AppConfig::parse(
            r#"
            [climbing]
            default_gym = "Bloc Shop"
            grade_scale = ["5a", "5b", "5c", "6a"]
            "#,
        )
        .unwrap();
        assert_eq!(config.climbing.default_gym, "Bloc Shop");
        assert_eq!(config.climbing.grade_scale.weakest(), "5a");
        assert_eq!(config.climbing.grade_scale.len(), 4);
    }

    #[test]
    fn invalid_grade_scale_is_rejected() {
        let err = AppConfig::parse(
            r#"
            [climbing]
            grade_scale = ["6a", "6a"]
            "#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = AppConfig::default();
        config.user.email = Some("sam@example.com".to_string());
        let text = toml::to_string_pretty(&config).unwrap();
        let back = AppConfig::parse(&text).unwrap();
        assert_eq!(back.user.email.as_deref(), Some("sam@example.com"));
        assert_eq!(back.climbing.grade_scale, config.climbing.grade_scale);
    }
}
