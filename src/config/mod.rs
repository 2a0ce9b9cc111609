use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::core::utils::{ensure_dir, PathResolver};
use crate::storage::DEFAULT_SLOT_KEY;

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Config parse error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Key of the snapshot slot the CLI opens.
    #[serde(default = "default_slot_key")]
    pub slot_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slot_key: default_slot_key(),
            export_dir: None,
            log_filter: None,
        }
    }
}

impl Config {
    /// Export directory, defaulting to `<base>/exports`.
    pub fn export_dir_in(&self, base: &Path) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathResolver::exports_dir_in(base))
    }
}

fn default_slot_key() -> String {
    DEFAULT_SLOT_KEY.to_string()
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Returns the stored config, or the defaults when none was saved.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.slot_key, "moneyMagnetData");
        assert_eq!(
            config.export_dir_in(dir.path()),
            dir.path().join("exports")
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            slot_key: "household".into(),
            export_dir: Some(dir.path().join("out")),
            log_filter: Some("money_magnet=debug".into()),
        };
        manager.save(&config).unwrap();
        assert!(manager.path().ends_with("config/config.json"));
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_file_uses_field_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "{\"logFilter\":\"warn\"}").unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.slot_key, DEFAULT_SLOT_KEY);
        assert_eq!(config.log_filter.as_deref(), Some("warn"));
    }
}
