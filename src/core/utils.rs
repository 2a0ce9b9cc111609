use dirs::home_dir;
use std::{
    env, fs,
    io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".money_magnet";
const HOME_ENV: &str = "MONEY_MAGNET_HOME";
const SLOTS_DIR: &str = "data";
const EXPORTS_DIR: &str = "exports";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Resolves the directories used by the application beneath a base directory.
pub struct PathResolver;

impl PathResolver {
    /// Returns `MONEY_MAGNET_HOME` when set, otherwise `~/.money_magnet`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(base: Option<PathBuf>) -> PathBuf {
        base.unwrap_or_else(Self::base_dir)
    }

    pub fn slots_dir_in(base: &Path) -> PathBuf {
        base.join(SLOTS_DIR)
    }

    pub fn exports_dir_in(base: &Path) -> PathBuf {
        base.join(EXPORTS_DIR)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
