use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const EXTENSION_DIR_NAME: &str = "winswitch";
pub const DEFAULT_FALLBACK_ICON: &str = "images/icon.svg";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Parse(error) => write!(f, "parse error: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub cache_dir: PathBuf,
    pub fallback_icon: PathBuf,
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = default_cache_dir();
        Self {
            cache_dir: base.clone(),
            fallback_icon: PathBuf::from(DEFAULT_FALLBACK_ICON),
            config_path: base.join(CONFIG_FILE_NAME),
        }
    }
}

/// `${XDG_CACHE_HOME:-$HOME/.cache}/winswitch`, matching where launcher
/// hosts expect extension caches to live.
pub fn default_cache_dir() -> PathBuf {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
        .unwrap_or_else(std::env::temp_dir);
    base.join(EXTENSION_DIR_NAME)
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.cache_dir.as_os_str().is_empty() {
        return Err("cache_dir is required".into());
    }

    if cfg.fallback_icon.as_os_str().is_empty() {
        return Err("fallback_icon is required".into());
    }

    if cfg.config_path.as_os_str().is_empty() {
        return Err("config_path is required".into());
    }

    Ok(())
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    cache_dir: Option<PathBuf>,
    fallback_icon: Option<PathBuf>,
}

pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    if let Some(path) = path {
        config.config_path = path.to_path_buf();
    }

    if !config.config_path.is_file() {
        return Ok(config);
    }

    let raw = std::fs::read_to_string(&config.config_path)?;
    let file: ConfigFile =
        toml::from_str(&raw).map_err(|error| ConfigError::Parse(error.to_string()))?;

    if let Some(cache_dir) = file.cache_dir {
        config.cache_dir = cache_dir;
    }
    if let Some(fallback_icon) = file.fallback_icon {
        config.fallback_icon = fallback_icon;
    }

    Ok(config)
}

pub fn save(config: &Config) -> Result<(), ConfigError> {
    let file = ConfigFile {
        cache_dir: Some(config.cache_dir.clone()),
        fallback_icon: Some(config.fallback_icon.clone()),
    };
    let rendered =
        toml::to_string_pretty(&file).map_err(|error| ConfigError::Parse(error.to_string()))?;

    if let Some(parent) = config.config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config.config_path, rendered)?;
    Ok(())
}
