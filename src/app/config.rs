use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    APP_NAME, AUDIO_FETCH_TIMEOUT_SECS, DEFAULT_DATA_DIR, DEFAULT_HOST,
    DEFAULT_ORIGIN_BASE_URL, DEFAULT_PORT, DOWNLOAD_CHUNK_SIZE, ENV_PREFIX, LOCAL_CONFIG_PATH,
    TEXT_FETCH_TIMEOUT_SECS,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,

    /// Local cache location
    #[serde(default)]
    pub cache: CacheConfig,

    /// Remote origin settings
    #[serde(default)]
    pub origin: OriginConfig,

    /// Document served verbatim from `/api/config`
    #[serde(default)]
    pub practice: PracticeConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Root directory holding one subdirectory per chapter
    pub data_dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

/// Remote origin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginConfig {
    /// Base URL; chapter files live at `<base_url>/<slug>/<file>`
    pub base_url: String,
    pub text_timeout_secs: u64,
    pub audio_timeout_secs: u64,
    /// Write buffer size for streamed downloads (in bytes)
    pub chunk_size: usize,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ORIGIN_BASE_URL.to_string(),
            text_timeout_secs: TEXT_FETCH_TIMEOUT_SECS,
            audio_timeout_secs: AUDIO_FETCH_TIMEOUT_SECS,
            chunk_size: DOWNLOAD_CHUNK_SIZE,
        }
    }
}

/// Client-facing practice settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeConfig {
    pub defaults: PracticeDefaults,
    pub wait_modes: Vec<WaitMode>,
    pub playback_speed: SpeedRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeDefaults {
    pub wait_mode: String,
    pub duration: u32,
    pub playback_speed: f64,
    pub repeat_your_shloka: bool,
    pub participants: u32,
    pub your_turn: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitMode {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            defaults: PracticeDefaults {
                wait_mode: "keyboard".to_string(),
                duration: 20,
                playback_speed: 1.5,
                repeat_your_shloka: false,
                participants: 4,
                your_turn: 2,
            },
            wait_modes: vec![
                WaitMode {
                    id: "keyboard".to_string(),
                    label: "Keyboard Hit".to_string(),
                },
                WaitMode {
                    id: "duration".to_string(),
                    label: "Duration".to_string(),
                },
            ],
            playback_speed: SpeedRange {
                min: 0.5,
                max: 2.0,
                step: 0.1,
            },
        }
    }
}

/// Load configuration from multiple sources
///
/// Precedence, lowest first: defaults, global file, `./.gita/config.toml`,
/// `explicit` file, `GITA_*` variables, then `PORT`.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let global_config = get_config_dir().ok().map(|dir| dir.join("config.toml"));
    let local_config = PathBuf::from(LOCAL_CONFIG_PATH);

    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(global_config) = global_config.filter(|p| p.exists()) {
        figment = figment.merge(Toml::file(&global_config));
    }

    if local_config.exists() {
        figment = figment.merge(Toml::file(&local_config));
    }

    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    let mut config: Config = figment.extract().context("Failed to load configuration")?;

    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port
            .parse()
            .with_context(|| format!("Invalid PORT value: {port}"))?;
    }

    Ok(config)
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
        Ok(proj_dirs.config_dir().to_path_buf())
    } else {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        Ok(PathBuf::from(home).join(".config").join(APP_NAME))
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist.
///
/// Returns the path and whether a new file was written.
pub fn init_config(path: Option<PathBuf>) -> Result<(PathBuf, bool)> {
    let path = match path {
        Some(p) => p,
        None => get_config_dir()?.join("config.toml"),
    };

    if path.exists() {
        return Ok((path, false));
    }

    save_config(&Config::default(), &path)?;
    Ok((path, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_origin_contract() {
        let config = Config::default();
        assert_eq!(config.origin.base_url, "https://www.sgsgitafoundation.org/bg");
        assert_eq!(config.origin.text_timeout_secs, 30);
        assert_eq!(config.origin.audio_timeout_secs, 60);
        assert_eq!(config.origin.chunk_size, 1024 * 1024);
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_practice_document_shape() {
        let value = serde_json::to_value(PracticeConfig::default()).unwrap();
        assert_eq!(value["defaults"]["waitMode"], "keyboard");
        assert_eq!(value["defaults"]["repeatYourShloka"], false);
        assert_eq!(value["defaults"]["yourTurn"], 2);
        assert_eq!(value["waitModes"][1]["label"], "Duration");
        assert_eq!(value["playbackSpeed"]["max"], 2.0);
    }

    #[test]
    fn test_save_and_reload_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.cache.data_dir = PathBuf::from("/srv/gita");
        config.origin.base_url = "http://mirror.local/bg".to_string();
        save_config(&config, &path).unwrap();

        let loaded: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(&path))
            .extract()
            .unwrap();
        assert_eq!(loaded.cache.data_dir, PathBuf::from("/srv/gita"));
        assert_eq!(loaded.origin.base_url, "http://mirror.local/bg");
        assert_eq!(loaded.practice, PracticeConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nhost = \"127.0.0.1\"\nport = 8080\n").unwrap();

        let loaded: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(&path))
            .extract()
            .unwrap();
        assert_eq!(loaded.server.port, 8080);
        assert_eq!(loaded.origin.audio_timeout_secs, 60);
    }

    #[test]
    fn test_init_config_does_not_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let (_, created) = init_config(Some(path.clone())).unwrap();
        assert!(created);
        std::fs::write(&path, "# edited\n").unwrap();

        let (_, created) = init_config(Some(path.clone())).unwrap();
        assert!(!created);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# edited\n");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("absent.toml");
        assert!(load_config(Some(&missing)).is_err());
    }
}
