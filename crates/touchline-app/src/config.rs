// Configuration loading and validation (touchline.toml).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

/// The bundled default configuration, written out on first run.
const DEFAULT_CONFIG: &str = include_str!("../defaults/touchline.toml");

const CONFIG_FILE_NAME: &str = "touchline.toml";
const SESSION_DB_NAME: &str = "session.db";

/// Environment variable that replaces `api.base_url`.
pub const API_URL_ENV: &str = "TOUCHLINE_API_URL";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to write default config: {message}")]
    DefaultsCopyError { message: String },

    #[error("could not determine a home directory for config and data files")]
    NoHomeDirectory,
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub team: TeamConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Explicit session database path. `None` means the data directory.
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamConfig {
    #[serde(default = "default_team_name")]
    pub default_name: String,
}

impl Default for TeamConfig {
    fn default() -> Self {
        TeamConfig {
            default_name: default_team_name(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_team_name() -> String {
    "My Squad".to_string()
}

impl Config {
    /// Where the session database lives, given the resolved data directory.
    pub fn session_db_path(&self, data_dir: &Path) -> PathBuf {
        self.session
            .db_path
            .clone()
            .unwrap_or_else(|| data_dir.join(SESSION_DB_NAME))
    }
}

// ---------------------------------------------------------------------------
// Directories
// ---------------------------------------------------------------------------

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("", "", "touchline").ok_or(ConfigError::NoHomeDirectory)
}

/// Platform config directory, e.g. `~/.config/touchline` on Linux.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Platform data directory holding the session database and logs.
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Write the bundled default config into `config_dir` unless a config file
/// is already there. Returns the path written, if any.
pub fn ensure_config_file(config_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create {}: {e}", config_dir.display()),
    })?;

    let target = config_dir.join(CONFIG_FILE_NAME);
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, DEFAULT_CONFIG.as_bytes()).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(Some(target))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

/// Parse and validate `touchline.toml` in `config_dir`. Does not write
/// defaults or consult the environment.
pub(crate) fn load_config_from(config_dir: &Path) -> Result<Config, ConfigError> {
    let path = config_dir.join(CONFIG_FILE_NAME);
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let config = parse_config(&text, &path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Apply environment overrides through `lookup`, so tests need not touch
/// the process environment.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }
}

/// Load the configuration from `config_dir` (or the platform default),
/// writing the bundled defaults first when no file exists yet.
pub fn load_config(config_dir: Option<&Path>) -> Result<Config, ConfigError> {
    let dir = match config_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_config_dir()?,
    };
    ensure_config_file(&dir)?;
    let mut config = load_config_from(&dir)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = config.api.base_url.trim();
    if url.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: "must not be empty".into(),
        });
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must start with http:// or https://, got {url}"),
        });
    }

    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "api.timeout_secs".into(),
            message: "must be > 0".into(),
        });
    }

    if config.team.default_name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "team.default_name".into(),
            message: "must not be blank".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
