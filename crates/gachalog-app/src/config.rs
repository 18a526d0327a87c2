// Configuration loading and parsing (config/gachalog.toml).

use std::path::{Path, PathBuf};
use std::time::Duration;

use gachalog_core::category::CategoryCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Name of the config file inside `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "gachalog.toml";

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

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub polling: PollingConfig,
    pub display: DisplayConfig,
}

/// Raw deserialization target for gachalog.toml.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    server: ServerConfig,
    #[serde(default)]
    polling: PollingConfig,
    #[serde(default)]
    display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Scheme, host and port of the analysis backend, without a trailing path.
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub interval_ms: u64,
    /// Per-request limit on progress queries. The analysis request itself
    /// never times out.
    pub request_timeout_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        PollingConfig {
            interval_ms: 500,
            request_timeout_ms: 2_000,
        }
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub thousands_separator: String,
    /// Category code of the tab shown at startup.
    pub default_tab: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            thousands_separator: ",".into(),
            default_tab: CategoryCode::CharacterEvent.code().into(),
        }
    }
}

impl DisplayConfig {
    /// The startup tab. Validation guarantees the code is known.
    pub fn default_category(&self) -> CategoryCode {
        CategoryCode::from_code(&self.default_tab).unwrap_or(CategoryCode::CharacterEvent)
    }
}

impl Config {
    /// Parse and validate config text without touching the filesystem.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Config, ConfigError> {
        let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = Config {
            server: ServerConfig {
                base_url: file.server.base_url.trim_end_matches('/').to_string(),
            },
            polling: file.polling,
            display: file.display,
        };

        validate(&config)?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/gachalog.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()`.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    Config::from_toml_str(&text, &path)
}

/// Seed `config/gachalog.toml` from `defaults/` if it does not exist yet.
/// Returns the path written, or `None` when a config was already there.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let content = std::fs::read(&source).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("no {} and no defaults at {}: {e}", target.display(), source.display()),
    })?;
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", dir.display()),
        })?;
    }

    // create_new: never clobber a file written since the exists() check.
    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(dest) => dest,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!("failed to create {}: {e}", target.display()),
            })
        }
    };
    std::io::Write::write_all(&mut dest, &content).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    })?;
    Ok(Some(target))
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if let Some(path) = ensure_config_file(&cwd)? {
        info!("Created {} from defaults", path.display());
    }
    load_config_from(&cwd)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = &config.server.base_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "server.base_url".into(),
            message: format!("must start with http:// or https://, got {url:?}"),
        });
    }

    if config.polling.interval_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "polling.interval_ms".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.polling.request_timeout_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "polling.request_timeout_ms".into(),
            message: "must be greater than 0".into(),
        });
    }

    if CategoryCode::from_code(&config.display.default_tab).is_none() {
        return Err(ConfigError::ValidationError {
            field: "display.default_tab".into(),
            message: format!(
                "unknown category code {:?}",
                config.display.default_tab
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
