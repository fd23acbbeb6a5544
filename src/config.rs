//! Configuration management for the shortlink TUI.
//!
//! Handles loading and saving configuration from JSONC files.
//! Manages the backend address, timings and logging preferences.

use crate::pipeline::SortMode;
use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name under the platform config dir.
const APP_DIR: &str = "shortlink-tui";

/// Application configuration structure.
///
/// Contains backend endpoints and user preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the shortener REST API
    pub api_base_url: String,
    /// Public origin short links are served from (defaults to `api_base_url`)
    pub public_base_url: Option<String>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Delay before a search keystroke re-filters the table
    pub search_debounce_ms: u64,
    /// How long notifications stay visible
    pub notification_secs: u64,
    /// Sort order used at startup
    pub default_sort: SortMode,
    /// tracing filter directive (e.g. "info", "shortlink_tui=debug")
    pub log_level: String,
    /// Log file path (relative to config dir or absolute)
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            public_base_url: None,
            request_timeout_secs: 30,
            search_debounce_ms: 300,
            notification_secs: 3,
            default_sort: SortMode::DateDesc,
            log_level: "info".to_string(),
            log_file: "shortlink-tui.log".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Config file to read. None uses `default_config_path()`.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded and validated configuration, or defaults
    ///   when the file does not exist
    ///
    /// # Details
    /// `//` comments are stripped before parsing. Fields missing from the
    /// file keep their default values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = resolve(path)?;
        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Cannot read {}", config_path.display())
                });
            }
        };

        let config: Config = serde_json::from_str(&strip_jsonc_comments(&content))
            .with_context(|| format!("Invalid config in {}", config_path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file.
    ///
    /// # Arguments
    /// * `path` - Config file to write. None uses `default_config_path()`.
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    ///
    /// # Details
    /// Writes pretty-printed JSON and creates the parent directory if needed.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = resolve(path)?;
        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, json)
            .with_context(|| format!("Cannot write {}", config_path.display()))
    }

    /// Validate values that would otherwise only fail at the first request.
    ///
    /// # Returns
    /// * `Result<()>` - Error naming the offending field
    ///
    /// # Details
    /// `api_base_url` and, when set, `public_base_url` must be absolute
    /// http or https URLs.
    pub fn validate(&self) -> Result<()> {
        check_http_url("api_base_url", &self.api_base_url)?;
        if let Some(public) = &self.public_base_url {
            check_http_url("public_base_url", public)?;
        }
        Ok(())
    }

    /// Get default configuration file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - `<config dir>/shortlink-tui/config.jsonc`
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(app_dir()?.join("config.jsonc"))
    }

    /// Get log file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Absolute path of the log file
    ///
    /// # Details
    /// An absolute `log_file` is used as-is. A relative one lives next to
    /// the config file.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        let log_path = Path::new(&self.log_file);
        if log_path.is_absolute() {
            return Ok(log_path.to_path_buf());
        }
        Ok(app_dir()?.join(log_path))
    }

    /// Origin used when building short URLs for display and copying.
    pub fn public_base(&self) -> &str {
        self.public_base_url
            .as_deref()
            .unwrap_or(&self.api_base_url)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }
}

fn app_dir() -> Result<PathBuf> {
    config_dir()
        .map(|dir| dir.join(APP_DIR))
        .context("No platform config directory")
}

fn resolve(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => Config::default_config_path(),
    }
}

fn check_http_url(field: &str, value: &str) -> Result<()> {
    let url = url::Url::parse(value.trim())
        .with_context(|| format!("{} is not a valid URL: {:?}", field, value))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("{} must use http or https, got {:?}", field, value);
    }
    Ok(())
}

/// Strip `//` line comments from JSONC.
///
/// A `//` preceded by an odd number of quotes on the same line is inside a
/// string (e.g. `"http://..."`) and is kept. Escaped quotes are not handled.
fn strip_jsonc_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let mut search_from = 0;
            while let Some(offset) = line[search_from..].find("//") {
                let pos = search_from + offset;
                if line[..pos].matches('"').count() % 2 == 0 {
                    return line[..pos].trim_end();
                }
                search_from = pos + 2;
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
