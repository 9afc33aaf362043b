//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bookcat/bookcat.toml`
//! 3. Local config: `<dir>/.bookcat.toml` (usually the working directory)
//! 4. Environment variables: `BOOKCAT_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Where error log lines go.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogMode {
    /// Standard error
    #[default]
    Console,
    /// Append to `log.file`
    File,
}

impl std::str::FromStr for LogMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "console" => Ok(LogMode::Console),
            "file" => Ok(LogMode::File),
            other => Err(format!("unknown log mode '{other}' (expected console or file)")),
        }
    }
}

/// Error log configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogSettings {
    /// Destination mode (default: console)
    pub mode: LogMode,
    /// Log file used in `file` mode (default: log.txt)
    pub file: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            mode: LogMode::Console,
            file: PathBuf::from("log.txt"),
        }
    }
}

/// Raw log settings for intermediate parsing (`None` = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLogSettings {
    pub mode: Option<LogMode>,
    pub file: Option<PathBuf>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog_path: Option<PathBuf>,
    #[serde(default)]
    pub log: RawLogSettings,
}

/// Unified configuration for bookcat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Catalog file used when no `--file` is given (default: catalog.xml)
    pub catalog_path: PathBuf,
    /// Error log settings
    pub log: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("catalog.xml"),
            log: LogSettings::default(),
        }
    }
}

/// Get the XDG config directory for bookcat.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bookcat").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bookcat.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".bookcat.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(raw.as_ref()) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        // unknown variables: keep the path as written
        Err(_) => path.to_path_buf(),
    }
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in path fields.
    fn expand_paths(&mut self) {
        self.catalog_path = expand_path(&self.catalog_path);
        self.log.file = expand_path(&self.log.file);
    }

    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog_path: overlay
                .catalog_path
                .clone()
                .unwrap_or_else(|| self.catalog_path.clone()),
            log: LogSettings {
                mode: overlay.log.mode.unwrap_or(self.log.mode),
                file: overlay
                    .log
                    .file
                    .clone()
                    .unwrap_or_else(|| self.log.file.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.bookcat.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply BOOKCAT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("BOOKCAT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog_path") {
            settings.catalog_path = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("log.mode") {
            settings.log.mode = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_string("log.file") {
            settings.log.file = PathBuf::from(val);
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# bookcat configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/bookcat/bookcat.toml
#   Local:  ./.bookcat.toml
#   Env:    BOOKCAT_* environment variables (e.g. BOOKCAT_LOG__MODE=file)

# Catalog file used when --file is not given
# catalog_path = "catalog.xml"

[log]
# Where error lines go: "console" (stderr) or "file"
# mode = "console"

# Log file for mode = "file" (appended to)
# file = "log.txt"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
