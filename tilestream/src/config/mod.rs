//! Persisted user settings.
//!
//! Settings live in a flat INI file with a single `[tilestream]` section.
//! Missing file or missing keys fall back to defaults, so a fresh install
//! works without any configuration step. Unparseable values are an error
//! rather than a silent fallback.
//!
//! ```ini
//! [tilestream]
//! download_timeout_secs = 30
//! tile_count_limit = 256
//! navigation_messages = true
//! layer_definition_dir = /home/user/.local/share/tilestream/layers
//! locale = ja
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::fetch::FetchConfig;

/// INI section holding all settings.
const SECTION: &str = "tilestream";

/// Default download timeout in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Default upper bound on tiles per batch.
pub const DEFAULT_TILE_COUNT_LIMIT: u32 = 256;

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file exists but is not valid INI.
    #[error("failed to parse settings file: {0}")]
    Malformed(String),

    /// A key is present but its value does not parse.
    #[error("invalid value for '{key}': {value}")]
    InvalidValue {
        /// Setting name.
        key: String,
        /// Raw value found in the file.
        value: String,
    },

    /// Filesystem failure reading or writing the settings file.
    #[error("settings I/O error")]
    Io(#[from] std::io::Error),
}

/// User-tunable settings persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Per-request download timeout in seconds.
    pub download_timeout_secs: u64,

    /// Maximum tiles a single batch may request.
    pub tile_count_limit: u32,

    /// Whether informational navigation messages are shown.
    pub navigation_messages: bool,

    /// Directory holding external layer-definition TSV files.
    pub layer_definition_dir: Option<PathBuf>,

    /// Locale override; `None` follows the environment.
    pub locale: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            download_timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            tile_count_limit: DEFAULT_TILE_COUNT_LIMIT,
            navigation_messages: true,
            layer_definition_dir: None,
            locale: None,
        }
    }
}

impl Settings {
    /// Loads settings from an INI file.
    ///
    /// A missing file yields defaults; a present but malformed file or an
    /// unparseable value is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        Self::from_ini(&ini)
    }

    /// Writes settings to an INI file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.to_ini().write_to_file(path)?;
        Ok(())
    }

    /// Sets the per-request download timeout.
    pub fn with_download_timeout_secs(mut self, secs: u64) -> Self {
        self.download_timeout_secs = secs;
        self
    }

    /// Sets the batch tile-count limit.
    pub fn with_tile_count_limit(mut self, limit: u32) -> Self {
        self.tile_count_limit = limit;
        self
    }

    /// Sets the external layer-definition directory.
    pub fn with_layer_definition_dir(mut self, dir: PathBuf) -> Self {
        self.layer_definition_dir = Some(dir);
        self
    }

    /// Sets the locale override.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Derives batch-fetch parameters from these settings.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::default()
            .with_tile_count_limit(u64::from(self.tile_count_limit))
            .with_request_timeout(Duration::from_secs(self.download_timeout_secs))
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut settings = Self::default();
        let Some(section) = ini.section(Some(SECTION)) else {
            return Ok(settings);
        };

        if let Some(raw) = section.get("download_timeout_secs") {
            settings.download_timeout_secs = parse_value("download_timeout_secs", raw)?;
        }
        if let Some(raw) = section.get("tile_count_limit") {
            settings.tile_count_limit = parse_value("tile_count_limit", raw)?;
        }
        if let Some(raw) = section.get("navigation_messages") {
            settings.navigation_messages = parse_bool("navigation_messages", raw)?;
        }
        if let Some(raw) = section.get("layer_definition_dir") {
            if !raw.trim().is_empty() {
                settings.layer_definition_dir = Some(PathBuf::from(raw));
            }
        }
        if let Some(raw) = section.get("locale") {
            if !raw.trim().is_empty() {
                settings.locale = Some(raw.trim().to_string());
            }
        }
        Ok(settings)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.set_to(
            Some(SECTION),
            "download_timeout_secs".to_string(),
            self.download_timeout_secs.to_string(),
        );
        ini.set_to(
            Some(SECTION),
            "tile_count_limit".to_string(),
            self.tile_count_limit.to_string(),
        );
        ini.set_to(
            Some(SECTION),
            "navigation_messages".to_string(),
            self.navigation_messages.to_string(),
        );
        if let Some(dir) = &self.layer_definition_dir {
            ini.set_to(
                Some(SECTION),
                "layer_definition_dir".to_string(),
                dir.display().to_string(),
            );
        }
        if let Some(locale) = &self.locale {
            ini.set_to(Some(SECTION), "locale".to_string(), locale.clone());
        }
        ini
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}
