//! Configuration models.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Application configuration, read from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// External tool configuration.
    pub tools: ToolsConfig,
    /// File extensions picked up during discovery.
    pub extensions: Vec<String>,
}

/// External tool configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// mediainfo binary.
    pub mediainfo: String,
    /// mkvpropedit binary.
    pub mkvpropedit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tools: ToolsConfig::default(),
            extensions: vec!["mkv".to_string()],
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            mediainfo: "mediainfo".to_string(),
            mkvpropedit: "mkvpropedit".to_string(),
        }
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mkvedit")
}

/// Load configuration from the default location.
pub fn load_config() -> AppConfig {
    let config_path = dirs_config_path().join("config.toml");

    if !config_path.exists() {
        return AppConfig::default();
    }

    match load_config_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring config {:?}: {}", config_path, e);
            AppConfig::default()
        }
    }
}

/// Load configuration from a specific file.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Processing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Review and edit files one by one.
    Single,
    /// Derive titles and paths from numbering patterns.
    Batch,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" | "s" => Ok(Mode::Single),
            "batch" | "b" => Ok(Mode::Batch),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Single => write!(f, "single"),
            Mode::Batch => write!(f, "batch"),
        }
    }
}

/// How batch mode obtains its starting directory/file offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetMode {
    /// Ask the user for both offsets.
    Prompt,
    /// Start both counters at 1.
    Default,
    /// Start at the given `(directory, file)` offsets.
    Fixed(i64, i64),
}

impl OffsetMode {
    pub const DEFAULT_OFFSET: i64 = 1;

    /// Command line value meaning "ask for both offsets".
    pub const PROMPT_LITERAL: &'static str = "True";
}

impl FromStr for OffsetMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            return Ok(OffsetMode::Prompt);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Ok(OffsetMode::Default);
        }

        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();

        match parts.as_slice() {
            [dir, file] => {
                let dir = dir
                    .parse()
                    .map_err(|_| Error::InvalidOffset(s.to_string()))?;
                let file = file
                    .parse()
                    .map_err(|_| Error::InvalidOffset(s.to_string()))?;
                Ok(OffsetMode::Fixed(dir, file))
            }
            _ => Err(Error::InvalidOffset(s.to_string())),
        }
    }
}

/// Settings for one run of the edit loop.
///
/// Mode and offsets are kept as typed on the command line and only parsed
/// when a run needs them, so a bad value fails that run instead of the
/// whole process.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Working directory; prompted for when absent.
    pub root: Option<PathBuf>,
    /// Processing mode (`single`/`s`/`batch`/`b`); prompted for when absent.
    pub mode: Option<String>,
    /// Batch title template.
    pub title_pattern: Option<String>,
    /// Batch path template.
    pub path_pattern: Option<String>,
    /// Offset source for batch mode: `True`, `False` or `(dir, file)`.
    pub offsets: String,
    /// Stop after one run.
    pub no_restart: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root: None,
            mode: None,
            title_pattern: None,
            path_pattern: None,
            offsets: OffsetMode::PROMPT_LITERAL.to_string(),
            no_restart: false,
        }
    }
}
