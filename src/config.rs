//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site origin that theme links are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Storefront locale path segment (e.g. "uk-ua")
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Directory the export files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Export file format
    #[serde(default)]
    pub format: ExportFormat,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Only scrape themes whose name contains one of these (case-insensitive)
    #[serde(default)]
    pub theme_filter: Vec<String>,

    /// Upper bound on pages scraped per theme
    #[serde(default)]
    pub max_pages: Option<u32>,
}

fn default_base_url() -> String {
    "https://www.lego.com".to_string()
}

fn default_locale() -> String {
    "uk-ua".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            locale: default_locale(),
            output_dir: default_output_dir(),
            format: ExportFormat::Xlsx,
            proxy: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            theme_filter: Vec::new(),
            max_pages: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("brick-scraper").join("config.toml");
            if user_config.exists() {
                debug!("Found config in user config directory");
                return Self::from_file(user_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("BRICK_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(locale) = std::env::var("BRICK_LOCALE") {
            self.locale = locale;
        }

        if let Ok(proxy) = std::env::var("BRICK_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(dir) = std::env::var("BRICK_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        self
    }

    /// URL of the themes listing page.
    pub fn themes_url(&self) -> String {
        format!("{}/{}/themes", self.base_url.trim_end_matches('/'), self.locale)
    }

    /// Returns true if `name` passes the theme filter (an empty filter passes all).
    pub fn wants_theme(&self, name: &str) -> bool {
        if self.theme_filter.is_empty() {
            return true;
        }
        let name = name.to_lowercase();
        self.theme_filter.iter().any(|f| name.contains(&f.to_lowercase()))
    }
}

/// File format for the exported tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown format: {}. Use: xlsx, csv, json", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}
