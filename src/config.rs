use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub archive: ArchiveConfig,

    pub ratings: RatingsConfig,

    pub crawl: CrawlConfig,

    pub enrich: EnrichConfig,

    pub gender: GenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/sketcharr.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub base_url: String,

    /// Mandatory pause between requests to the archive, in milliseconds.
    /// This is a courtesy owed to a volunteer-run site, not a tuning knob.
    pub request_delay_ms: u64,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: "http://www.snlarchives.net".to_string(),
            request_delay_ms: 2000,
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingsConfig {
    pub enabled: bool,

    pub base_url: String,

    /// Path prefix of the show on the ratings site.
    pub series_path: String,

    pub request_delay_ms: u64,

    pub request_timeout_seconds: u64,
}

impl Default for RatingsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://www.imdb.com".to_string(),
            series_path: "/title/tt0072562".to_string(),
            request_delay_ms: 2000,
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CrawlConfig {
    /// Restrict crawls to these title ids (their episodes and seasons are
    /// implied). Empty means crawl everything.
    pub target_tids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EnrichConfig {
    /// Compute per-segment airtime shares during enrichment.
    pub airtime: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GenderConfig {
    /// Extra full-name override lists, one name per line.
    pub male_names_file: Option<String>,

    pub female_names_file: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("sketcharr").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".sketcharr").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.archive.base_url.is_empty() {
            anyhow::bail!("Archive base URL cannot be empty");
        }

        if self.archive.request_delay_ms == 0 {
            anyhow::bail!("Archive request delay must be > 0; the pause is mandatory");
        }

        if self.ratings.enabled && self.ratings.series_path.is_empty() {
            anyhow::bail!("Ratings series path cannot be empty when ratings are enabled");
        }

        Ok(())
    }
}
