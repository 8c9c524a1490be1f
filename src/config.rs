use crate::errors::{AppError, AppResult};
use crate::models::ScraperKind;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved configuration with all values filled in (no Options).
///
/// Every field has a default, so a TOML file only needs the keys it overrides.
/// Unknown keys are rejected to catch typos.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Directory holding the per-region URL cache files
    pub cache_dir: PathBuf,
    /// Directory for JSON output files
    pub output_dir: PathBuf,
    /// Timeout for each sumario API probe during auto-discovery
    pub discovery_timeout_secs: u64,
    /// Timeout for fetching the bulletin content
    pub fetch_timeout_secs: u64,
    /// Timeout for fetching a candidate URL to check its keywords
    pub validation_timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Whether the national scraper may search the BOE sumario API
    pub auto_discovery: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("config"),
            output_dir: PathBuf::from("data"),
            discovery_timeout_secs: 5,
            fetch_timeout_secs: 30,
            validation_timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            auto_discovery: true,
        }
    }
}

impl ResolvedConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read and `InvalidInput` if the TOML is
    /// malformed, contains unknown keys, or sets a zero timeout.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfig = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        for (name, value) in [
            ("discovery_timeout_secs", config.discovery_timeout_secs),
            ("fetch_timeout_secs", config.fetch_timeout_secs),
            ("validation_timeout_secs", config.validation_timeout_secs),
        ] {
            if value == 0 {
                return Err(AppError::InvalidInput(format!(
                    "{name} must be greater than 0"
                )));
            }
        }

        Ok(config)
    }

    /// Path of the URL cache file used by a scraper.
    pub fn cache_path(&self, kind: ScraperKind) -> PathBuf {
        self.cache_dir.join(kind.cache_file())
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn validation_timeout(&self) -> Duration {
        Duration::from_secs(self.validation_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_values() {
        let config = ResolvedConfig::default();
        assert_eq!(config.cache_dir, PathBuf::from("config"));
        assert_eq!(config.discovery_timeout(), Duration::from_secs(5));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert!(config.auto_discovery);
        assert!(config.user_agent.starts_with("festivos-cli/"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            cache_dir = "custom/cache"
            discovery_timeout_secs = 2
            auto_discovery = false
            "#,
        )
        .unwrap();

        let config = ResolvedConfig::from_toml_file(tmp.path()).unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("custom/cache"));
        assert_eq!(config.discovery_timeout_secs, 2);
        assert!(!config.auto_discovery);
        assert_eq!(config.output_dir, PathBuf::from("data"));
        assert_eq!(config.fetch_timeout_secs, 30);
    }

    #[test]
    fn cache_path_joins_region_file() {
        let config = ResolvedConfig::default();
        assert_eq!(
            config.cache_path(ScraperKind::CanariasLocal),
            PathBuf::from("config/canarias_urls_cache.json")
        );
    }

    #[test]
    fn unknown_key_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "batch_size = 10\n").unwrap();
        assert!(ResolvedConfig::from_toml_file(tmp.path()).is_err());
    }

    #[test]
    fn zero_timeout_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "fetch_timeout_secs = 0\n").unwrap();
        let err = ResolvedConfig::from_toml_file(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("fetch_timeout_secs"));
    }

    #[test]
    fn missing_file_errors() {
        assert!(ResolvedConfig::from_toml_file(Path::new("does/not/exist.toml")).is_err());
    }
}
