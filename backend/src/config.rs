use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub recommend: RecommendConfig,
    pub logging: LoggingConfig,
    pub static_config: StaticConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding the generated catalog JSON files
    pub data_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Maximum number of tags returned by the recommended-tags sample
    pub sample_size: usize,
    /// Fixed RNG seed; unset means OS entropy. Set it to make the
    /// recommended-tags selection reproducible (UI automation, tests).
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    pub enabled: bool,
    pub web_root: String,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from config.toml file
    /// 2. Override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    pub fn load() -> Result<Self, anyhow::Error> {
        let mut config = if let Some(config_path) = Self::find_config_file() {
            Self::from_toml(&config_path)?
        } else {
            tracing::warn!("Configuration file not found, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load a specific configuration file (CLI `--config`), still applying
    /// environment overrides and validation.
    pub fn from_file(path: &str) -> Result<Self, anyhow::Error> {
        let mut config = Self::from_toml(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_DATA_DIR: Catalog data directory (default: data)
    /// - APP_RECOMMEND_SAMPLE_SIZE: Recommended-tags sample size
    /// - APP_RECOMMEND_SEED: Fixed RNG seed for recommended tags
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,prompt_studio=debug")
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT") {
            match port.parse() {
                Ok(port) => {
                    self.server.port = port;
                    tracing::info!("Override server.port from env: {}", self.server.port);
                }
                Err(e) => tracing::warn!(
                    "Invalid APP_SERVER_PORT '{}': {} (keep {})",
                    port,
                    e,
                    self.server.port
                ),
            }
        }

        if let Ok(data_dir) = std::env::var("APP_DATA_DIR") {
            self.catalog.data_dir = data_dir;
            tracing::info!("Override catalog.data_dir from env: {}", self.catalog.data_dir);
        }

        if let Ok(size) = std::env::var("APP_RECOMMEND_SAMPLE_SIZE") {
            match size.parse() {
                Ok(size) => {
                    self.recommend.sample_size = size;
                    tracing::info!(
                        "Override recommend.sample_size from env: {}",
                        self.recommend.sample_size
                    );
                }
                Err(e) => tracing::warn!(
                    "Invalid APP_RECOMMEND_SAMPLE_SIZE '{}': {} (keep {})",
                    size,
                    e,
                    self.recommend.sample_size
                ),
            }
        }

        if let Ok(seed) = std::env::var("APP_RECOMMEND_SEED") {
            match seed.parse() {
                Ok(seed) => {
                    self.recommend.seed = Some(seed);
                    tracing::info!("Override recommend.seed from env: {}", seed);
                }
                Err(e) => tracing::warn!("Invalid APP_RECOMMEND_SEED '{}': {}", seed, e),
            }
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.catalog.data_dir.is_empty() {
            anyhow::bail!("Catalog data directory cannot be empty");
        }

        if self.recommend.sample_size == 0 {
            anyhow::bail!("recommend.sample_size must be > 0");
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { data_dir: "data".to_string() }
    }
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self { sample_size: 8, seed: None }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,prompt_studio=debug".to_string(),
            file: Some("logs/prompt-studio.log".to_string()),
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self { enabled: true, web_root: "web".to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.catalog.data_dir, "data");
        assert_eq!(config.recommend.sample_size, 8);
        assert!(config.recommend.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9090

            [recommend]
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.recommend.seed, Some(42));
        assert_eq!(config.recommend.sample_size, 8);
    }
}
