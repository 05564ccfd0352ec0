use serde::Deserialize;
use simtap_query::DEFAULT_ID_PREFIX;
use simtap_tap::{TapOptions, SIMBAD_TAP_URL};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub crossmatch: CrossMatchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_records: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let defaults = TapOptions::default();
        Self {
            base_url: SIMBAD_TAP_URL.to_string(),
            timeout_secs: defaults.timeout.as_secs(),
            user_agent: defaults.user_agent,
            max_records: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CrossMatchConfig {
    pub id_prefix: String,
    pub id_column: String,
    pub join_key: String,
}

impl Default for CrossMatchConfig {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            id_column: "source_id".to_string(),
            join_key: "gaia_id".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.service.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("service.base_url must not be empty"));
        }
        if !self.service.base_url.starts_with("http://") && !self.service.base_url.starts_with("https://") {
            anyhow::bail!(
                "service.base_url must be an http(s) URL: {}",
                self.service.base_url
            );
        }
        if self.service.timeout_secs == 0 {
            return Err(anyhow::anyhow!("service.timeout_secs must be positive"));
        }
        if self.crossmatch.join_key.trim().is_empty() {
            return Err(anyhow::anyhow!("crossmatch.join_key must not be empty"));
        }
        if self.crossmatch.id_column.trim().is_empty() {
            return Err(anyhow::anyhow!("crossmatch.id_column must not be empty"));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> anyhow::Result<tracing::Level> {
        self.logging
            .level
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown log level: {}", self.logging.level))
    }

    pub fn tap_options(&self) -> TapOptions {
        TapOptions {
            base_url: self.service.base_url.clone(),
            timeout: Duration::from_secs(self.service.timeout_secs),
            user_agent: self.service.user_agent.clone(),
            max_records: self.service.max_records,
        }
    }
}
