use crate::error::ConfigError;
use serde_derive::Deserialize;
use std::str::FromStr;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig, ConfigError> {
    envy::from_env::<AppConfig>().map_err(|err| ConfigError::env_parse("AppConfig", err))
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_max_retries() -> u32 {
    1
}

#[derive(Deserialize, Debug, Clone)]
pub struct FetcherConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    // attempts per page, not extra retries on top of the first one
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

pub fn load_fetcher_config() -> Result<FetcherConfig, ConfigError> {
    envy::prefixed("FETCHER_")
        .from_env::<FetcherConfig>()
        .map_err(|err| ConfigError::env_parse("FetcherConfig", err))
}

#[derive(Deserialize, Debug)]
pub struct JobConfig {
    pub base_url: String,
    pub start_id: u64,
    pub count: usize,
    // output path; derived from the record count when unset
    pub output: Option<String>,
}

pub(crate) fn load_job_config() -> Result<JobConfig, ConfigError> {
    envy::prefixed("SCRAPE_")
        .from_env::<JobConfig>()
        .map_err(|err| ConfigError::env_parse("JobConfig", err))
}
