use std::collections::HashMap;

use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub log_level: String,
    pub log_to_file: bool,
    pub log_file: String,
    pub db_path: String,
    pub status_url: String,
    pub poll_interval_ms: u64,
    pub poll_timeout_ms: u64,
    #[serde(default)]
    pub chain_timeout_ms: HashMap<String, u64>,
    pub cache_ttl_secs: u64,
}

pub fn load_config(path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let s = Config::builder()
        // Set defaults
        .set_default("log_level", "info")?
        .set_default("log_to_file", false)?
        .set_default("log_file", "log/tracker.log")?
        .set_default("db_path", "data/tracker_db")?
        .set_default("status_url", "http://localhost:8080")?
        .set_default("poll_interval_ms", 5000_i64)?
        .set_default("poll_timeout_ms", 1_800_000_i64)?
        .set_default("cache_ttl_secs", 300_i64)?
        // Add configuration from a file
        .add_source(File::with_name(path.unwrap_or("config/config.yaml")).required(false))
        // Add configuration from environment variables
        .add_source(config::Environment::with_prefix("APP"))
        .build()?;

    s.try_deserialize()
}
