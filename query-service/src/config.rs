use serde::Deserialize;
use std::fs;

use crate::profile::Profile;

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub profile: Profile,
    pub data: DataConfig,
    pub http: HttpConfig,
    pub metrics: Option<MetricsConfig>,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let path =
            env::var("QUERY_SERVICE_CONFIG").unwrap_or_else(|_| "query-config.toml".to_string());
        let contents = fs::read_to_string(&path)?;
        let cfg: AppConfig = toml::from_str(&contents)?;
        Ok(cfg)
    }
}
