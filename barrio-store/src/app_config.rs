use barrio_catalog::NewProduct;
use barrio_core::ChannelEndpoint;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 { 5 }

#[derive(Debug, Deserialize, Clone)]
pub struct SelectionConfig {
    /// Policy applied when a request does not name one
    #[serde(default = "default_policy")]
    pub default_policy: String,
}

fn default_policy() -> String { "standard".to_string() }

impl Default for SelectionConfig {
    fn default() -> Self {
        Self { default_policy: default_policy() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationConfig {
    #[serde(default = "ChannelEndpoint::defaults")]
    pub channels: Vec<ChannelEndpoint>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { channels: ChannelEndpoint::defaults() }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// Reference products inserted on startup when their SKU is missing
    #[serde(default)]
    pub products: Vec<NewProduct>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn load_from(dir: &str) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name(&format!("{}/default", dir)))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Untracked local overrides
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // Eg. `BARRIO__DATABASE__URL=sqlite::memory:`
            .add_source(config::Environment::with_prefix("BARRIO").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
