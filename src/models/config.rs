//! Configuration model loaded from external sources.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::api::{CLIENTS_API_URL, PRODUCTS_API_URL};

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Endpoints and transport settings for the remote service.
pub struct AppConfig {
    pub clients_url: String,
    pub products_url: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            clients_url: CLIENTS_API_URL.to_string(),
            products_url: PRODUCTS_API_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Layers `{dir}/default`, `{dir}/{profile}` and `APP_*` variables over
    /// the built-in defaults. Missing files are skipped.
    pub fn load(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(dir.join("default")).required(false))
            .add_source(File::from(dir.join(profile)).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
