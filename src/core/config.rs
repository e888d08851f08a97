

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use super::error::Result;
use crate::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};


/// Environment prefix for overrides, e.g. `KAZOO_API_URL`, `KAZOO_AUTH_TOKEN`.
pub const ENV_PREFIX: &str = "KAZOO";


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartUserConfig {
    /// Base URL of the platform API, without the `/v2` suffix.
    pub api_url: String,
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout: u64,
}

impl SmartUserConfig {
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.to_string(),
            auth_token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Defaults, then `file` if given, then `KAZOO_*` environment variables.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("timeout", DEFAULT_TIMEOUT_SECS as i64)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl Default for SmartUserConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
