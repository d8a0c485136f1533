use ::config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dashboard::SyncOptions;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";
pub const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin of the dashboard service, without a trailing `/api`.
    pub api_url: String,
    pub poll_interval_secs: u64,
    pub notification_dismiss_secs: u64,
    /// Directory of the sled database that keeps the session token.
    pub store_path: PathBuf,
    pub subscription_price_usdt: Decimal,
    pub language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            poll_interval_secs: 10,
            notification_dismiss_secs: 5,
            store_path: PathBuf::from(".dashboard_session"),
            subscription_price_usdt: dec!(10),
            language: "en".to_string(),
        }
    }
}

impl ClientConfig {
    /// Layer defaults, the optional TOML file at `path`, then `DASHBOARD_*` variables.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Config::builder()
            .set_default("api_url", defaults.api_url)?
            .set_default("poll_interval_secs", defaults.poll_interval_secs)?
            .set_default("notification_dismiss_secs", defaults.notification_dismiss_secs)?
            .set_default("store_path", defaults.store_path.to_string_lossy().to_string())?
            .set_default("subscription_price_usdt", defaults.subscription_price_usdt.to_string())?
            .set_default("language", defaults.language)?
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            errors.push(format!("api_url must be an http(s) URL, got '{}'", self.api_url));
        }
        if self.poll_interval_secs == 0 {
            errors.push("poll_interval_secs must be > 0".to_string());
        }
        if self.notification_dismiss_secs == 0 {
            errors.push("notification_dismiss_secs must be > 0".to_string());
        }
        if self.subscription_price_usdt <= Decimal::ZERO {
            errors.push("subscription_price_usdt must be > 0".to_string());
        }
        if self.language.trim().is_empty() {
            errors.push("language must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl From<&ClientConfig> for SyncOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            notification_dismiss: Duration::from_secs(config.notification_dismiss_secs),
            subscription_price: config.subscription_price_usdt,
            language: config.language.clone(),
        }
    }
}
