use thiserror::Error;
use upload_relay_core::console_url::DEFAULT_CONSOLE_REGION;

pub const WEBHOOK_URL_VAR: &str = "SLACK_WEBHOOK_URL";
pub const APP_NAME_VAR: &str = "APP_NAME";
pub const ACCOUNT_ID_VAR: &str = "AWS_ACCOUNT_ID";
pub const CONSOLE_REGION_VAR: &str = "CONSOLE_REGION";
pub const DEFAULT_APP_NAME: &str = "PubSub";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
}

/// Per-invocation settings supplied by the deployment environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub webhook_url: String,
    pub app_name: String,
    pub account_id: Option<String>,
    pub console_region: String,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Ok(Self {
            webhook_url: read(WEBHOOK_URL_VAR).ok_or(ConfigError::Missing(WEBHOOK_URL_VAR))?,
            app_name: read(APP_NAME_VAR).unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            account_id: read(ACCOUNT_ID_VAR),
            console_region: read(CONSOLE_REGION_VAR)
                .unwrap_or_else(|| DEFAULT_CONSOLE_REGION.to_string()),
        })
    }
}
