//! Gateway configuration from environment variables
//!
//! | Variable                          | Default           |
//! |-----------------------------------|-------------------|
//! | `CYBERRISK_HOST`                  | `0.0.0.0`         |
//! | `CYBERRISK_PORT`                  | `8080`            |
//! | `CYBERRISK_JWT_SECRET`            | required          |
//! | `CYBERRISK_DEFAULT_POLICY`        | `uniformFraction` |
//! | `CYBERRISK_ALERT_THRESHOLD`       | `70`              |
//! | `CYBERRISK_WEBHOOK_URL`           | unset (log only)  |
//! | `CYBERRISK_RATE_LIMIT_PER_MINUTE` | `60`              |

use std::str::FromStr;
use thiserror::Error;
use types::risk::{RiskScore, ScoringPolicy};

const ENV_HOST: &str = "CYBERRISK_HOST";
const ENV_PORT: &str = "CYBERRISK_PORT";
const ENV_JWT_SECRET: &str = "CYBERRISK_JWT_SECRET";
const ENV_DEFAULT_POLICY: &str = "CYBERRISK_DEFAULT_POLICY";
const ENV_ALERT_THRESHOLD: &str = "CYBERRISK_ALERT_THRESHOLD";
const ENV_WEBHOOK_URL: &str = "CYBERRISK_WEBHOOK_URL";
const ENV_RATE_LIMIT: &str = "CYBERRISK_RATE_LIMIT_PER_MINUTE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub default_policy: ScoringPolicy,
    pub alert_threshold: RiskScore,
    pub webhook_url: Option<String>,
    pub rate_limit_per_minute: u32,
}

impl GatewayConfig {
    /// Defaults for everything except the signing secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: jwt_secret.into(),
            default_policy: ScoringPolicy::default(),
            alert_threshold: RiskScore::saturating(70),
            webhook_url: None,
            rate_limit_per_minute: 60,
        }
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let jwt_secret = get(ENV_JWT_SECRET).ok_or(ConfigError::Missing(ENV_JWT_SECRET))?;
        let mut config = Self::new(jwt_secret);

        if let Some(host) = get(ENV_HOST) {
            config.host = host;
        }
        if let Some(port) = get(ENV_PORT) {
            config.port = parse(ENV_PORT, &port)?;
        }
        if let Some(policy) = get(ENV_DEFAULT_POLICY) {
            config.default_policy = parse(ENV_DEFAULT_POLICY, &policy)?;
        }
        if let Some(threshold) = get(ENV_ALERT_THRESHOLD) {
            let value: u8 = parse(ENV_ALERT_THRESHOLD, &threshold)?;
            config.alert_threshold = RiskScore::new(value).ok_or_else(|| ConfigError::Invalid {
                key: ENV_ALERT_THRESHOLD,
                value: threshold.clone(),
                reason: "must be between 0 and 100".to_string(),
            })?;
        }
        config.webhook_url = get(ENV_WEBHOOK_URL);
        if let Some(limit) = get(ENV_RATE_LIMIT) {
            let value: u32 = parse(ENV_RATE_LIMIT, &limit)?;
            if value == 0 {
                return Err(ConfigError::Invalid {
                    key: ENV_RATE_LIMIT,
                    value: limit,
                    reason: "must be positive".to_string(),
                });
            }
            config.rate_limit_per_minute = value;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
