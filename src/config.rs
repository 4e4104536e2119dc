use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Runtime configuration, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub aggregation_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
    pub retries: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            aggregation_url: "http://localhost:3001/calculate-emissions".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            cache_ttl_secs: 30,
            request_timeout_secs: 30,
            retries: 1,
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            aggregation_url: lookup("AGGREGATION_URL").unwrap_or(defaults.aggregation_url),
            client_id: lookup("AUTH_GOOGLE_ID").unwrap_or_default(),
            client_secret: lookup("AUTH_GOOGLE_SECRET").unwrap_or_default(),
            cache_ttl_secs: parse_var(&lookup, "AGGREGATION_CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
            request_timeout_secs: parse_var(
                &lookup,
                "AGGREGATION_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            retries: parse_var(&lookup, "AGGREGATION_RETRIES", defaults.retries)?,
        })
    }
}
