use std::{env, num::NonZeroU32, time::Duration};
use thiserror::Error;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_ROUTE_URL: &str = "http://localhost:10000";
pub const DEFAULT_HOUR: u8 = 22;
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_GEOCODE_PER_MINUTE: u32 = 60;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var} is not a valid {expected}: {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{var} must be an hour between 0 and 23, got {value}")]
    HourOutOfRange { var: &'static str, value: u8 },
}

/// Endpoints and knobs for the external collaborators.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub geocoder_url: String,
    pub route_service_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub default_hour: u8,
    pub geocode_per_minute: NonZeroU32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            route_service_url: DEFAULT_ROUTE_URL.to_string(),
            user_agent: format!("saferoute/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_hour: DEFAULT_HOUR,
            geocode_per_minute: NonZeroU32::MIN.saturating_add(DEFAULT_GEOCODE_PER_MINUTE - 1),
        }
    }
}

impl ServiceConfig {
    /// Reads `SAFEROUTE_*` variables, falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("SAFEROUTE_GEOCODER_URL") {
            config.geocoder_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup("SAFEROUTE_ROUTE_URL") {
            config.route_service_url = url.trim_end_matches('/').to_string();
        }
        if let Some(agent) = lookup("SAFEROUTE_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(raw) = lookup("SAFEROUTE_TIMEOUT_SECS") {
            let secs: u64 = parse_var("SAFEROUTE_TIMEOUT_SECS", "number of seconds", &raw)?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup("SAFEROUTE_DEFAULT_HOUR") {
            let hour: u8 = parse_var("SAFEROUTE_DEFAULT_HOUR", "hour", &raw)?;
            config.default_hour = validate_hour("SAFEROUTE_DEFAULT_HOUR", hour)?;
        }
        if let Some(raw) = lookup("SAFEROUTE_GEOCODE_PER_MINUTE") {
            config.geocode_per_minute =
                parse_var("SAFEROUTE_GEOCODE_PER_MINUTE", "non-zero request quota", &raw)?;
        }

        Ok(config)
    }
}

fn validate_hour(var: &'static str, hour: u8) -> Result<u8, ConfigError> {
    if hour > 23 {
        return Err(ConfigError::HourOutOfRange { var, value: hour });
    }
    Ok(hour)
}

fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    expected: &'static str,
    raw: &str,
) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        expected,
        value: raw.to_string(),
    })
}
