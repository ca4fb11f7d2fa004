use crate::range::DEFAULT_YEAR;
use std::{env, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TICK_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub default_year: i32,
    pub tick_interval: Duration,
    /// Base URL put into share payloads; the request `Host` is used when unset.
    pub public_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            default_year: DEFAULT_YEAR,
            tick_interval: Duration::from_secs(DEFAULT_TICK_SECS),
            public_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let default_year = lookup("PROGRESS_DEFAULT_YEAR")
            .and_then(|value| value.trim().parse::<i32>().ok())
            .filter(|year| (1..=9999).contains(year))
            .unwrap_or(DEFAULT_YEAR);

        let tick_secs = lookup("PROGRESS_TICK_SECS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TICK_SECS)
            .max(1);

        let public_url = lookup("PROGRESS_PUBLIC_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty());

        Self {
            port,
            default_year,
            tick_interval: Duration::from_secs(tick_secs),
            public_url,
        }
    }
}
