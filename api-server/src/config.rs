//! Server settings read from the environment at startup.

use std::str::FromStr;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_JSON_LIMIT_BYTES: usize = 4096;
pub const DEFAULT_CORS_MAX_AGE_SECS: usize = 86400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `BIND_ADDRESS`
    pub bind_address: String,
    /// `JSON_LIMIT_BYTES`: payload limit for request bodies
    pub json_limit_bytes: usize,
    /// `CORS_MAX_AGE_SECS`: how long browsers may cache preflight responses
    pub cors_max_age_secs: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            json_limit_bytes: DEFAULT_JSON_LIMIT_BYTES,
            cors_max_age_secs: DEFAULT_CORS_MAX_AGE_SECS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            json_limit_bytes: parse_or(&lookup, "JSON_LIMIT_BYTES", defaults.json_limit_bytes),
            cors_max_age_secs: parse_or(&lookup, "CORS_MAX_AGE_SECS", defaults.cors_max_age_secs),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_environment_gives_defaults() {
        assert_eq!(ServerConfig::from_lookup(lookup_from(&[])), ServerConfig::default());
    }

    #[test]
    fn values_are_read_from_environment() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("BIND_ADDRESS", "127.0.0.1:9000"),
            ("JSON_LIMIT_BYTES", "1024"),
            ("CORS_MAX_AGE_SECS", " 60 "),
        ]));
        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.json_limit_bytes, 1024);
        assert_eq!(config.cors_max_age_secs, 60);
    }

    #[test]
    fn garbage_numbers_fall_back() {
        let config = ServerConfig::from_lookup(lookup_from(&[("JSON_LIMIT_BYTES", "lots")]));
        assert_eq!(config.json_limit_bytes, DEFAULT_JSON_LIMIT_BYTES);
    }
}
