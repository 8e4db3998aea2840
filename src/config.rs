use std::env;
use std::num::NonZeroUsize;

use crate::cache::CacheCapacity;
use crate::error::{ConfigError, EnvVarError, Error};

pub const DEFAULT_BASE_URL: &str = "https://www.thesportsdb.com/api/v1/json/3";

const BASE_URL_VAR: &str = "LEAGUEDEX_BASE_URL";
const CACHE_CAPACITY_VAR: &str = "LEAGUEDEX_CACHE_CAPACITY";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub cache_capacity: CacheCapacity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            cache_capacity: CacheCapacity::Unbounded,
        }
    }
}

impl Config {
    // reads the process environment; call dotenv first to pick up a .env file
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|var| env::var(var))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let mut config = Self::default();

        if let Some(base_url) = optional(&lookup, BASE_URL_VAR)? {
            config.base_url = base_url;
        }
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        if let Some(raw) = optional(&lookup, CACHE_CAPACITY_VAR)? {
            let max: usize = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::new(CACHE_CAPACITY_VAR, &raw, e))?;
            config.cache_capacity = match NonZeroUsize::new(max) {
                Some(max) => CacheCapacity::Bounded(max),
                None => CacheCapacity::Unbounded,
            };
        }

        Ok(config)
    }
}

fn optional<F>(lookup: &F, var: &str) -> Result<Option<String>, EnvVarError>
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    match lookup(var) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(EnvVarError::new(var, e)),
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use std::env::VarError;
    use std::num::NonZeroUsize;

    use super::{Config, DEFAULT_BASE_URL};
    use crate::cache::CacheCapacity;
    use crate::error::Error;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cache_capacity, CacheCapacity::Unbounded);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("LEAGUEDEX_BASE_URL", "http://127.0.0.1:1234/api/"),
            ("LEAGUEDEX_CACHE_CAPACITY", "16"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:1234/api");
        assert_eq!(
            config.cache_capacity,
            CacheCapacity::Bounded(NonZeroUsize::new(16).unwrap())
        );

        let config = Config::from_lookup(lookup(&[("LEAGUEDEX_CACHE_CAPACITY", "0")])).unwrap();
        assert_eq!(config.cache_capacity, CacheCapacity::Unbounded);
    }

    #[test]
    fn test_invalid_capacity() {
        let err = Config::from_lookup(lookup(&[("LEAGUEDEX_CACHE_CAPACITY", "lots")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("LEAGUEDEX_CACHE_CAPACITY"));
    }

    #[test]
    fn test_non_unicode_value() {
        let err = Config::from_lookup(|_| Err(VarError::NotUnicode("\u{fffd}".into()))).unwrap_err();
        assert!(matches!(err, Error::EnvVar(_)));
    }
}
