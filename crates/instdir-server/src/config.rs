use instdir_core::{CountryMatch, QueryConfig};
use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    /// Dataset path; the bundled dataset when unset.
    pub data: Option<PathBuf>,
    /// Countries to load; everything when unset.
    pub country_filter: Option<Vec<String>>,
    pub query: QueryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            data: None,
            country_filter: None,
            query: QueryConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::load`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = QueryConfig::default();
        let query = QueryConfig {
            default_page_size: try_load(
                &lookup,
                "INSTDIR_DEFAULT_PAGE_SIZE",
                defaults.default_page_size,
            ),
            max_page_size: try_load(&lookup, "INSTDIR_MAX_PAGE_SIZE", defaults.max_page_size),
            country_match: try_load(&lookup, "INSTDIR_COUNTRY_MATCH", CountryMatch::default()),
        }
        .sanitized();

        Self {
            bind: try_load(&lookup, "INSTDIR_BIND", DEFAULT_BIND.to_string()),
            data: var(&lookup, "INSTDIR_DATA").map(PathBuf::from),
            country_filter: var(&lookup, "INSTDIR_COUNTRY_FILTER").map(|s| split_list(&s)),
            query,
        }
    }
}

fn var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(lookup, key) {
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(str::to_string)
        .collect()
}
