// crates/instdir-core/src/config.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 1000;

/// How the `country` filter compares values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryMatch {
    /// Case- and accent-insensitive equality.
    #[default]
    CaseInsensitive,
    /// Byte-for-byte equality.
    Exact,
}

impl FromStr for CountryMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insensitive" | "case_insensitive" | "iexact" => Ok(CountryMatch::CaseInsensitive),
            "exact" | "sensitive" => Ok(CountryMatch::Exact),
            other => Err(format!("expected 'insensitive' or 'exact', got {other:?}")),
        }
    }
}

impl fmt::Display for CountryMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CountryMatch::CaseInsensitive => "insensitive",
            CountryMatch::Exact => "exact",
        })
    }
}

/// Deployment knobs for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    pub default_page_size: usize,
    /// Hard cap applied to any requested page size.
    pub max_page_size: usize,
    pub country_match: CountryMatch,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            country_match: CountryMatch::default(),
        }
    }
}

impl QueryConfig {
    /// Keeps the defaults usable: both sizes at least 1, default within cap.
    pub fn sanitized(self) -> Self {
        let max_page_size = self.max_page_size.max(1);
        Self {
            max_page_size,
            default_page_size: self.default_page_size.clamp(1, max_page_size),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_match_parses() {
        assert_eq!("Exact".parse(), Ok(CountryMatch::Exact));
        assert_eq!("insensitive".parse(), Ok(CountryMatch::CaseInsensitive));
        assert!("maybe".parse::<CountryMatch>().is_err());
    }

    #[test]
    fn sanitized_keeps_default_within_cap() {
        let cfg = QueryConfig {
            default_page_size: 500,
            max_page_size: 100,
            ..QueryConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.default_page_size, 100);

        let zero = QueryConfig {
            default_page_size: 0,
            max_page_size: 0,
            ..QueryConfig::default()
        }
        .sanitized();
        assert_eq!((zero.default_page_size, zero.max_page_size), (1, 1));
    }
}
