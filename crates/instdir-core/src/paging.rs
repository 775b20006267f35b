// crates/instdir-core/src/paging.rs

//! # Pagination & Ordering
//!
//! Ordering is a list of [`SortKey`]s applied in turn, always followed by
//! the institution id so page boundaries are stable across repeated
//! queries. `rank` compares normalized keys; `name`, `country` and
//! `overall_score` compare the raw strings lexically.

use crate::config::QueryConfig;
use crate::model::{Institution, InstitutionEntry};
use crate::text::non_blank;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Normalized rank key.
    Rank,
    Name,
    Country,
    /// Raw string, lexical. Absent scores sort last.
    OverallScore,
}

impl SortField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rank" => Some(SortField::Rank),
            "name" => Some(SortField::Name),
            "country" => Some(SortField::Country),
            "overall_score" => Some(SortField::OverallScore),
            _ => None,
        }
    }

    fn compare(self, a: &Institution, b: &Institution) -> Ordering {
        match self {
            SortField::Rank => a.rank.key().cmp(&b.rank.key()),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Country => a.country.cmp(&b.country),
            SortField::OverallScore => {
                nulls_last(a.overall_score.as_deref(), b.overall_score.as_deref())
            }
        }
    }
}

fn nulls_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

impl SortKey {
    pub const fn asc(field: SortField) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub const fn desc(field: SortField) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

/// Ordering of a result list. Identity is the implicit final key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    keys: Vec<SortKey>,
}

impl Default for SortOrder {
    /// Ascending normalized rank.
    fn default() -> Self {
        Self {
            keys: vec![SortKey::asc(SortField::Rank)],
        }
    }
}

impl SortOrder {
    pub fn new(keys: Vec<SortKey>) -> Self {
        if keys.is_empty() {
            return Self::default();
        }
        Self { keys }
    }

    /// Parse an `ordering` parameter such as `-rank,name`.
    ///
    /// Unknown fields are dropped; if nothing usable is left the default
    /// order applies.
    pub fn parse(param: Option<&str>) -> Self {
        let Some(param) = param.and_then(non_blank) else {
            return Self::default();
        };

        let keys = param
            .split(',')
            .filter_map(|part| {
                let part = part.trim();
                let (descending, name) = match part.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, part),
                };
                match SortField::parse(name) {
                    Some(field) => Some(SortKey { field, descending }),
                    None => {
                        debug!(field = part, "ignoring unknown ordering field");
                        None
                    }
                }
            })
            .collect();

        Self::new(keys)
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn compare(&self, a: &Institution, b: &Institution) -> Ordering {
        self.keys
            .iter()
            .fold(Ordering::Equal, |acc, key| {
                acc.then_with(|| {
                    let o = key.field.compare(a, b);
                    if key.descending {
                        o.reverse()
                    } else {
                        o
                    }
                })
            })
            .then_with(|| a.id.cmp(&b.id))
    }

    pub fn sort(&self, entries: &mut [InstitutionEntry<'_>]) {
        entries.sort_by(|a, b| self.compare(a.institution, b.institution));
    }
}

/// Page parameters exactly as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// A resolved page request: 1-based page, capped size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    /// Unusable values fall back to the defaults; sizes above the cap are
    /// clamped to it.
    pub fn resolve(params: &PageParams, cfg: &QueryConfig) -> Self {
        let cfg = cfg.sanitized();
        let page = positive(params.page.as_deref()).unwrap_or(1);
        let page_size = positive(params.page_size.as_deref())
            .unwrap_or(cfg.default_page_size)
            .min(cfg.max_page_size);
        Self { page, page_size }
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

fn positive(value: Option<&str>) -> Option<usize> {
    let v = value.and_then(non_blank)?;
    match v.parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            debug!(value = v, "ignoring invalid page parameter");
            None
        }
    }
}

/// One page of results plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total matches across all pages.
    pub count: usize,
    pub page: usize,
    pub page_size: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Slice one page out of an already ordered list.
    /// Pages past the end are empty, not an error.
    pub fn slice(items: Vec<T>, req: PageRequest) -> Self {
        let count = items.len();
        let offset = req.offset();
        let items: Vec<T> = items.into_iter().skip(offset).take(req.page_size).collect();
        Self {
            count,
            page: req.page,
            page_size: req.page_size,
            has_next: offset.saturating_add(req.page_size) < count,
            has_previous: req.page > 1,
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            count: self.count,
            page: self.page,
            page_size: self.page_size,
            has_next: self.has_next,
            has_previous: self.has_previous,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
