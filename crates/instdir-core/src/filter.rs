// crates/instdir-core/src/filter.rs

//! # Query Filter Engine
//!
//! Raw query parameters are compiled once into a list of [`Predicate`]s;
//! an institution matches when every predicate holds. Inputs that cannot be
//! interpreted (a non-numeric `rank_gte`, a blank `country`) are dropped
//! during compilation instead of failing the query.

use crate::config::CountryMatch;
use crate::model::{Focus, InstitutionEntry, Research, Size};
use crate::rank::RankKey;
use crate::text::{contains_folded, equals_folded, non_blank};
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filter parameters exactly as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    pub search: Option<String>,
    pub country: Option<String>,
    pub rank: Option<String>,
    pub rank_gte: Option<String>,
    pub rank_lte: Option<String>,
    pub rank_gt: Option<String>,
    pub rank_lt: Option<String>,
    pub research: Option<String>,
    pub size: Option<String>,
    pub focus: Option<String>,
}

/// One compiled condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Country equality, folded or exact per [`CountryMatch`].
    Country(String, CountryMatch),
    /// Folded substring of name OR country.
    Search(String),
    RankEq(RankKey),
    RankGte(RankKey),
    RankLte(RankKey),
    RankGt(RankKey),
    RankLt(RankKey),
    Research(Research),
    Size(Size),
    Focus(Focus),
    /// A classification filter whose label names no known value.
    Nothing,
}

impl Predicate {
    pub fn matches(&self, entry: &InstitutionEntry<'_>) -> bool {
        let inst = entry.institution;
        let key = inst.rank.key();
        match self {
            Predicate::Country(c, CountryMatch::CaseInsensitive) => equals_folded(&inst.country, c),
            Predicate::Country(c, CountryMatch::Exact) => inst.country == *c,
            Predicate::Search(q) => inst.name_contains(q) || contains_folded(&inst.country, q),
            Predicate::RankEq(n) => key == *n,
            Predicate::RankGte(n) => key >= *n,
            Predicate::RankLte(n) => key <= *n,
            Predicate::RankGt(n) => key > *n,
            Predicate::RankLt(n) => key < *n,
            Predicate::Research(r) => entry
                .classification
                .is_some_and(|c| c.research == Some(*r)),
            Predicate::Size(s) => entry.classification.is_some_and(|c| c.size == Some(*s)),
            Predicate::Focus(f) => entry.classification.is_some_and(|c| c.focus == Some(*f)),
            Predicate::Nothing => false,
        }
    }
}

/// AND-combination of predicates. Empty means "everything".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstitutionFilter {
    predicates: Vec<Predicate>,
}

impl InstitutionFilter {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    /// Compile raw parameters. Never fails.
    pub fn from_params(params: &FilterParams, country_match: CountryMatch) -> Self {
        let mut predicates = Vec::new();

        if let Some(q) = params.search.as_deref().and_then(non_blank) {
            predicates.push(Predicate::Search(q.to_string()));
        }
        if let Some(c) = params.country.as_deref().and_then(non_blank) {
            predicates.push(Predicate::Country(c.to_string(), country_match));
        }

        let bounds: [(&str, &Option<String>, fn(RankKey) -> Predicate); 5] = [
            ("rank", &params.rank, Predicate::RankEq),
            ("rank_gte", &params.rank_gte, Predicate::RankGte),
            ("rank_lte", &params.rank_lte, Predicate::RankLte),
            ("rank_gt", &params.rank_gt, Predicate::RankGt),
            ("rank_lt", &params.rank_lt, Predicate::RankLt),
        ];
        for (name, value, make) in bounds {
            if let Some(n) = parse_bound(name, value.as_deref()) {
                predicates.push(make(n));
            }
        }

        if let Some(p) = label_predicate(params.research.as_deref(), Predicate::Research) {
            predicates.push(p);
        }
        if let Some(p) = label_predicate(params.size.as_deref(), Predicate::Size) {
            predicates.push(p);
        }
        if let Some(p) = label_predicate(params.focus.as_deref(), Predicate::Focus) {
            predicates.push(p);
        }

        Self { predicates }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn and(mut self, p: Predicate) -> Self {
        self.predicates.push(p);
        self
    }

    pub fn matches(&self, entry: &InstitutionEntry<'_>) -> bool {
        self.predicates.iter().all(|p| p.matches(entry))
    }

    /// Keep the matching entries, preserving input order.
    pub fn apply<'a, I>(&self, entries: I) -> Vec<InstitutionEntry<'a>>
    where
        I: IntoIterator<Item = InstitutionEntry<'a>>,
    {
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}

/// Integer rank bound; anything else is dropped.
fn parse_bound(name: &str, value: Option<&str>) -> Option<RankKey> {
    let v = value.and_then(non_blank)?;
    match v.parse::<RankKey>() {
        Ok(n) => Some(n),
        Err(_) => {
            debug!(param = name, value = v, "ignoring non-numeric rank bound");
            None
        }
    }
}

/// Blank labels are dropped; unknown labels match nothing.
fn label_predicate<T>(value: Option<&str>, make: fn(T) -> Predicate) -> Option<Predicate>
where
    T: std::str::FromStr,
{
    let v = value.and_then(non_blank)?;
    Some(match v.parse::<T>() {
        Ok(t) => make(t),
        Err(_) => {
            debug!(value = v, "unknown classification label, nothing can match");
            Predicate::Nothing
        }
    })
}
