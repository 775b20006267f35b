// crates/instdir-core/src/rank.rs

//! # Rank Normalizer
//!
//! Ranking tables publish positions as heterogeneous strings: a plain
//! position (`"1"`), a band (`"621-630"`), an open band (`"601+"`) or a
//! marker such as `"na"`. Ordering and rank predicates work on a numeric
//! [`RankKey`] derived from those strings; the raw string is only ever
//! displayed.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sortable key derived from a raw rank string.
pub type RankKey = i64;

/// Key given to anything that is not a recognizable rank.
///
/// Larger than every real key, so unranked institutions sort last in
/// ascending order. Real keys are bounded by `u32::MAX`.
pub const UNRANKED: RankKey = i64::MAX;

/// The recognized shapes of a rank string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankShape {
    /// `"17"`
    Position(u32),
    /// `"621-630"`. The upper bound is kept when it parses.
    Band { start: u32, end: Option<u32> },
    /// `"601+"`
    OpenBand { from: u32 },
    /// `"na"`, blanks and anything else.
    Unranked,
}

impl RankShape {
    /// Classify a raw rank string. Total: never fails.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();

        if let Some(n) = parse_digits(s) {
            return RankShape::Position(n);
        }

        if let Some((left, right)) = s.split_once('-') {
            return match parse_digits(left.trim()) {
                Some(start) => RankShape::Band {
                    start,
                    end: parse_digits(right.trim()),
                },
                None => RankShape::Unranked,
            };
        }

        if let Some(rest) = s.strip_suffix('+') {
            return match parse_digits(rest.trim()) {
                Some(from) => RankShape::OpenBand { from },
                None => RankShape::Unranked,
            };
        }

        RankShape::Unranked
    }

    /// The sort key for this shape.
    pub fn key(self) -> RankKey {
        match self {
            RankShape::Position(n) => RankKey::from(n),
            RankShape::Band { start, .. } => RankKey::from(start),
            RankShape::OpenBand { from } => RankKey::from(from),
            RankShape::Unranked => UNRANKED,
        }
    }
}

/// Digits only. `u32::from_str` alone would also accept a leading `+`.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Normalize a raw rank string into its sort key.
///
/// # Examples
///
/// ```rust
/// use instdir_core::rank::{normalize, UNRANKED};
///
/// assert_eq!(normalize("1"), 1);
/// assert_eq!(normalize("621-630"), 621);
/// assert_eq!(normalize("601+"), 601);
/// assert_eq!(normalize("na"), UNRANKED);
/// ```
pub fn normalize(raw: &str) -> RankKey {
    RankShape::parse(raw).key()
}

/// Normalize an optional rank; absent ranks are unranked.
pub fn normalize_opt(raw: Option<&str>) -> RankKey {
    raw.map_or(UNRANKED, normalize)
}

/// A rank as stored: the display string next to its precomputed key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    raw: Option<String>,
    key: RankKey,
}

impl Rank {
    pub fn new(raw: Option<String>) -> Self {
        let key = normalize_opt(raw.as_deref());
        Self { raw, key }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn key(&self) -> RankKey {
        self.key
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    /// By key, then by display string so equal keys stay deterministic.
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}
