// crates/instdir-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1) Transliterate Unicode → ASCII (e.g. `Zürich` -> `Zurich`)
/// 2) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use instdir_core::text::fold_key;
///
/// assert_eq!(fold_key("Universität Zürich"), "universitat zurich");
/// assert_eq!(fold_key("ÉCOLE"), "ecole");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Compares two strings for equality after folding.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Substring match on the folded form of both strings.
///
/// An empty needle matches everything.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold_key(haystack).contains(&fold_key(needle))
}

/// Returns the trimmed string, or `None` when it is blank.
pub fn non_blank(s: &str) -> Option<&str> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t)
    }
}
