// crates/instdir-core/src/traits.rs
use crate::common::DbStats;
use crate::error::Result;
use crate::model::{InstitutionDb, InstitutionEntry, InstitutionRecord};
use crate::text::{contains_folded, equals_folded};

/// Read access to the institution catalog.
///
/// The query engine only ever reads through this trait; the bulk import is
/// the sole writer. Every method may hit the underlying store and can fail
/// with [`crate::DirError::Store`]; failures are returned as-is.
pub trait InstitutionStore: Send + Sync {
    fn stats(&self) -> Result<DbStats>;

    /// All institutions with their classification preloaded.
    ///
    /// One call yields everything classification filters need, so filtering
    /// costs no extra store round-trips per institution.
    fn scan(&self) -> Result<Vec<InstitutionEntry<'_>>>;

    /// One institution with every satellite joined.
    fn find_by_id(&self, id: &str) -> Result<Option<InstitutionRecord<'_>>>;

    /// Distinct, sorted country names.
    fn countries(&self) -> Result<Vec<String>>;
}

impl InstitutionStore for InstitutionDb {
    fn stats(&self) -> Result<DbStats> {
        Ok(InstitutionDb::stats(self))
    }

    fn scan(&self) -> Result<Vec<InstitutionEntry<'_>>> {
        Ok(self.entries().collect())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<InstitutionRecord<'_>>> {
        Ok(InstitutionDb::find_by_id(self, id))
    }

    fn countries(&self) -> Result<Vec<String>> {
        Ok(InstitutionDb::countries(self))
    }
}

/// Name-based matching helpers for types that expose a display name.
///
/// Comparisons are accent- and case-insensitive.
///
/// ```rust
/// use instdir_core::traits::NameMatch;
///
/// struct Campus(&'static str);
/// impl NameMatch for Campus {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Campus("Universität Wien").is_named("universitat wien"));
/// assert!(Campus("École Polytechnique").name_contains("polytech"));
/// ```
pub trait NameMatch {
    fn name_str(&self) -> &str;

    #[inline]
    fn is_named(&self, q: &str) -> bool {
        equals_folded(self.name_str(), q)
    }

    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        contains_folded(self.name_str(), q)
    }
}

impl NameMatch for crate::model::Institution {
    fn name_str(&self) -> &str {
        &self.name
    }
}
