// crates/instdir-core/src/lib.rs

pub mod api; // JSON views
pub mod common;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod paging;
pub mod rank;
#[doc(hidden)]
pub mod raw; // Shared raw import rows
pub mod search;
pub mod text;
pub mod traits;

pub use crate::api::{InstitutionDetail, InstitutionSummary};
pub use crate::common::DbStats;
pub use crate::config::{CountryMatch, QueryConfig};
pub use crate::error::{DirError, Result};
pub use crate::filter::{FilterParams, InstitutionFilter, Predicate};
pub use crate::model::convert::ImportReport;
pub use crate::model::{
    Classification, Focus, Institution, InstitutionDb, Metric, MetricKind, Research, Size,
};
pub use crate::paging::{Page, PageParams, PageRequest, SortOrder};
pub use crate::rank::{Rank, RankKey, UNRANKED};
pub use crate::search::{find_by_name, institution_detail, list_institutions, ListQuery};
pub use crate::traits::{InstitutionStore, NameMatch};

#[cfg(feature = "builder")]
pub use crate::loader::builder::{build_database, CompressionMode};

pub mod prelude {
    pub use crate::{
        find_by_name, institution_detail, list_institutions, CountryMatch, DbStats, DirError,
        FilterParams, InstitutionDb, InstitutionDetail, InstitutionStore, InstitutionSummary,
        ListQuery, MetricKind, NameMatch, Page, PageParams, QueryConfig, Result, SortOrder,
    };
}
