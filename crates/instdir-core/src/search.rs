// crates/instdir-core/src/search.rs

//! The read path: filter → order → paginate → assemble.

use crate::api::{InstitutionDetail, InstitutionSummary};
use crate::config::QueryConfig;
use crate::error::{DirError, Result};
use crate::filter::{FilterParams, InstitutionFilter};
use crate::paging::{Page, PageParams, PageRequest, SortOrder};
use crate::traits::{InstitutionStore, NameMatch};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything a list request can carry, flat as on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(flatten)]
    pub filter: FilterParams,
    pub ordering: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

impl ListQuery {
    /// Build from raw `key=value` pairs. Unknown keys are ignored; a
    /// repeated key keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut q = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "search" => &mut q.filter.search,
                "country" => &mut q.filter.country,
                "rank" => &mut q.filter.rank,
                "rank_gte" => &mut q.filter.rank_gte,
                "rank_lte" => &mut q.filter.rank_lte,
                "rank_gt" => &mut q.filter.rank_gt,
                "rank_lt" => &mut q.filter.rank_lt,
                "research" => &mut q.filter.research,
                "size" => &mut q.filter.size,
                "focus" => &mut q.filter.focus,
                "ordering" => &mut q.ordering,
                "page" => &mut q.page.page,
                "page_size" => &mut q.page.page_size,
                other => {
                    debug!(param = other, "ignoring unknown query parameter");
                    continue;
                }
            };
            *slot = Some(value.into());
        }
        q
    }
}

/// List institutions matching `query`, one page at a time.
pub fn list_institutions<S>(
    store: &S,
    query: &ListQuery,
    cfg: &QueryConfig,
) -> Result<Page<InstitutionSummary>>
where
    S: InstitutionStore + ?Sized,
{
    let filter = InstitutionFilter::from_params(&query.filter, cfg.country_match);
    let order = SortOrder::parse(query.ordering.as_deref());
    let req = PageRequest::resolve(&query.page, cfg);

    let mut matches = filter.apply(store.scan()?);
    order.sort(&mut matches);
    debug!(
        predicates = filter.predicates().len(),
        matched = matches.len(),
        page = req.page,
        page_size = req.page_size,
        "list query"
    );

    Ok(Page::slice(matches, req).map(|e| InstitutionSummary::from(e.institution)))
}

/// Full detail for one institution.
pub fn institution_detail<S>(store: &S, id: &str) -> Result<InstitutionDetail>
where
    S: InstitutionStore + ?Sized,
{
    store
        .find_by_id(id)?
        .map(InstitutionDetail::from)
        .ok_or_else(|| DirError::InstitutionNotFound(id.to_string()))
}

/// Institutions whose name equals `name`, ignoring case and accents,
/// in default order.
pub fn find_by_name<S>(store: &S, name: &str) -> Result<Vec<InstitutionSummary>>
where
    S: InstitutionStore + ?Sized,
{
    let mut hits: Vec<_> = store
        .scan()?
        .into_iter()
        .filter(|e| e.institution.is_named(name))
        .collect();
    SortOrder::default().sort(&mut hits);
    Ok(hits
        .into_iter()
        .map(|e| InstitutionSummary::from(e.institution))
        .collect())
}
