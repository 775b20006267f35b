//! Filtering, ordering and pagination
//!
//! Every list parameter is a plain string, exactly as it would arrive on a
//! query string. Values that do not parse are dropped.

use instdir_core::prelude::*;

fn show(title: &str, page: &Page<InstitutionSummary>) {
    println!("--- {title} ({} matched) ---", page.count);
    for s in &page.items {
        println!(
            "  {:>10}  {:<48} {}",
            s.rank.as_deref().unwrap_or("-"),
            s.name,
            s.country
        );
    }
    println!();
}

fn main() -> Result<()> {
    let db = InstitutionDb::load()?;
    let cfg = QueryConfig::default();

    // Rank bands and open bands compare by their lower bound.
    let window = ListQuery {
        filter: FilterParams {
            rank_gte: Some("600".into()),
            rank_lte: Some("1400".into()),
            ..FilterParams::default()
        },
        ..ListQuery::default()
    };
    show("rank 600..=1400", &list_institutions(&db, &window, &cfg)?);

    // Classification filters skip institutions without a classification.
    let research = ListQuery {
        filter: FilterParams {
            research: Some("very high".into()),
            ..FilterParams::default()
        },
        ordering: Some("-rank".into()),
        ..ListQuery::default()
    };
    show("very high research, worst first", &list_institutions(&db, &research, &cfg)?);

    // Accent- and case-insensitive search over name and country.
    let search = ListQuery {
        filter: FilterParams {
            search: Some("UNIVERSITAT".into()),
            ..FilterParams::default()
        },
        ..ListQuery::default()
    };
    show("search 'UNIVERSITAT'", &list_institutions(&db, &search, &cfg)?);

    // Exact country matching as a deployment choice.
    let strict = QueryConfig {
        country_match: CountryMatch::Exact,
        ..cfg
    };
    let austria = ListQuery {
        filter: FilterParams {
            country: Some("Austria".into()),
            ..FilterParams::default()
        },
        ..ListQuery::default()
    };
    show("country = Austria (insensitive)", &list_institutions(&db, &austria, &cfg)?);
    show("country = Austria (exact)", &list_institutions(&db, &austria, &strict)?);

    // Garbage parameters fall back to defaults instead of failing.
    let sloppy = ListQuery {
        filter: FilterParams {
            rank_gte: Some("abc".into()),
            ..FilterParams::default()
        },
        ordering: Some("popularity,name".into()),
        page: PageParams {
            page: Some("0".into()),
            page_size: Some("3".into()),
        },
    };
    show("sloppy query, ordered by name", &list_institutions(&db, &sloppy, &cfg)?);

    Ok(())
}
