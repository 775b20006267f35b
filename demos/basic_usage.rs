//! Basic usage of the institution directory
//!
//! This demo shows how to:
//! - Load the bundled dataset
//! - Page through the default (rank) ordering
//! - Fetch one institution with all of its indicators

use instdir_core::prelude::*;

fn main() -> Result<()> {
    println!("=== instdir Basic Usage ===\n");

    println!("Loading dataset...");
    let db = InstitutionDb::load()?;
    let stats = db.stats();
    println!(
        "✓ {} institutions, {} classifications, {} indicator records\n",
        stats.institutions, stats.classifications, stats.metrics
    );

    println!("--- Top of the table ---");
    let cfg = QueryConfig::default();
    let query = ListQuery {
        page: PageParams {
            page: None,
            page_size: Some("5".into()),
        },
        ..ListQuery::default()
    };
    let page = list_institutions(&db, &query, &cfg)?;
    for s in &page.items {
        println!(
            "{:>10}  {} ({})",
            s.rank.as_deref().unwrap_or("-"),
            s.name,
            s.country
        );
    }
    println!("showing {} of {}\n", page.len(), page.count);

    println!("--- Countries ---");
    let countries = db.countries();
    println!("{} distinct: {}\n", countries.len(), countries.join(", "));

    println!("--- Detail ---");
    if let Some(first) = page.items.first() {
        let detail = institution_detail(&db, &first.id)?;
        println!("{}", detail.summary.name);
        for kind in MetricKind::ALL {
            match detail.metric(*kind) {
                Some(m) => println!("  {:<32} {:>6} (rank {})", kind.label(), m.score, m.rank),
                None => println!("  {:<32} {:>6}", kind.label(), "-"),
            }
        }
    }

    Ok(())
}
