//! Error handling
//!
//! Only two things are errors: an unknown identity on detail lookup and a
//! failing store. Bad query input never is.

use instdir_core::prelude::*;

fn main() -> Result<()> {
    println!("=== instdir Error Handling ===\n");

    println!("--- Loading a dataset that does not exist ---");
    match InstitutionDb::load_from_path("/nonexistent/institutions.bin", None) {
        Ok(_) => println!("  unexpectedly loaded"),
        Err(e) => println!("  ✗ {e}"),
    }
    println!();

    let db = InstitutionDb::load()?;

    println!("--- Unknown identities ---");
    for id in ["0", "does-not-exist", ""] {
        match institution_detail(&db, id) {
            Ok(d) => println!("  found {}", d.summary.name),
            Err(e) if e.is_not_found() => println!("  not found: {id:?}"),
            Err(e) => return Err(e),
        }
    }
    println!();

    println!("--- Contradictory bounds are just empty ---");
    let q = ListQuery {
        filter: FilterParams {
            rank_gte: Some("900".into()),
            rank_lte: Some("100".into()),
            ..FilterParams::default()
        },
        ..ListQuery::default()
    };
    let page = list_institutions(&db, &q, &QueryConfig::default())?;
    println!("  {} results", page.count);
    println!();

    println!("--- Unknown classification label matches nothing ---");
    let q = ListQuery {
        filter: FilterParams {
            size: Some("Gigantic".into()),
            ..FilterParams::default()
        },
        ..ListQuery::default()
    };
    let page = list_institutions(&db, &q, &QueryConfig::default())?;
    println!("  {} results", page.count);

    Ok(())
}
