// End-to-end checks against the bundled sample export.
#![cfg(feature = "builder")]

use instdir_core::loader::builder::import;
use instdir_core::{
    build_database, institution_detail, list_institutions, CompressionMode, FilterParams,
    InstitutionDb, ListQuery, MetricKind, PageParams, QueryConfig,
};
use std::path::PathBuf;

fn sample_path() -> PathBuf {
    InstitutionDb::default_data_dir().join(InstitutionDb::default_dataset_filename())
}

fn sample() -> InstitutionDb {
    InstitutionDb::load_raw_json(sample_path()).expect("sample export parses")
}

fn ids(db: &InstitutionDb, q: &ListQuery) -> Vec<String> {
    list_institutions(db, q, &QueryConfig::default())
        .unwrap()
        .items
        .into_iter()
        .map(|s| s.id)
        .collect()
}

#[test]
fn import_applies_row_rules() {
    let (db, report) = import(&sample_path()).unwrap();
    assert_eq!(report.rows, 12);
    assert_eq!(report.imported, 10);
    assert_eq!(report.skipped_blank_name, 1);
    assert_eq!(report.skipped_duplicate, 1);
    assert_eq!(report.classifications, 9);
    assert_eq!(report.metrics, 13);
    assert_eq!(report.unknown_labels, 1);
    assert_eq!(db.len(), 10);

    // First "Imperial College London" wins.
    let imperial = db.find_by_id("2").unwrap();
    assert_eq!(imperial.institution.rank.raw(), Some("2"));
    assert!(db.find_by_id("11").is_none());
}

#[test]
fn numeric_cells_stay_strings() {
    let detail = institution_detail(&sample(), "2").unwrap();
    assert_eq!(detail.summary.overall_score.as_deref(), Some("99.4"));
}

#[test]
fn null_cells_do_not_abort_the_import() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("nulls.json");
    std::fs::write(
        &source,
        r#"[
            {"id": "1", "name": "A", "country": "Austria", "rank": 1, "overall_score": 100.0},
            {"id": "2", "name": null, "country": "Brazil", "rank": "2"},
            {"id": "3", "name": "C", "country": null, "rank": null, "overall_score": 45.10}
        ]"#,
    )
    .unwrap();

    let (db, report) = import(&source).unwrap();
    assert_eq!(report.rows, 3);
    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped_blank_name, 1);
    assert!(db.find_by_id("2").is_none());

    let a = institution_detail(&db, "1").unwrap();
    assert_eq!(a.summary.overall_score.as_deref(), Some("100.0"));
    let c = institution_detail(&db, "3").unwrap();
    assert_eq!(c.summary.country, "");
    assert_eq!(c.summary.overall_score.as_deref(), Some("45.10"));
    assert!(c.summary.rank.is_none());
}

#[test]
fn default_order_puts_unranked_last() {
    let db = sample();
    assert_eq!(
        ids(&db, &ListQuery::default()),
        ["1", "2", "3", "5", "6", "7", "8", "10", "4", "9"]
    );
}

#[test]
fn country_filter_ignores_case() {
    let db = sample();
    let q = ListQuery {
        filter: FilterParams {
            country: Some("AUSTRIA".into()),
            ..FilterParams::default()
        },
        ..ListQuery::default()
    };
    assert_eq!(ids(&db, &q), ["10", "4"]);
}

#[test]
fn research_and_rank_window_combine() {
    let db = sample();
    let q = ListQuery {
        filter: FilterParams {
            research: Some("high".into()),
            rank_gte: Some("600".into()),
            ..FilterParams::default()
        },
        ..ListQuery::default()
    };
    // Unranked keys sit above every real rank.
    assert_eq!(ids(&db, &q), ["6", "4"]);
}

#[test]
fn search_is_accent_insensitive() {
    let db = sample();
    let q = ListQuery {
        filter: FilterParams {
            search: Some("universitat".into()),
            ..FilterParams::default()
        },
        ..ListQuery::default()
    };
    assert_eq!(ids(&db, &q), ["4"]);
}

#[test]
fn pages_partition_the_listing() {
    let db = sample();
    let page = |n: &str| ListQuery {
        page: PageParams {
            page: Some(n.into()),
            page_size: Some("4".into()),
        },
        ..ListQuery::default()
    };
    let all: Vec<String> = ["1", "2", "3"].iter().flat_map(|n| ids(&db, &page(n))).collect();
    assert_eq!(all, ids(&db, &ListQuery::default()));

    let last = list_institutions(&db, &page("3"), &QueryConfig::default()).unwrap();
    assert_eq!(last.count, 10);
    assert!(!last.has_next);
    assert!(last.has_previous);
}

#[test]
fn detail_joins_every_satellite() {
    let db = sample();
    let mit = institution_detail(&db, "1").unwrap();
    for kind in MetricKind::ALL {
        assert!(mit.metric(*kind).is_some(), "{}", kind.field_name());
    }
    assert!(mit.classification.is_some());

    let oxford = institution_detail(&db, "3").unwrap();
    assert_eq!(oxford.web_links.len(), 2);
    assert!(oxford.metric(MetricKind::EmploymentOutcomes).is_none());

    let unranked = institution_detail(&db, "9").unwrap();
    assert!(unranked.classification.is_none());
    assert_eq!(unranked.web_links, ["https://a.example", "https://b.example"]);

    let gigantic = institution_detail(&db, "10").unwrap();
    let class = gigantic.classification.unwrap();
    assert!(class.size.is_none());
    assert!(class.research.is_some());
}

#[test]
fn countries_are_distinct_and_sorted() {
    let countries = sample().countries();
    let mut sorted = countries.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(countries, sorted);
    assert!(countries.contains(&"United Kingdom".to_string()));
    assert!(!countries.contains(&"Nowhere".to_string()));
}

#[test]
fn build_then_load_binary() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("institutions.bin");

    let report = build_database(&sample_path(), &out, CompressionMode::preferred()).unwrap();
    assert_eq!(report.imported, 10);

    let loaded = InstitutionDb::load_from_path(&out, None).unwrap();
    let built = sample();
    assert_eq!(loaded.stats(), built.stats());
    assert_eq!(
        ids(&loaded, &ListQuery::default()),
        ids(&built, &ListQuery::default())
    );

    let austria = InstitutionDb::load_from_path(&out, Some(&["austria"][..])).unwrap();
    assert_eq!(austria.len(), 2);
    assert!(austria.find_by_id("4").unwrap().classification.is_some());
    assert!(austria.find_by_id("1").is_none());
}

#[test]
fn raw_source_writes_a_cache_beside_it() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("institutions.json");
    std::fs::copy(sample_path(), &source).unwrap();

    let first = InstitutionDb::load_from_path(&source, None).unwrap();
    let cache = dir
        .path()
        .join(format!("institutions.json.{}", instdir_core::model::CACHE_SUFFIX));
    assert!(cache.exists());

    let second = InstitutionDb::load_from_path(&source, None).unwrap();
    assert_eq!(first.stats(), second.stats());
}

#[cfg(feature = "compact")]
#[test]
fn gzipped_source_loads() {
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;

    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("institutions.json.gz");
    let mut enc = GzEncoder::new(std::fs::File::create(&source).unwrap(), Compression::fast());
    enc.write_all(&std::fs::read(sample_path()).unwrap()).unwrap();
    enc.finish().unwrap();

    let db = InstitutionDb::load_from_path(&source, None).unwrap();
    assert_eq!(db.len(), 10);
}

#[test]
fn garbage_binary_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.bin");
    std::fs::write(&path, b"definitely not bincode").unwrap();
    assert!(InstitutionDb::load_from_path(&path, None).is_err());
}

#[test]
fn missing_dataset_is_reported() {
    let err = InstitutionDb::load_from_path("/no/such/institutions.bin", None).unwrap_err();
    assert!(!err.is_not_found());
    assert!(err.to_string().contains("not found"));
}
