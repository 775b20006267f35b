//! instdir-cli: command-line access to the institution directory.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ instdir stats
//!
//! - List distinct countries (optionally loading only some of them)
//!   $ instdir countries
//!   $ instdir --countries=Austria,Brazil countries
//!
//! - Query like the HTTP list endpoint
//!   $ instdir list --research "very high" --rank-lte 100 -o -rank
//!
//! - Full detail for one institution
//!   $ instdir show 42 --json
//!
//! - Build a binary dataset from a raw export
//!   $ instdir build institutions.json.gz institutions.bin
//!
//! By default the dataset bundled with `instdir-core` is loaded and a binary
//! cache is written next to it for fast subsequent runs.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use instdir_core::{institution_detail, list_institutions, InstitutionDb, ListQuery, QueryConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing();

    let CliArgs {
        input,
        countries,
        json,
        command,
    } = args;

    match command {
        Commands::Stats => {
            let stats = open(input, countries)?.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Dataset statistics:");
                println!("  Institutions: {}", stats.institutions);
                println!("  Classifications: {}", stats.classifications);
                println!("  Indicator records: {}", stats.metrics);
            }
        }

        Commands::Countries => {
            let names = open(input, countries)?.countries();
            if json {
                println!("{}", serde_json::json!({ "countries": names }));
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }

        Commands::List(list) => {
            let db = open(input, countries)?;
            let page = list_institutions(&db, &ListQuery::from(list), &QueryConfig::default())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else if page.is_empty() {
                println!("No institutions on page {} ({} matched)", page.page, page.count);
            } else {
                for s in &page.items {
                    println!(
                        "{:>10}  {} ({})  [{}]",
                        s.rank.as_deref().unwrap_or("-"),
                        s.name,
                        s.country,
                        s.id
                    );
                }
                println!(
                    "-- page {} ({} per page), {} matched",
                    page.page, page.page_size, page.count
                );
            }
        }

        Commands::Show { id } => {
            let db = open(input, countries)?;
            let detail = match institution_detail(&db, &id) {
                Ok(d) => d,
                Err(e) if e.is_not_found() => anyhow::bail!("No institution found for id: {id}"),
                Err(e) => return Err(e.into()),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                print_detail(&detail);
            }
        }

        #[cfg(feature = "builder")]
        Commands::Build {
            source,
            out,
            no_compress,
        } => {
            use instdir_core::{build_database, CompressionMode};
            use std::path::Path;

            let compression = if no_compress {
                CompressionMode::None
            } else {
                CompressionMode::preferred()
            };
            let report = build_database(Path::new(&source), Path::new(&out), compression)
                .with_context(|| format!("building {out} from {source}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Wrote {out}");
                println!("  Rows read: {}", report.rows);
                println!("  Imported: {}", report.imported);
                println!("  Skipped (blank name): {}", report.skipped_blank_name);
                println!("  Skipped (duplicate): {}", report.skipped_duplicate);
                println!("  Unknown labels: {}", report.unknown_labels);
            }
        }
    }

    Ok(())
}

fn open(input: Option<String>, countries: Option<String>) -> anyhow::Result<InstitutionDb> {
    let input_path = input.unwrap_or_else(|| {
        let dir = InstitutionDb::default_data_dir();
        let filename = InstitutionDb::default_dataset_filename();
        dir.join(filename).to_string_lossy().to_string()
    });

    let filter: Option<Vec<&str>> = countries.as_ref().map(|s| {
        s.split(',')
            .map(|x| x.trim())
            .filter(|x| !x.is_empty())
            .collect()
    });

    debug!(path = %input_path, countries = ?filter, "opening dataset");
    InstitutionDb::load_from_path(&input_path, filter.as_deref())
        .with_context(|| format!("loading dataset {input_path}"))
}

fn print_detail(d: &instdir_core::InstitutionDetail) {
    let s = &d.summary;
    println!("{}", s.name);
    println!("  Id: {}", s.id);
    println!("  Country: {}", s.country);
    println!("  Rank: {}", s.rank.as_deref().unwrap_or("-"));
    println!("  Overall score: {}", s.overall_score.as_deref().unwrap_or("-"));
    for link in &d.web_links {
        println!("  Link: {link}");
    }
    if let Some(c) = &d.classification {
        let label = |v: Option<&'static str>| v.unwrap_or("-");
        println!("  Size: {}", label(c.size.map(|v| v.label())));
        println!("  Focus: {}", label(c.focus.map(|v| v.label())));
        println!("  Research: {}", label(c.research.map(|v| v.label())));
    }
    for kind in instdir_core::MetricKind::ALL {
        if let Some(m) = d.metric(*kind) {
            println!("  {}: {} (rank {})", kind.label(), m.score, m.rank);
        }
    }
}

fn init_tracing() {
    let filter = std::env::var("INSTDIR_LOG")
        .ok()
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
