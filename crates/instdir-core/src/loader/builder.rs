// crates/instdir-core/src/loader/builder.rs
#![cfg(feature = "builder")]

use super::common_io;
use crate::error::{DirError, Result};
use crate::model::convert::{from_raw, ImportReport};
use crate::model::{InstitutionDb, CACHE_SUFFIX};
use crate::raw::InstitutionsRaw;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

#[cfg(feature = "compact")]
use flate2::{write::GzEncoder, Compression};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl CompressionMode {
    /// Gzip when `compact` is compiled in.
    pub fn preferred() -> Self {
        if cfg!(feature = "compact") {
            CompressionMode::Gzip
        } else {
            CompressionMode::None
        }
    }
}

/// Bulk import: raw export -> binary dataset at `out_path`.
pub fn build_database(
    source_path: &Path,
    out_path: &Path,
    compression: CompressionMode,
) -> Result<ImportReport> {
    info!(
        source = %source_path.display(),
        out = %out_path.display(),
        ?compression,
        "building dataset"
    );

    let (db, report) = import(source_path)?;
    write_generic(out_path, &db, compression)?;

    info!(
        imported = report.imported,
        skipped_blank_name = report.skipped_blank_name,
        skipped_duplicate = report.skipped_duplicate,
        "dataset written"
    );
    Ok(report)
}

/// Parses a `.json` / `.json.gz` export and converts it.
pub fn import(source_path: &Path) -> Result<(InstitutionDb, ImportReport)> {
    let reader = common_io::open_stream(source_path)?;
    let raw: InstitutionsRaw = serde_json::from_reader(reader).map_err(DirError::Json)?;
    Ok(from_raw(raw))
}

impl InstitutionDb {
    /// Loads a raw export, reusing the binary cache beside it when that is
    /// newer than the source.
    pub(super) fn load_via_builder(path: &Path, filter: Option<&[&str]>) -> Result<Self> {
        let cache_path = common_io::get_cache_path(path, CACHE_SUFFIX);

        if is_cache_fresh(path, &cache_path) {
            match Self::load_binary_file(&cache_path, filter) {
                Ok(db) => return Ok(db),
                Err(e) => warn!(
                    cache = %cache_path.display(),
                    error = %e,
                    "stale or unreadable cache, rebuilding"
                ),
            }
        }

        let (db, report) = import(path)?;
        info!(source = %path.display(), imported = report.imported, "built dataset from source");

        if let Err(e) = write_generic(&cache_path, &db, CompressionMode::preferred()) {
            warn!(cache = %cache_path.display(), error = %e, "could not write dataset cache");
        }

        match filter {
            Some(f) if !f.is_empty() => {
                let mut db = db;
                db.retain(|inst| f.iter().any(|c| crate::text::equals_folded(c, &inst.country)));
                Ok(db)
            }
            _ => Ok(db),
        }
    }

    /// Builds directly from a raw export, skipping the cache.
    pub fn load_raw_json(path: impl AsRef<Path>) -> Result<Self> {
        import(path.as_ref()).map(|(db, _)| db)
    }
}

fn is_cache_fresh(source: &Path, cache: &Path) -> bool {
    let Ok(cache_time) = fs::metadata(cache).and_then(|m| m.modified()) else {
        return false;
    };
    match fs::metadata(source).and_then(|m| m.modified()) {
        Ok(source_time) => source_time <= cache_time,
        Err(_) => true,
    }
}

fn write_generic(path: &Path, db: &InstitutionDb, compression: CompressionMode) -> Result<()> {
    let bytes = db.to_bytes()?;
    let mut writer = BufWriter::new(File::create(path)?);

    match compression {
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                let mut encoder = GzEncoder::new(writer, Compression::default());
                encoder.write_all(&bytes)?;
                encoder.finish()?.flush()?;
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(DirError::InvalidData(
                    "Gzip requested but 'compact' disabled".into(),
                ));
            }
        }
        CompressionMode::None => {
            writer.write_all(&bytes)?;
            writer.flush()?;
        }
    }
    Ok(())
}
