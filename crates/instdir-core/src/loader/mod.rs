// crates/instdir-core/src/loader/mod.rs

//! Dataset discovery and loading.
//!
//! A path ending in `.json` or `.json.gz` is treated as a raw export and
//! goes through the builder (with a binary cache written beside it). Any
//! other path is read as a binary dataset, gzip-wrapped or not.

pub mod common_io;

#[cfg(feature = "builder")]
pub mod builder;

use crate::error::{DirError, Result};
use crate::model::InstitutionDb;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_DATASET: &str = "institutions.json";

// One deserialization per process for the bundled dataset.
static DIR_DB_CACHE: OnceCell<InstitutionDb> = OnceCell::new();

impl InstitutionDb {
    /// `<crate>/data`, where the bundled dataset lives.
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn default_dataset_filename() -> &'static str {
        DEFAULT_DATASET
    }

    /// Loads the bundled dataset once and hands out clones.
    pub fn load() -> Result<Self> {
        DIR_DB_CACHE
            .get_or_try_init(|| {
                let path = Self::default_data_dir().join(DEFAULT_DATASET);
                Self::load_from_path(path, None)
            })
            .cloned()
    }

    /// Loads any supported dataset file, keeping only `filter` countries
    /// when given.
    pub fn load_from_path(path: impl AsRef<Path>, filter: Option<&[&str]>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading dataset");

        if common_io::is_source(path) {
            #[cfg(feature = "builder")]
            {
                return Self::load_via_builder(path, filter);
            }
            #[cfg(not(feature = "builder"))]
            {
                return Err(DirError::InvalidData(format!(
                    "{} is a raw export but 'builder' is disabled",
                    path.display()
                )));
            }
        }

        Self::load_binary_file(path, filter)
    }

    pub fn load_binary_file(path: &Path, filter: Option<&[&str]>) -> Result<Self> {
        let bytes = common_io::read_payload(path)?;
        Self::from_bytes(&bytes, filter).map_err(|e| {
            DirError::InvalidData(format!("{} is not a dataset: {}", path.display(), e))
        })
    }
}
