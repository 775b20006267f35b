use std::sync::Arc;

use anyhow::Context;
use instdir_core::{InstitutionDb, InstitutionStore, QueryConfig};
use tracing::info;

use super::config::Config;

pub struct AppState {
    pub store: Arc<dyn InstitutionStore>,
    pub query: QueryConfig,
}

impl AppState {
    /// Loads the configured dataset.
    pub fn new(config: &Config) -> anyhow::Result<Arc<Self>> {
        let path = config.data.clone().unwrap_or_else(|| {
            InstitutionDb::default_data_dir().join(InstitutionDb::default_dataset_filename())
        });
        let filter: Option<Vec<&str>> = config
            .country_filter
            .as_ref()
            .map(|c| c.iter().map(String::as_str).collect());

        info!("Loading dataset from {}", path.display());
        let db = InstitutionDb::load_from_path(&path, filter.as_deref())
            .with_context(|| format!("loading dataset {}", path.display()))?;

        let stats = db.stats();
        info!(
            institutions = stats.institutions,
            classifications = stats.classifications,
            metrics = stats.metrics,
            "Dataset loaded"
        );

        Ok(Self::with_store(Arc::new(db), config.query))
    }

    pub fn with_store(store: Arc<dyn InstitutionStore>, query: QueryConfig) -> Arc<Self> {
        Arc::new(Self { store, query })
    }
}
