// crates/instdir-core/src/model/load.rs
use super::flat::InstitutionDb;
use crate::text::equals_folded;
use bincode::Options;

/// Upper bound for a serialized dataset, against malformed input.
const MAX_DATASET_BYTES: u64 = 256 * 1024 * 1024;

impl InstitutionDb {
    /// Reconstructs the directory from its binary form, optionally keeping
    /// only the institutions of the given countries.
    ///
    /// 1. Deserializes the master dataset from the provided bytes.
    /// 2. If a filter is active, rebuilds the flat arrays for the kept
    ///    institutions so satellite indices stay consistent.
    pub fn from_bytes(
        data: &[u8],
        filter_countries: Option<&[&str]>,
    ) -> Result<Self, bincode::Error> {
        let mut master: InstitutionDb = bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .with_limit(MAX_DATASET_BYTES)
            .allow_trailing_bytes()
            .deserialize(data)?;
        master.reindex();

        // Fast path
        let filter = match filter_countries {
            Some(f) if !f.is_empty() => f,
            _ => return Ok(master),
        };

        master.retain(|inst| filter.iter().any(|c| equals_folded(c, &inst.country)));
        Ok(master)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::convert::from_raw;
    use crate::model::{InstitutionDb, MetricKind};
    use crate::raw::InstitutionRaw;

    fn sample() -> InstitutionDb {
        let rows = [("1", "A", "Austria"), ("2", "B", "Brazil"), ("3", "C", "austria")]
            .into_iter()
            .map(|(id, name, country)| {
                let mut r = InstitutionRaw {
                    id: Some(id.into()),
                    name: name.into(),
                    country: country.into(),
                    rank: Some(id.into()),
                    size: Some("Small".into()),
                    ..InstitutionRaw::default()
                };
                r.set_metric(MetricKind::Sustainability, id, id);
                r
            })
            .collect();
        from_raw(rows).0
    }

    #[test]
    fn bytes_round_trip_rebuilds_the_id_index() {
        let db = sample();
        let bytes = db.to_bytes().unwrap();
        let back = InstitutionDb::from_bytes(&bytes, None).unwrap();
        assert_eq!(back.stats(), db.stats());
        assert_eq!(back.find_by_id("2").unwrap().institution.name, "B");
    }

    #[test]
    fn country_filter_keeps_satellites_aligned() {
        let bytes = sample().to_bytes().unwrap();
        let db = InstitutionDb::from_bytes(&bytes, Some(&["AUSTRIA"][..])).unwrap();

        assert_eq!(db.len(), 2);
        assert_eq!(db.stats().classifications, 2);
        assert_eq!(db.stats().metrics, 2);
        let c = db.find_by_id("3").unwrap();
        assert_eq!(c.metric(MetricKind::Sustainability).unwrap().score, "3");
        assert_eq!(c.classification.unwrap().institution, 1);
        assert!(db.find_by_id("2").is_none());
    }

    #[test]
    fn remove_cascades_to_satellites() {
        let mut db = sample();
        assert!(db.remove("1"));
        assert!(!db.remove("1"));
        assert_eq!(db.stats().institutions, 2);
        assert_eq!(db.stats().classifications, 2);
        assert_eq!(db.stats().metrics, 2);
        assert!(db.metrics.iter().all(|m| (m.institution as usize) < db.len()));
        assert_eq!(db.find_by_id("2").unwrap().metrics[0].score, "2");
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        assert!(InstitutionDb::from_bytes(b"not a dataset", None).is_err());
    }
}
