// crates/instdir-core/src/model/flat.rs
use super::{Focus, InstitutionEntry, InstitutionRecord, MetricKind, Research, Size};
use crate::common::DbStats;
use crate::rank::Rank;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

/// The master directory struct.
/// "Structure of Arrays": satellites live in their own contiguous vectors
/// and institutions point into them by index or range.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InstitutionDb {
    /// Master list of all institutions, in import order.
    pub institutions: Vec<Institution>,
    /// Master list of all classifications. At most one per institution.
    pub classifications: Vec<Classification>,
    /// Master list of all metric records, grouped per institution.
    pub metrics: Vec<Metric>,

    /// Identity → position in `institutions`. Rebuilt after load.
    #[serde(skip)]
    by_id: HashMap<String, u32>,
}

/// An Institution entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    /// Opaque, unique, stable identity.
    pub id: String,
    pub name: String,
    pub country: String,
    pub rank: Rank,
    /// Free-form; the source mixes numbers and markers.
    pub overall_score: Option<String>,
    pub web_links: Vec<String>,

    /// Index into the master `classifications` vector.
    pub classification: Option<u32>,
    /// Range of this institution's records in the master `metrics` vector.
    pub metrics_range: Range<u32>,
}

/// Classification satellite. Each field may be absent in the source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub institution: u32,
    pub size: Option<Size>,
    pub focus: Option<Focus>,
    pub research: Option<Research>,
}

/// One (score, rank) indicator, keyed by (institution, kind).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub institution: u32,
    pub kind: MetricKind,
    pub score: String,
    pub rank: String,
}

impl InstitutionDb {
    pub fn new(
        institutions: Vec<Institution>,
        classifications: Vec<Classification>,
        metrics: Vec<Metric>,
    ) -> Self {
        let mut db = Self {
            institutions,
            classifications,
            metrics,
            by_id: HashMap::new(),
        };
        db.reindex();
        db
    }

    /// Rebuild the identity index. Needed after deserialization.
    pub fn reindex(&mut self) {
        self.by_id = self
            .institutions
            .iter()
            .enumerate()
            .map(|(i, inst)| (inst.id.clone(), i as u32))
            .collect();
    }

    pub fn institutions(&self) -> &[Institution] {
        &self.institutions
    }

    pub fn len(&self) -> usize {
        self.institutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.institutions.is_empty()
    }

    pub fn stats(&self) -> DbStats {
        DbStats {
            institutions: self.institutions.len(),
            classifications: self.classifications.len(),
            metrics: self.metrics.len(),
        }
    }

    pub fn classification_of(&self, inst: &Institution) -> Option<&Classification> {
        inst.classification
            .and_then(|i| self.classifications.get(i as usize))
    }

    pub fn metrics_of(&self, inst: &Institution) -> &[Metric] {
        let r = inst.metrics_range.start as usize..inst.metrics_range.end as usize;
        self.metrics.get(r).unwrap_or(&[])
    }

    /// Every institution with its classification, in storage order.
    pub fn entries(&self) -> impl Iterator<Item = InstitutionEntry<'_>> + '_ {
        self.institutions.iter().map(move |inst| InstitutionEntry {
            institution: inst,
            classification: self.classification_of(inst),
        })
    }

    pub fn find_by_id(&self, id: &str) -> Option<InstitutionRecord<'_>> {
        let idx = *self.by_id.get(id)?;
        let inst = self.institutions.get(idx as usize)?;
        Some(self.record(inst))
    }

    pub fn record<'a>(&'a self, inst: &'a Institution) -> InstitutionRecord<'a> {
        InstitutionRecord {
            institution: inst,
            classification: self.classification_of(inst),
            metrics: self.metrics_of(inst),
        }
    }

    /// Distinct, sorted, non-blank country names.
    pub fn countries(&self) -> Vec<String> {
        self.institutions
            .iter()
            .map(|i| i.country.trim())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Keep only the institutions matching `keep`.
    ///
    /// Satellites of dropped institutions go with them; indices and ranges
    /// of the survivors are rewritten.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Institution) -> bool,
    {
        let old = std::mem::take(self);
        let mut out = InstitutionDb::default();

        for inst in &old.institutions {
            if !keep(inst) {
                continue;
            }
            let new_idx = out.institutions.len() as u32;

            let classification = old.classification_of(inst).map(|c| {
                let pos = out.classifications.len() as u32;
                out.classifications.push(Classification {
                    institution: new_idx,
                    ..c.clone()
                });
                pos
            });

            let m_start = out.metrics.len() as u32;
            out.metrics
                .extend(old.metrics_of(inst).iter().map(|m| Metric {
                    institution: new_idx,
                    ..m.clone()
                }));

            out.institutions.push(Institution {
                classification,
                metrics_range: m_start..(out.metrics.len() as u32),
                ..inst.clone()
            });
        }

        out.reindex();
        *self = out;
    }

    /// Delete one institution and all of its satellites.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.by_id.contains_key(id) {
            return false;
        }
        self.retain(|inst| inst.id != id);
        true
    }
}
