// crates/instdir-core/src/model/convert.rs
use super::flat::{Classification, Institution, InstitutionDb, Metric};
use super::{Focus, MetricKind, Research, Size};
use crate::rank::Rank;
use crate::raw::InstitutionRaw;
use crate::text::non_blank;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{debug, warn};

/// What a bulk import did with its input rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub rows: usize,
    pub imported: usize,
    pub skipped_blank_name: usize,
    pub skipped_duplicate: usize,
    pub classifications: usize,
    pub metrics: usize,
    pub unknown_labels: usize,
}

/// **Standard Converter:** Raw rows -> Flat directory.
///
/// First occurrence wins for both names and ids. Rows without an id get
/// their 1-based row position.
pub fn from_raw(rows: Vec<InstitutionRaw>) -> (InstitutionDb, ImportReport) {
    let mut report = ImportReport {
        rows: rows.len(),
        ..ImportReport::default()
    };

    let mut institutions = Vec::with_capacity(rows.len());
    let mut classifications = Vec::new();
    let mut metrics = Vec::new();

    let mut seen_names: HashSet<String> = HashSet::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (pos, row) in rows.into_iter().enumerate() {
        let Some(name) = non_blank(&row.name) else {
            debug!(row = pos + 1, "skipping row without a name");
            report.skipped_blank_name += 1;
            continue;
        };

        let id = row
            .id
            .as_deref()
            .and_then(non_blank)
            .map(str::to_string)
            .unwrap_or_else(|| (pos + 1).to_string());

        if !seen_names.insert(name.to_string()) {
            warn!(row = pos + 1, name, "skipping duplicate institution name");
            report.skipped_duplicate += 1;
            continue;
        }
        if !seen_ids.insert(id.clone()) {
            warn!(row = pos + 1, id = %id, "skipping duplicate institution id");
            report.skipped_duplicate += 1;
            continue;
        }

        let idx = institutions.len() as u32;

        let classification = build_classification(&row, idx, &mut report).map(|c| {
            classifications.push(c);
            (classifications.len() - 1) as u32
        });

        let m_start = metrics.len() as u32;
        for kind in MetricKind::ALL {
            let (score, rank) = row.metric_cells(*kind);
            match (score.and_then(non_blank), rank.and_then(non_blank)) {
                (Some(score), Some(rank)) => metrics.push(Metric {
                    institution: idx,
                    kind: *kind,
                    score: score.to_string(),
                    rank: rank.to_string(),
                }),
                _ => debug!(name, metric = kind.field_name(), "incomplete metric, skipped"),
            }
        }

        institutions.push(Institution {
            id,
            name: name.to_string(),
            country: row.country.trim().to_string(),
            rank: Rank::new(row.rank.as_deref().and_then(non_blank).map(str::to_string)),
            overall_score: row
                .overall_score
                .as_deref()
                .and_then(non_blank)
                .map(str::to_string),
            web_links: split_links(row.web_links.as_deref().unwrap_or("")),
            classification,
            metrics_range: m_start..(metrics.len() as u32),
        });
    }

    report.imported = institutions.len();
    report.classifications = classifications.len();
    report.metrics = metrics.len();

    (
        InstitutionDb::new(institutions, classifications, metrics),
        report,
    )
}

/// A classification exists when any of its three cells is filled in.
fn build_classification(
    row: &InstitutionRaw,
    idx: u32,
    report: &mut ImportReport,
) -> Option<Classification> {
    let size = row.size.as_deref().and_then(non_blank);
    let focus = row.focus.as_deref().and_then(non_blank);
    let research = row.research.as_deref().and_then(non_blank);

    if size.is_none() && focus.is_none() && research.is_none() {
        return None;
    }

    Some(Classification {
        institution: idx,
        size: parse_label::<Size>(size, &row.name, report),
        focus: parse_label::<Focus>(focus, &row.name, report),
        research: parse_label::<Research>(research, &row.name, report),
    })
}

fn parse_label<T>(cell: Option<&str>, name: &str, report: &mut ImportReport) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let cell = cell?;
    match cell.parse::<T>() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(name, "{e}; storing as absent");
            report.unknown_labels += 1;
            None
        }
    }
}

fn split_links(s: &str) -> Vec<String> {
    s.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::UNRANKED;

    fn row(id: Option<&str>, name: &str, rank: &str) -> InstitutionRaw {
        InstitutionRaw {
            id: id.map(str::to_string),
            name: name.to_string(),
            country: "Nowhere".to_string(),
            rank: Some(rank.to_string()),
            ..InstitutionRaw::default()
        }
    }

    #[test]
    fn assigns_positional_ids_when_missing() {
        let (db, report) = from_raw(vec![row(None, "A", "1"), row(None, "B", "2")]);
        assert_eq!(report.imported, 2);
        let ids: Vec<_> = db.institutions().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn skips_blank_and_duplicate_rows() {
        let (db, report) = from_raw(vec![
            row(Some("a"), "Alpha", "1"),
            row(Some("b"), "  ", "2"),
            row(Some("c"), "Alpha", "3"),
            row(Some("a"), "Beta", "4"),
            row(Some("d"), "Gamma", "5"),
        ]);
        assert_eq!(report.skipped_blank_name, 1);
        assert_eq!(report.skipped_duplicate, 2);
        assert_eq!(db.len(), 2);
        assert!(db.find_by_id("d").is_some());
    }

    #[test]
    fn metric_needs_both_cells() {
        let mut r = row(Some("x"), "X", "1");
        r.set_metric(MetricKind::AcademicReputation, "99.1", "4");
        r.employer_reputation_score = Some("50".into());
        r.sustainability_rank = Some("  ".into());
        r.sustainability_score = Some("10".into());

        let (db, report) = from_raw(vec![r]);
        assert_eq!(report.metrics, 1);
        let rec = db.find_by_id("x").unwrap();
        assert_eq!(rec.metric(MetricKind::AcademicReputation).unwrap().score, "99.1");
        assert!(rec.metric(MetricKind::EmployerReputation).is_none());
        assert!(rec.metric(MetricKind::Sustainability).is_none());
    }

    #[test]
    fn classification_labels_are_parsed_or_dropped() {
        let mut r = row(Some("x"), "X", "na");
        r.size = Some("large".into());
        r.research = Some("Astronomical".into());
        let (db, report) = from_raw(vec![r, row(Some("y"), "Y", "3")]);

        assert_eq!(report.classifications, 1);
        assert_eq!(report.unknown_labels, 1);
        let x = db.find_by_id("x").unwrap();
        let c = x.classification.unwrap();
        assert_eq!(c.size, Some(Size::Large));
        assert_eq!(c.research, None);
        assert_eq!(x.institution.rank.key(), UNRANKED);
        assert!(db.find_by_id("y").unwrap().classification.is_none());
    }

    #[test]
    fn web_links_are_split() {
        let mut r = row(Some("x"), "X", "1");
        r.web_links = Some("https://a.edu, https://b.edu;https://c.edu\nhttps://d.edu".into());
        let (db, _) = from_raw(vec![r]);
        assert_eq!(db.find_by_id("x").unwrap().institution.web_links.len(), 4);
    }
}
