// crates/instdir-core/src/api.rs

//! Serializable views: the sparse list shape and the fully joined detail
//! shape. Missing satellites are always emitted as `null`.

use crate::model::{
    Classification, Focus, Institution, InstitutionRecord, Metric, MetricKind, Research, Size,
};
use serde::{Deserialize, Serialize};

/// List shape. Carries the raw rank string, never the normalized key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionSummary {
    pub id: String,
    pub rank: Option<String>,
    pub name: String,
    pub country: String,
    pub overall_score: Option<String>,
}

impl From<&Institution> for InstitutionSummary {
    fn from(inst: &Institution) -> Self {
        Self {
            id: inst.id.clone(),
            rank: inst.rank.raw().map(str::to_string),
            name: inst.name.clone(),
            country: inst.country.clone(),
            overall_score: inst.overall_score.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationView {
    pub size: Option<Size>,
    pub focus: Option<Focus>,
    pub research: Option<Research>,
}

impl From<&Classification> for ClassificationView {
    fn from(c: &Classification) -> Self {
        Self {
            size: c.size,
            focus: c.focus,
            research: c.research,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricView {
    pub score: String,
    pub rank: String,
}

impl From<&Metric> for MetricView {
    fn from(m: &Metric) -> Self {
        Self {
            score: m.score.clone(),
            rank: m.rank.clone(),
        }
    }
}

/// Detail shape: the list fields plus every satellite.
///
/// Each metric is a named field so its key is present even when the
/// record is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionDetail {
    #[serde(flatten)]
    pub summary: InstitutionSummary,
    pub web_links: Vec<String>,
    pub classification: Option<ClassificationView>,
    pub academic_reputation: Option<MetricView>,
    pub employer_reputation: Option<MetricView>,
    pub faculty_student: Option<MetricView>,
    pub citations_per_faculty: Option<MetricView>,
    pub international_faculty: Option<MetricView>,
    pub international_students: Option<MetricView>,
    pub international_research_network: Option<MetricView>,
    pub employment_outcomes: Option<MetricView>,
    pub sustainability: Option<MetricView>,
}

impl InstitutionDetail {
    pub fn metric(&self, kind: MetricKind) -> Option<&MetricView> {
        match kind {
            MetricKind::AcademicReputation => self.academic_reputation.as_ref(),
            MetricKind::EmployerReputation => self.employer_reputation.as_ref(),
            MetricKind::FacultyStudent => self.faculty_student.as_ref(),
            MetricKind::CitationsPerFaculty => self.citations_per_faculty.as_ref(),
            MetricKind::InternationalFaculty => self.international_faculty.as_ref(),
            MetricKind::InternationalStudents => self.international_students.as_ref(),
            MetricKind::InternationalResearchNetwork => {
                self.international_research_network.as_ref()
            }
            MetricKind::EmploymentOutcomes => self.employment_outcomes.as_ref(),
            MetricKind::Sustainability => self.sustainability.as_ref(),
        }
    }
}

impl From<InstitutionRecord<'_>> for InstitutionDetail {
    fn from(rec: InstitutionRecord<'_>) -> Self {
        let m = |kind| rec.metric(kind).map(MetricView::from);
        Self {
            summary: InstitutionSummary::from(rec.institution),
            web_links: rec.institution.web_links.clone(),
            classification: rec.classification.map(ClassificationView::from),
            academic_reputation: m(MetricKind::AcademicReputation),
            employer_reputation: m(MetricKind::EmployerReputation),
            faculty_student: m(MetricKind::FacultyStudent),
            citations_per_faculty: m(MetricKind::CitationsPerFaculty),
            international_faculty: m(MetricKind::InternationalFaculty),
            international_students: m(MetricKind::InternationalStudents),
            international_research_network: m(MetricKind::InternationalResearchNetwork),
            employment_outcomes: m(MetricKind::EmploymentOutcomes),
            sustainability: m(MetricKind::Sustainability),
        }
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::model::convert::from_raw;
    use crate::raw::InstitutionRaw;

    #[test]
    fn list_shape_keeps_the_raw_rank() {
        let (db, _) = from_raw(vec![InstitutionRaw {
            id: Some("1".into()),
            name: "A".into(),
            country: "B".into(),
            rank: Some("601+".into()),
            overall_score: Some("45.2".into()),
            ..InstitutionRaw::default()
        }]);
        let json = serde_json::to_value(InstitutionSummary::from(&db.institutions()[0])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1", "rank": "601+", "name": "A", "country": "B", "overall_score": "45.2"
            })
        );
    }

    #[test]
    fn detail_shape_has_null_for_missing_satellites() {
        let mut row = InstitutionRaw {
            id: Some("9".into()),
            name: "A".into(),
            country: "B".into(),
            web_links: Some("https://a.example".into()),
            ..InstitutionRaw::default()
        };
        row.set_metric(MetricKind::AcademicReputation, "99.8", "3");
        let (db, _) = from_raw(vec![row]);

        let detail = InstitutionDetail::from(db.find_by_id("9").unwrap());
        let json = serde_json::to_value(&detail).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj["rank"], serde_json::Value::Null);
        assert_eq!(obj["classification"], serde_json::Value::Null);
        assert_eq!(obj["employment_outcomes"], serde_json::Value::Null);
        assert_eq!(obj["academic_reputation"]["score"], "99.8");
        assert_eq!(obj["web_links"][0], "https://a.example");
        for kind in MetricKind::ALL {
            assert!(obj.contains_key(kind.field_name()), "{}", kind.field_name());
        }
    }
}
