// crates/instdir-core/src/raw.rs
//! Raw import rows, as exported from the ranking spreadsheet.
//!
//! One flat record per institution. Cells that look numeric in the export
//! may arrive as JSON numbers; they are read back as strings so nothing is
//! coerced.

use crate::model::MetricKind;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstitutionRaw {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rank: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,
    #[serde(default, deserialize_with = "lenient")]
    pub overall_score: Option<String>,
    #[serde(default)]
    pub web_links: Option<String>,

    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub research: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub academic_reputation_score: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub academic_reputation_rank: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub employer_reputation_score: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub employer_reputation_rank: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub faculty_student_score: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub faculty_student_rank: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub citations_per_faculty_score: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub citations_per_faculty_rank: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub international_faculty_score: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub international_faculty_rank: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub international_students_score: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub international_students_rank: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub international_research_network_score: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub international_research_network_rank: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub employment_outcomes_score: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub employment_outcomes_rank: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sustainability_score: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sustainability_rank: Option<String>,
}

impl InstitutionRaw {
    /// The (score, rank) cells for one indicator.
    pub fn metric_cells(&self, kind: MetricKind) -> (Option<&str>, Option<&str>) {
        let (score, rank) = match kind {
            MetricKind::AcademicReputation => {
                (&self.academic_reputation_score, &self.academic_reputation_rank)
            }
            MetricKind::EmployerReputation => {
                (&self.employer_reputation_score, &self.employer_reputation_rank)
            }
            MetricKind::FacultyStudent => (&self.faculty_student_score, &self.faculty_student_rank),
            MetricKind::CitationsPerFaculty => (
                &self.citations_per_faculty_score,
                &self.citations_per_faculty_rank,
            ),
            MetricKind::InternationalFaculty => (
                &self.international_faculty_score,
                &self.international_faculty_rank,
            ),
            MetricKind::InternationalStudents => (
                &self.international_students_score,
                &self.international_students_rank,
            ),
            MetricKind::InternationalResearchNetwork => (
                &self.international_research_network_score,
                &self.international_research_network_rank,
            ),
            MetricKind::EmploymentOutcomes => (
                &self.employment_outcomes_score,
                &self.employment_outcomes_rank,
            ),
            MetricKind::Sustainability => (&self.sustainability_score, &self.sustainability_rank),
        };
        (score.as_deref(), rank.as_deref())
    }

    pub fn set_metric(&mut self, kind: MetricKind, score: &str, rank: &str) {
        let (s, r) = match kind {
            MetricKind::AcademicReputation => (
                &mut self.academic_reputation_score,
                &mut self.academic_reputation_rank,
            ),
            MetricKind::EmployerReputation => (
                &mut self.employer_reputation_score,
                &mut self.employer_reputation_rank,
            ),
            MetricKind::FacultyStudent => {
                (&mut self.faculty_student_score, &mut self.faculty_student_rank)
            }
            MetricKind::CitationsPerFaculty => (
                &mut self.citations_per_faculty_score,
                &mut self.citations_per_faculty_rank,
            ),
            MetricKind::InternationalFaculty => (
                &mut self.international_faculty_score,
                &mut self.international_faculty_rank,
            ),
            MetricKind::InternationalStudents => (
                &mut self.international_students_score,
                &mut self.international_students_rank,
            ),
            MetricKind::InternationalResearchNetwork => (
                &mut self.international_research_network_score,
                &mut self.international_research_network_rank,
            ),
            MetricKind::EmploymentOutcomes => (
                &mut self.employment_outcomes_score,
                &mut self.employment_outcomes_rank,
            ),
            MetricKind::Sustainability => {
                (&mut self.sustainability_score, &mut self.sustainability_rank)
            }
        };
        *s = Some(score.to_string());
        *r = Some(rank.to_string());
    }
}

/// Accept a string, a number, a bool or null. Numbers keep the text they
/// were written with (`100.0` stays `"100.0"`).
#[cfg(feature = "json")]
fn lenient<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected a scalar cell, found {other}"))),
    }
}

#[cfg(not(feature = "json"))]
fn lenient<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(d)
}

/// Empty cells are exported as `null`.
fn null_as_empty<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient(d)?.unwrap_or_default())
}

pub type InstitutionsRaw = Vec<InstitutionRaw>;

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_are_read_as_strings() {
        let row: InstitutionRaw = serde_json::from_str(
            r#"{"id": 7, "rank": 12, "name": "X", "country": "Y", "overall_score": 88.5,
                "sustainability_score": "97.1", "sustainability_rank": null}"#,
        )
        .unwrap();
        assert_eq!(row.id.as_deref(), Some("7"));
        assert_eq!(row.rank.as_deref(), Some("12"));
        assert_eq!(row.overall_score.as_deref(), Some("88.5"));
        assert_eq!(
            row.metric_cells(MetricKind::Sustainability),
            (Some("97.1"), None)
        );
    }

    #[test]
    fn numbers_keep_their_written_form() {
        let row: InstitutionRaw = serde_json::from_str(
            r#"{"name": "X", "overall_score": 100.0, "faculty_student_score": 45.10,
                "faculty_student_rank": 7}"#,
        )
        .unwrap();
        assert_eq!(row.overall_score.as_deref(), Some("100.0"));
        assert_eq!(
            row.metric_cells(MetricKind::FacultyStudent),
            (Some("45.10"), Some("7"))
        );
    }

    #[test]
    fn null_name_and_country_read_as_empty() {
        let row: InstitutionRaw =
            serde_json::from_str(r#"{"id": "2", "name": null, "country": null}"#).unwrap();
        assert!(row.name.is_empty());
        assert!(row.country.is_empty());
    }

    #[test]
    fn nested_cells_are_rejected() {
        let res = serde_json::from_str::<InstitutionRaw>(r#"{"name": "X", "rank": [1]}"#);
        assert!(res.is_err());
    }

    #[test]
    fn missing_columns_default() {
        let row: InstitutionRaw = serde_json::from_str(r#"{"name": "Only Name"}"#).unwrap();
        assert!(row.rank.is_none());
        assert!(row.country.is_empty());
        assert!(row.web_links.is_none());
    }

    #[test]
    fn set_metric_round_trips_through_metric_cells() {
        let mut row = InstitutionRaw::default();
        for kind in MetricKind::ALL {
            row.set_metric(*kind, "1.0", "2");
            assert_eq!(row.metric_cells(*kind), (Some("1.0"), Some("2")));
        }
    }
}
