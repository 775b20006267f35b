// crates/instdir-core/src/model/mod.rs
pub mod convert;
pub mod flat;
pub mod load;

pub use flat::{Classification, Institution, InstitutionDb, Metric};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(not(feature = "compact"))]
pub const CACHE_SUFFIX: &str = "flat.bin";
#[cfg(feature = "compact")]
pub const CACHE_SUFFIX: &str = "comp.flat.bin";

/// Error returned when a label does not name a known enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown label {:?}", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

/// Enumerations whose canonical labels come from the ranking tables.
///
/// Parsing is case-insensitive and trims whitespace; serialization always
/// emits the canonical label.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(s))
                    .ok_or_else(|| UnknownLabel(s.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// Institution size band.
    Size {
        ExtraLarge => "Extra Large",
        Large => "Large",
        Medium => "Medium",
        Small => "Small",
    }
}

labelled_enum! {
    /// Breadth of faculty areas.
    Focus {
        FullComprehensive => "Full comprehensive",
        Comprehensive => "Comprehensive",
        Focused => "Focused",
        Specialist => "Specialist",
    }
}

labelled_enum! {
    /// Research intensity.
    Research {
        VeryHigh => "Very High",
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

labelled_enum! {
    /// The nine per-institution indicators, each a (score, rank) pair.
    MetricKind {
        AcademicReputation => "Academic Reputation",
        EmployerReputation => "Employer Reputation",
        FacultyStudent => "Faculty Student",
        CitationsPerFaculty => "Citations per Faculty",
        InternationalFaculty => "International Faculty",
        InternationalStudents => "International Students",
        InternationalResearchNetwork => "International Research Network",
        EmploymentOutcomes => "Employment Outcomes",
        Sustainability => "Sustainability",
    }
}

impl MetricKind {
    /// Snake-case name used for payload keys and import columns.
    pub fn field_name(self) -> &'static str {
        match self {
            MetricKind::AcademicReputation => "academic_reputation",
            MetricKind::EmployerReputation => "employer_reputation",
            MetricKind::FacultyStudent => "faculty_student",
            MetricKind::CitationsPerFaculty => "citations_per_faculty",
            MetricKind::InternationalFaculty => "international_faculty",
            MetricKind::InternationalStudents => "international_students",
            MetricKind::InternationalResearchNetwork => "international_research_network",
            MetricKind::EmploymentOutcomes => "employment_outcomes",
            MetricKind::Sustainability => "sustainability",
        }
    }
}

/// An institution with its classification preloaded.
///
/// This is what a scan yields; filtering on classification fields needs
/// nothing else.
#[derive(Debug, Clone, Copy)]
pub struct InstitutionEntry<'a> {
    pub institution: &'a Institution,
    pub classification: Option<&'a Classification>,
}

/// An institution with every satellite record joined, for detail views.
#[derive(Debug, Clone, Copy)]
pub struct InstitutionRecord<'a> {
    pub institution: &'a Institution,
    pub classification: Option<&'a Classification>,
    pub metrics: &'a [Metric],
}

impl<'a> InstitutionRecord<'a> {
    pub fn metric(&self, kind: MetricKind) -> Option<&'a Metric> {
        self.metrics.iter().find(|m| m.kind == kind)
    }
}
