use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ranking::WeightVector;

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobPostingId(pub String);

/// Identifier wrapper for internship tracks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InternshipTrackId(pub String);

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub String);

/// Scope within which applicants compete; rankings never cross groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    JobPosting,
    InternshipTrack,
    Adhoc,
}

impl GroupKind {
    pub const fn label(self) -> &'static str {
        match self {
            GroupKind::JobPosting => "job_posting",
            GroupKind::InternshipTrack => "internship_track",
            GroupKind::Adhoc => "adhoc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub kind: GroupKind,
    pub id: String,
}

impl GroupKey {
    pub fn job_posting(posting: &JobPostingId) -> Self {
        Self {
            kind: GroupKind::JobPosting,
            id: posting.0.clone(),
        }
    }

    pub fn internship_track(track: &InternshipTrackId) -> Self {
        Self {
            kind: GroupKind::InternshipTrack,
            id: track.0.clone(),
        }
    }

    pub fn adhoc(label: impl Into<String>) -> Self {
        Self {
            kind: GroupKind::Adhoc,
            id: label.into(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.label(), self.id)
    }
}

/// Criteria scored for job applications.
pub const JOB_CRITERIA: [&str; 4] = ["education", "experience", "skills", "interview"];

/// Criteria scored for internship applications.
pub const INTERNSHIP_CRITERIA: [&str; 4] = ["academic", "skills", "interview", "motivation"];

/// Job application with the raw assessment values entered by recruiters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: ApplicantId,
    pub applicant_name: String,
    pub job_posting_id: JobPostingId,
    #[serde(default)]
    pub education: f64,
    #[serde(default)]
    pub experience: f64,
    #[serde(default)]
    pub skills: f64,
    #[serde(default)]
    pub interview: f64,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub rank: Option<u32>,
}

/// Internship application; tracks are ranked independently of job postings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternshipApplication {
    pub id: ApplicantId,
    pub applicant_name: String,
    pub track_id: InternshipTrackId,
    #[serde(default)]
    pub academic: f64,
    #[serde(default)]
    pub skills: f64,
    #[serde(default)]
    pub interview: f64,
    #[serde(default)]
    pub motivation: f64,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub rank: Option<u32>,
}

/// Free-form alternative for one-off SAW analyses with caller-chosen criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SawAlternative {
    pub id: ApplicantId,
    pub name: String,
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
    #[serde(default, skip_deserializing)]
    pub score: Option<f64>,
    #[serde(default, skip_deserializing)]
    pub rank: Option<u32>,
}

/// Parameters of a single analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRequest {
    pub requested_by: String,
    pub weights: WeightVector,
}

/// Record of who ran an analysis, on which group, with which weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub run_id: String,
    pub group: GroupKey,
    pub requested_by: String,
    pub candidate_count: usize,
    pub weights: WeightVector,
    pub ran_at: DateTime<Utc>,
}
