use serde::Serialize;

use super::domain::{
    ApplicantId, AuditEntry, InternshipApplication, InternshipTrackId, JobApplication,
    JobPostingId,
};

/// Storage abstraction for applicant records and their persisted score/rank.
pub trait ApplicantRepository: Send + Sync {
    fn job_applications(
        &self,
        posting: &JobPostingId,
    ) -> Result<Vec<JobApplication>, RepositoryError>;
    fn internship_applications(
        &self,
        track: &InternshipTrackId,
    ) -> Result<Vec<InternshipApplication>, RepositoryError>;
    fn save_job_applications(&self, records: Vec<JobApplication>) -> Result<(), RepositoryError>;
    fn save_internship_applications(
        &self,
        records: Vec<InternshipApplication>,
    ) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("no applicants found for {0}")]
    NotFound(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Append-only trail of analysis runs.
pub trait AuditLog: Send + Sync {
    fn record(&self, entry: AuditEntry) -> Result<(), AuditError>;
    fn entries(&self, limit: usize) -> Result<Vec<AuditEntry>, AuditError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit log unavailable: {0}")]
    Unavailable(String),
}

/// Persisted ranking row exposed to API consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingView {
    pub applicant_id: ApplicantId,
    pub applicant_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl From<&JobApplication> for RankingView {
    fn from(record: &JobApplication) -> Self {
        Self {
            applicant_id: record.id.clone(),
            applicant_name: record.applicant_name.clone(),
            score: record.score,
            rank: record.rank,
        }
    }
}

impl From<&InternshipApplication> for RankingView {
    fn from(record: &InternshipApplication) -> Self {
        Self {
            applicant_id: record.id.clone(),
            applicant_name: record.applicant_name.clone(),
            score: record.score,
            rank: record.rank,
        }
    }
}

/// Orders views by rank, leaving unranked applicants at the end in stored order.
pub(crate) fn sort_views(views: &mut [RankingView]) {
    views.sort_by_key(|view| view.rank.unwrap_or(u32::MAX));
}
