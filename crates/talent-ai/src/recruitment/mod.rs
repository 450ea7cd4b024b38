//! Applicant ranking for job postings, internship tracks, and ad-hoc SAW analyses.
//!
//! Each call site maps its records onto the shared [`crate::ranking`] engine through
//! [`RankableApplicant`], then persists score and rank and appends an audit entry.

pub mod adapters;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use adapters::RankableApplicant;
pub use domain::{
    ApplicantId, AuditEntry, GroupKey, GroupKind, InternshipApplication, InternshipTrackId,
    JobApplication, JobPostingId, RankingRequest, SawAlternative, INTERNSHIP_CRITERIA,
    JOB_CRITERIA,
};
pub use repository::{
    ApplicantRepository, AuditError, AuditLog, RankingView, RepositoryError,
};
pub use router::{ranking_router, AdhocRankingRequest, RankingRouterState};
pub use service::{
    AdhocRankingReport, ApplicantRankingService, RankingReport, RankingServiceError,
};
