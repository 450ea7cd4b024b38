use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::ranking::{Candidate, RankedResult, RankingEngine, RankingError};

use super::adapters::{apply_results, RankableApplicant};
use super::domain::{
    AuditEntry, GroupKey, InternshipTrackId, JobPostingId, RankingRequest, SawAlternative,
    INTERNSHIP_CRITERIA, JOB_CRITERIA,
};
use super::repository::{
    sort_views, ApplicantRepository, AuditError, AuditLog, RankingView, RepositoryError,
};

/// Service composing the ranking engine, applicant repository, and audit log.
pub struct ApplicantRankingService<R, L> {
    repository: Arc<R>,
    audit: Arc<L>,
    engine: RankingEngine,
}

static RUN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_run_id() -> String {
    let id = RUN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("run-{id:06}")
}

/// Outcome of a persisted analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingReport {
    pub run_id: String,
    pub group: GroupKey,
    pub ranked_at: DateTime<Utc>,
    pub results: Vec<RankedResult>,
}

/// Outcome of an ad-hoc analysis; alternatives come back in rank order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdhocRankingReport {
    pub run_id: String,
    pub group: GroupKey,
    pub ranked_at: DateTime<Utc>,
    pub alternatives: Vec<SawAlternative>,
    pub results: Vec<RankedResult>,
}

impl<R, L> ApplicantRankingService<R, L>
where
    R: ApplicantRepository + 'static,
    L: AuditLog + 'static,
{
    pub fn new(repository: Arc<R>, audit: Arc<L>) -> Self {
        Self {
            repository,
            audit,
            engine: RankingEngine::new(),
        }
    }

    /// Check a job-posting request without touching storage.
    pub fn validate_job_request(&self, request: &RankingRequest) -> Result<(), RankingError> {
        request.weights.validate_against(JOB_CRITERIA)
    }

    /// Check an internship request without touching storage.
    pub fn validate_internship_request(
        &self,
        request: &RankingRequest,
    ) -> Result<(), RankingError> {
        request.weights.validate_against(INTERNSHIP_CRITERIA)
    }

    /// Rank every application of a job posting and persist score and rank.
    pub fn rank_job_posting(
        &self,
        posting: &JobPostingId,
        request: &RankingRequest,
    ) -> Result<RankingReport, RankingServiceError> {
        self.validate_job_request(request)?;

        let group = GroupKey::job_posting(posting);
        let mut records = self.repository.job_applications(posting)?;
        let results = self.rank_records(&group, &records, request)?;

        apply_results(&mut records, &results);

        // The audit entry must exist before any score or rank is stored.
        let report = self.finish_run(group, request, results)?;
        self.repository.save_job_applications(records)?;

        Ok(report)
    }

    /// Rank every application of an internship track and persist score and rank.
    pub fn rank_internship_track(
        &self,
        track: &InternshipTrackId,
        request: &RankingRequest,
    ) -> Result<RankingReport, RankingServiceError> {
        self.validate_internship_request(request)?;

        let group = GroupKey::internship_track(track);
        let mut records = self.repository.internship_applications(track)?;
        let results = self.rank_records(&group, &records, request)?;

        apply_results(&mut records, &results);

        // The audit entry must exist before any score or rank is stored.
        let report = self.finish_run(group, request, results)?;
        self.repository.save_internship_applications(records)?;

        Ok(report)
    }

    /// Rank caller-supplied alternatives; nothing is persisted besides the audit entry.
    pub fn rank_adhoc(
        &self,
        label: &str,
        mut alternatives: Vec<SawAlternative>,
        request: &RankingRequest,
    ) -> Result<AdhocRankingReport, RankingServiceError> {
        let group = GroupKey::adhoc(label);
        let results = self.rank_records(&group, &alternatives, request)?;

        apply_results(&mut alternatives, &results);
        alternatives.sort_by_key(|alternative| alternative.rank.unwrap_or(u32::MAX));

        let report = self.finish_run(group, request, results)?;
        Ok(AdhocRankingReport {
            run_id: report.run_id,
            group: report.group,
            ranked_at: report.ranked_at,
            alternatives,
            results: report.results,
        })
    }

    /// Persisted rankings of a job posting, best first.
    pub fn job_rankings(
        &self,
        posting: &JobPostingId,
    ) -> Result<Vec<RankingView>, RankingServiceError> {
        let records = self.repository.job_applications(posting)?;
        let mut views: Vec<RankingView> = records.iter().map(RankingView::from).collect();
        sort_views(&mut views);
        Ok(views)
    }

    /// Persisted rankings of an internship track, best first.
    pub fn internship_rankings(
        &self,
        track: &InternshipTrackId,
    ) -> Result<Vec<RankingView>, RankingServiceError> {
        let records = self.repository.internship_applications(track)?;
        let mut views: Vec<RankingView> = records.iter().map(RankingView::from).collect();
        sort_views(&mut views);
        Ok(views)
    }

    pub fn audit_trail(&self, limit: usize) -> Result<Vec<AuditEntry>, RankingServiceError> {
        Ok(self.audit.entries(limit)?)
    }

    fn rank_records<T: RankableApplicant>(
        &self,
        group: &GroupKey,
        records: &[T],
        request: &RankingRequest,
    ) -> Result<Vec<RankedResult>, RankingError> {
        let candidates: Vec<Candidate> = records.iter().map(T::to_candidate).collect();

        info!(
            group = %group,
            candidates = candidates.len(),
            requested_by = %request.requested_by,
            "running SAW analysis"
        );

        self.engine
            .rank(&candidates, &request.weights)
            .inspect_err(|err| warn!(group = %group, kind = err.kind(), "analysis rejected: {err}"))
    }

    fn finish_run(
        &self,
        group: GroupKey,
        request: &RankingRequest,
        results: Vec<RankedResult>,
    ) -> Result<RankingReport, RankingServiceError> {
        let run_id = next_run_id();
        let ranked_at = Utc::now();

        self.audit.record(AuditEntry {
            run_id: run_id.clone(),
            group: group.clone(),
            requested_by: request.requested_by.clone(),
            candidate_count: results.len(),
            weights: request.weights.clone(),
            ran_at: ranked_at,
        })?;

        info!(%run_id, group = %group, candidates = results.len(), "SAW analysis recorded");

        Ok(RankingReport {
            run_id,
            group,
            ranked_at,
            results,
        })
    }
}

/// Error raised by the ranking service.
#[derive(Debug, thiserror::Error)]
pub enum RankingServiceError {
    #[error(transparent)]
    Ranking(#[from] RankingError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}
