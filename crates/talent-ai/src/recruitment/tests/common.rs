use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::RankingMode;
use crate::ranking::WeightVector;
use crate::recruitment::domain::{
    ApplicantId, AuditEntry, InternshipApplication, InternshipTrackId, JobApplication,
    JobPostingId, RankingRequest,
};
use crate::recruitment::repository::{
    ApplicantRepository, AuditError, AuditLog, RepositoryError,
};
use crate::recruitment::{ranking_router, ApplicantRankingService};

pub(super) fn job_application(
    id: &str,
    posting: &str,
    education: f64,
    experience: f64,
    skills: f64,
    interview: f64,
) -> JobApplication {
    JobApplication {
        id: ApplicantId(id.to_string()),
        applicant_name: format!("Applicant {id}"),
        job_posting_id: JobPostingId(posting.to_string()),
        education,
        experience,
        skills,
        interview,
        score: None,
        rank: None,
    }
}

pub(super) fn internship_application(
    id: &str,
    track: &str,
    academic: f64,
    skills: f64,
    interview: f64,
    motivation: f64,
) -> InternshipApplication {
    InternshipApplication {
        id: ApplicantId(id.to_string()),
        applicant_name: format!("Intern {id}"),
        track_id: InternshipTrackId(track.to_string()),
        academic,
        skills,
        interview,
        motivation,
        score: None,
        rank: None,
    }
}

pub(super) fn job_weights() -> WeightVector {
    WeightVector::new()
        .with("education", 0.25)
        .with("experience", 0.35)
        .with("skills", 0.25)
        .with("interview", 0.15)
}

pub(super) fn internship_weights() -> WeightVector {
    WeightVector::new()
        .with("academic", 0.3)
        .with("skills", 0.3)
        .with("interview", 0.2)
        .with("motivation", 0.2)
}

pub(super) fn job_request() -> RankingRequest {
    RankingRequest {
        requested_by: "hr-admin".to_string(),
        weights: job_weights(),
    }
}

pub(super) fn internship_request() -> RankingRequest {
    RankingRequest {
        requested_by: "campus-lead".to_string(),
        weights: internship_weights(),
    }
}

pub(super) fn seeded_repository() -> MemoryRepository {
    let repository = MemoryRepository::default();
    repository
        .save_job_applications(vec![
            job_application("j-1", "backend", 3.0, 2.0, 80.0, 70.0),
            job_application("j-2", "backend", 4.0, 5.0, 90.0, 85.0),
            job_application("j-3", "backend", 2.0, 1.0, 60.0, 90.0),
            job_application("j-9", "frontend", 4.0, 8.0, 95.0, 95.0),
        ])
        .expect("seed job applications");
    repository
        .save_internship_applications(vec![
            internship_application("i-1", "summer", 3.6, 70.0, 80.0, 90.0),
            internship_application("i-2", "summer", 3.9, 85.0, 75.0, 60.0),
        ])
        .expect("seed internship applications");
    repository
}

pub(super) fn build_service() -> (
    ApplicantRankingService<MemoryRepository, MemoryAuditLog>,
    Arc<MemoryRepository>,
    Arc<MemoryAuditLog>,
) {
    let repository = Arc::new(seeded_repository());
    let audit = Arc::new(MemoryAuditLog::default());
    let service = ApplicantRankingService::new(repository.clone(), audit.clone());
    (service, repository, audit)
}

pub(super) fn router_with_service(
    service: ApplicantRankingService<MemoryRepository, MemoryAuditLog>,
    mode: RankingMode,
) -> axum::Router {
    ranking_router(Arc::new(service), mode)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    jobs: Arc<Mutex<HashMap<ApplicantId, JobApplication>>>,
    internships: Arc<Mutex<HashMap<ApplicantId, InternshipApplication>>>,
}

impl MemoryRepository {
    pub(super) fn job(&self, id: &str) -> Option<JobApplication> {
        self.jobs
            .lock()
            .expect("repository mutex poisoned")
            .get(&ApplicantId(id.to_string()))
            .cloned()
    }
}

impl ApplicantRepository for MemoryRepository {
    fn job_applications(
        &self,
        posting: &JobPostingId,
    ) -> Result<Vec<JobApplication>, RepositoryError> {
        let guard = self.jobs.lock().expect("repository mutex poisoned");
        let mut records: Vec<JobApplication> = guard
            .values()
            .filter(|record| &record.job_posting_id == posting)
            .cloned()
            .collect();
        if records.is_empty() {
            return Err(RepositoryError::NotFound(format!("job posting {}", posting.0)));
        }
        records.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(records)
    }

    fn internship_applications(
        &self,
        track: &InternshipTrackId,
    ) -> Result<Vec<InternshipApplication>, RepositoryError> {
        let guard = self.internships.lock().expect("repository mutex poisoned");
        let mut records: Vec<InternshipApplication> = guard
            .values()
            .filter(|record| &record.track_id == track)
            .cloned()
            .collect();
        if records.is_empty() {
            return Err(RepositoryError::NotFound(format!("internship track {}", track.0)));
        }
        records.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(records)
    }

    fn save_job_applications(&self, records: Vec<JobApplication>) -> Result<(), RepositoryError> {
        let mut guard = self.jobs.lock().expect("repository mutex poisoned");
        for record in records {
            guard.insert(record.id.clone(), record);
        }
        Ok(())
    }

    fn save_internship_applications(
        &self,
        records: Vec<InternshipApplication>,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.internships.lock().expect("repository mutex poisoned");
        for record in records {
            guard.insert(record.id.clone(), record);
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAuditLog {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl MemoryAuditLog {
    pub(super) fn all(&self) -> Vec<AuditEntry> {
        self.entries.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditLog for MemoryAuditLog {
    fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        self.entries
            .lock()
            .expect("audit mutex poisoned")
            .push(entry);
        Ok(())
    }

    fn entries(&self, limit: usize) -> Result<Vec<AuditEntry>, AuditError> {
        let guard = self.entries.lock().expect("audit mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicantRepository for UnavailableRepository {
    fn job_applications(
        &self,
        _posting: &JobPostingId,
    ) -> Result<Vec<JobApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn internship_applications(
        &self,
        _track: &InternshipTrackId,
    ) -> Result<Vec<InternshipApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save_job_applications(&self, _records: Vec<JobApplication>) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save_internship_applications(
        &self,
        _records: Vec<InternshipApplication>,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct FailingAuditLog;

impl AuditLog for FailingAuditLog {
    fn record(&self, _entry: AuditEntry) -> Result<(), AuditError> {
        Err(AuditError::Unavailable("audit sink offline".to_string()))
    }

    fn entries(&self, _limit: usize) -> Result<Vec<AuditEntry>, AuditError> {
        Err(AuditError::Unavailable("audit sink offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
