use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use talent_ai::error::AppError;
use talent_ai::recruitment::{
    ApplicantRepository, AuditEntry, AuditError, AuditLog, InternshipApplication,
    InternshipTrackId, JobApplication, JobPostingId, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Applicant records loaded at start-up so the in-memory store has something to rank.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SeedData {
    #[serde(default)]
    pub(crate) job_applications: Vec<JobApplication>,
    #[serde(default)]
    pub(crate) internship_applications: Vec<InternshipApplication>,
}

impl SeedData {
    pub(crate) fn from_path(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicantRepository {
    jobs: Arc<Mutex<Vec<JobApplication>>>,
    internships: Arc<Mutex<Vec<InternshipApplication>>>,
}

impl InMemoryApplicantRepository {
    pub(crate) fn with_seed(seed: SeedData) -> Self {
        Self {
            jobs: Arc::new(Mutex::new(seed.job_applications)),
            internships: Arc::new(Mutex::new(seed.internship_applications)),
        }
    }
}

// Replaces matching records in place; new ones are appended in submission order.
fn upsert<T, K, F>(stored: &mut Vec<T>, records: Vec<T>, key: F)
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    for record in records {
        let id = key(&record);
        match stored.iter().position(|existing| key(existing) == id) {
            Some(index) => stored[index] = record,
            None => stored.push(record),
        }
    }
}

impl ApplicantRepository for InMemoryApplicantRepository {
    fn job_applications(
        &self,
        posting: &JobPostingId,
    ) -> Result<Vec<JobApplication>, RepositoryError> {
        let guard = self.jobs.lock().expect("repository mutex poisoned");
        let records: Vec<JobApplication> = guard
            .iter()
            .filter(|record| &record.job_posting_id == posting)
            .cloned()
            .collect();
        if records.is_empty() {
            return Err(RepositoryError::NotFound(format!("job posting {}", posting.0)));
        }
        Ok(records)
    }

    fn internship_applications(
        &self,
        track: &InternshipTrackId,
    ) -> Result<Vec<InternshipApplication>, RepositoryError> {
        let guard = self.internships.lock().expect("repository mutex poisoned");
        let records: Vec<InternshipApplication> = guard
            .iter()
            .filter(|record| &record.track_id == track)
            .cloned()
            .collect();
        if records.is_empty() {
            return Err(RepositoryError::NotFound(format!(
                "internship track {}",
                track.0
            )));
        }
        Ok(records)
    }

    fn save_job_applications(&self, records: Vec<JobApplication>) -> Result<(), RepositoryError> {
        let mut guard = self.jobs.lock().expect("repository mutex poisoned");
        upsert(&mut guard, records, |record| record.id.clone());
        Ok(())
    }

    fn save_internship_applications(
        &self,
        records: Vec<InternshipApplication>,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.internships.lock().expect("repository mutex poisoned");
        upsert(&mut guard, records, |record| record.id.clone());
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditLog {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl AuditLog for InMemoryAuditLog {
    fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        let mut guard = self.entries.lock().expect("audit mutex poisoned");
        guard.push(entry);
        Ok(())
    }

    fn entries(&self, limit: usize) -> Result<Vec<AuditEntry>, AuditError> {
        let guard = self.entries.lock().expect("audit mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}
