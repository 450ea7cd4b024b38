use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::config::RankingMode;

use super::domain::{GroupKey, InternshipTrackId, JobPostingId, RankingRequest, SawAlternative};
use super::repository::{ApplicantRepository, AuditLog, RepositoryError};
use super::service::{ApplicantRankingService, RankingReport, RankingServiceError};

const DEFAULT_AUDIT_LIMIT: usize = 50;

/// Shared handler state: the service plus how persisted runs are executed.
pub struct RankingRouterState<R, L> {
    pub(crate) service: Arc<ApplicantRankingService<R, L>>,
    pub(crate) mode: RankingMode,
}

impl<R, L> Clone for RankingRouterState<R, L> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            mode: self.mode,
        }
    }
}

/// Payload of the ad-hoc SAW endpoint.
#[derive(Debug, Deserialize)]
pub struct AdhocRankingRequest {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub request: RankingRequest,
    pub alternatives: Vec<SawAlternative>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Router builder exposing ranking runs, persisted rankings, and the audit trail.
pub fn ranking_router<R, L>(service: Arc<ApplicantRankingService<R, L>>, mode: RankingMode) -> Router
where
    R: ApplicantRepository + 'static,
    L: AuditLog + 'static,
{
    Router::new()
        .route(
            "/api/v1/rankings/job-postings/:posting_id",
            post(rank_job_posting_handler::<R, L>).get(job_rankings_handler::<R, L>),
        )
        .route(
            "/api/v1/rankings/internships/:track_id",
            post(rank_internship_handler::<R, L>).get(internship_rankings_handler::<R, L>),
        )
        .route("/api/v1/rankings/adhoc", post(adhoc_handler::<R, L>))
        .route("/api/v1/rankings/audit", get(audit_handler::<R, L>))
        .with_state(RankingRouterState { service, mode })
}

pub(crate) async fn rank_job_posting_handler<R, L>(
    State(state): State<RankingRouterState<R, L>>,
    Path(posting_id): Path<String>,
    axum::Json(request): axum::Json<RankingRequest>,
) -> Response
where
    R: ApplicantRepository + 'static,
    L: AuditLog + 'static,
{
    if let Err(err) = state.service.validate_job_request(&request) {
        return error_response(err.into());
    }

    let posting = JobPostingId(posting_id);
    let group = GroupKey::job_posting(&posting);
    dispatch(&state, group, move |service| {
        service.rank_job_posting(&posting, &request)
    })
    .await
}

pub(crate) async fn rank_internship_handler<R, L>(
    State(state): State<RankingRouterState<R, L>>,
    Path(track_id): Path<String>,
    axum::Json(request): axum::Json<RankingRequest>,
) -> Response
where
    R: ApplicantRepository + 'static,
    L: AuditLog + 'static,
{
    if let Err(err) = state.service.validate_internship_request(&request) {
        return error_response(err.into());
    }

    let track = InternshipTrackId(track_id);
    let group = GroupKey::internship_track(&track);
    dispatch(&state, group, move |service| {
        service.rank_internship_track(&track, &request)
    })
    .await
}

pub(crate) async fn job_rankings_handler<R, L>(
    State(state): State<RankingRouterState<R, L>>,
    Path(posting_id): Path<String>,
) -> Response
where
    R: ApplicantRepository + 'static,
    L: AuditLog + 'static,
{
    match state.service.job_rankings(&JobPostingId(posting_id)) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn internship_rankings_handler<R, L>(
    State(state): State<RankingRouterState<R, L>>,
    Path(track_id): Path<String>,
) -> Response
where
    R: ApplicantRepository + 'static,
    L: AuditLog + 'static,
{
    match state
        .service
        .internship_rankings(&InternshipTrackId(track_id))
    {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn adhoc_handler<R, L>(
    State(state): State<RankingRouterState<R, L>>,
    axum::Json(payload): axum::Json<AdhocRankingRequest>,
) -> Response
where
    R: ApplicantRepository + 'static,
    L: AuditLog + 'static,
{
    let AdhocRankingRequest {
        label,
        request,
        alternatives,
    } = payload;
    let label = label.unwrap_or_else(|| "saw".to_string());

    match state.service.rank_adhoc(&label, alternatives, &request) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn audit_handler<R, L>(
    State(state): State<RankingRouterState<R, L>>,
    Query(query): Query<AuditQuery>,
) -> Response
where
    R: ApplicantRepository + 'static,
    L: AuditLog + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
    match state.service.audit_trail(limit) {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn dispatch<R, L, F>(state: &RankingRouterState<R, L>, group: GroupKey, run: F) -> Response
where
    R: ApplicantRepository + 'static,
    L: AuditLog + 'static,
    F: FnOnce(&ApplicantRankingService<R, L>) -> Result<RankingReport, RankingServiceError>
        + Send
        + 'static,
{
    match state.mode {
        RankingMode::Inline => match run(state.service.as_ref()) {
            Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
            Err(err) => error_response(err),
        },
        RankingMode::Background => {
            let service = state.service.clone();
            let task_group = group.clone();
            tokio::task::spawn_blocking(move || match run(service.as_ref()) {
                Ok(report) => info!(
                    run_id = %report.run_id,
                    group = %task_group,
                    "background SAW analysis finished"
                ),
                Err(err) => error!(group = %task_group, "background SAW analysis failed: {err}"),
            });

            let payload = json!({
                "status": "queued",
                "group": group.to_string(),
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
    }
}

fn error_response(err: RankingServiceError) -> Response {
    match err {
        RankingServiceError::Ranking(error) => {
            let payload = json!({
                "error": error.to_string(),
                "kind": error.kind(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        RankingServiceError::Repository(RepositoryError::NotFound(group)) => {
            let payload = json!({
                "error": format!("no applicants found for {group}"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
