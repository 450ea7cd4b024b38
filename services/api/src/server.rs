use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicantRepository, InMemoryAuditLog, SeedData};
use crate::routes::with_ranking_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talent_ai::config::AppConfig;
use talent_ai::error::AppError;
use talent_ai::recruitment::ApplicantRankingService;
use talent_ai::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let seed = match args.seed.take() {
        Some(path) => {
            let seed = SeedData::from_path(&path)?;
            info!(
                path = %path.display(),
                job_applications = seed.job_applications.len(),
                internship_applications = seed.internship_applications.len(),
                "loaded applicant seed"
            );
            seed
        }
        None => SeedData::default(),
    };

    let repository = Arc::new(InMemoryApplicantRepository::with_seed(seed));
    let audit = Arc::new(InMemoryAuditLog::default());
    let ranking_service = Arc::new(ApplicantRankingService::new(repository, audit));

    let app = with_ranking_routes(ranking_service, config.ranking.mode)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        ranking_mode = ?config.ranking.mode,
        %addr,
        "applicant ranking service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
