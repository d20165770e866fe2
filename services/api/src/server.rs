use crate::cli::ServeArgs;
use crate::infra::{seed_directory, AppState, InMemoryCareerRepository, InMemoryOrganizationDirectory};
use crate::routes::with_career_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hireflow::careers::CareerService;
use hireflow::config::AppConfig;
use hireflow::error::AppError;
use hireflow::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(config.environment, &config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(InMemoryOrganizationDirectory::default());
    seed_directory(&directory);
    let repository = Arc::new(InMemoryCareerRepository::default());
    let career_service = Arc::new(
        CareerService::new(directory, repository)
            .with_sanitize_max_depth(config.posting.sanitize_max_depth),
    );

    let app = with_career_routes(career_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "career posting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
