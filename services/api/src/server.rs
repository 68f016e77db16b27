use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryApplicationRepository, InMemoryCompanyStore, InMemoryInterviewStore,
    InMemoryJobStore, InMemoryPartnerStore,
};
use crate::routes::build_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use launchpad::applications::ApplicationService;
use launchpad::calendar::CalendarService;
use launchpad::catalog::CatalogService;
use launchpad::config::AppConfig;
use launchpad::error::AppError;
use launchpad::telemetry;
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

    let job_store = Arc::new(InMemoryJobStore::default());
    let application_service = Arc::new(ApplicationService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        job_store.clone(),
    ));
    let catalog_service = Arc::new(CatalogService::new(
        job_store,
        Arc::new(InMemoryPartnerStore::default()),
        Arc::new(InMemoryCompanyStore::default()),
    ));
    let calendar_service = Arc::new(CalendarService::new(Arc::new(
        InMemoryInterviewStore::default(),
    )));

    let app = build_router(application_service, catalog_service, calendar_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "career services api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
