use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use launchpad::applications::{
    application_router, ApplicationRepository, ApplicationService, JobDirectory,
};
use launchpad::calendar::{calendar_router, CalendarService, InterviewStore};
use launchpad::catalog::{catalog_router, CatalogService, CompanyStore, JobStore, PartnerStore};

/// Compose every module router plus the operational endpoints.
pub(crate) fn build_router<R, J, P, C, S>(
    applications: Arc<ApplicationService<R, J>>,
    catalog: Arc<CatalogService<J, P, C>>,
    calendar: Arc<CalendarService<S>>,
) -> axum::Router
where
    R: ApplicationRepository + 'static,
    J: JobStore + JobDirectory + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
    S: InterviewStore + 'static,
{
    application_router(applications)
        .merge(catalog_router(catalog))
        .merge(calendar_router(calendar))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
