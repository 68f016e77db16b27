use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::{CompanyDraft, JobDraft, PartnerDraft};
use super::repository::{CatalogError, CompanyStore, JobStore, PartnerStore};
use super::service::{CatalogService, JobFilter};

/// Router builder for the admin catalog surface.
pub fn catalog_router<J, P, C>(service: Arc<CatalogService<J, P, C>>) -> Router
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    Router::new()
        .route(
            "/api/jobs",
            get(list_jobs::<J, P, C>).post(create_job::<J, P, C>),
        )
        .route(
            "/api/jobs/:id",
            get(get_job::<J, P, C>)
                .put(update_job::<J, P, C>)
                .delete(delete_job::<J, P, C>),
        )
        .route(
            "/api/partners",
            get(list_partners::<J, P, C>).post(create_partner::<J, P, C>),
        )
        .route(
            "/api/partners/:id",
            get(get_partner::<J, P, C>)
                .put(update_partner::<J, P, C>)
                .delete(delete_partner::<J, P, C>),
        )
        .route(
            "/api/companies",
            get(list_companies::<J, P, C>).post(create_company::<J, P, C>),
        )
        .route(
            "/api/companies/:id",
            get(get_company::<J, P, C>)
                .put(update_company::<J, P, C>)
                .delete(delete_company::<J, P, C>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct JobListQuery {
    #[serde(default)]
    tag: Option<String>,
    #[serde(rename = "includeInactive", default)]
    include_inactive: bool,
}

async fn list_jobs<J, P, C>(
    State(service): State<Arc<CatalogService<J, P, C>>>,
    Query(query): Query<JobListQuery>,
) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    let filter = JobFilter {
        tag: query.tag,
        include_inactive: query.include_inactive,
    };
    match service.list_jobs(&filter) {
        Ok(jobs) => ok_body(json!({ "success": true, "jobs": jobs })),
        Err(err) => error_response(err),
    }
}

async fn create_job<J, P, C>(
    State(service): State<Arc<CatalogService<J, P, C>>>,
    axum::Json(draft): axum::Json<JobDraft>,
) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    match service.create_job(draft) {
        Ok(job) => (
            StatusCode::CREATED,
            axum::Json(json!({ "success": true, "job": job })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_job<J, P, C>(
    State(service): State<Arc<CatalogService<J, P, C>>>,
    Path(id): Path<String>,
) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    match service.get_job(&id) {
        Ok(job) => ok_body(json!({ "success": true, "job": job })),
        Err(err) => error_response(err),
    }
}

async fn update_job<J, P, C>(
    State(service): State<Arc<CatalogService<J, P, C>>>,
    Path(id): Path<String>,
    axum::Json(draft): axum::Json<JobDraft>,
) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    match service.update_job(&id, draft) {
        Ok(job) => ok_body(json!({ "success": true, "job": job })),
        Err(err) => error_response(err),
    }
}

async fn delete_job<J, P, C>(
    State(service): State<Arc<CatalogService<J, P, C>>>,
    Path(id): Path<String>,
) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    match service.delete_job(&id) {
        Ok(()) => ok_body(json!({ "success": true })),
        Err(err) => error_response(err),
    }
}

async fn list_partners<J, P, C>(State(service): State<Arc<CatalogService<J, P, C>>>) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    match service.list_partners() {
        Ok(partners) => ok_body(json!({ "success": true, "partners": partners })),
        Err(err) => error_response(err),
    }
}

async fn create_partner<J, P, C>(
    State(service): State<Arc<CatalogService<J, P, C>>>,
    axum::Json(draft): axum::Json<PartnerDraft>,
) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    match service.create_partner(draft) {
        Ok(partner) => (
            StatusCode::CREATED,
            axum::Json(json!({ "success": true, "partner": partner })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_partner<J, P, C>(
    State(service): State<Arc<CatalogService<J, P, C>>>,
    Path(id): Path<String>,
) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    match service.get_partner(&id) {
        Ok(partner) => ok_body(json!({ "success": true, "partner": partner })),
        Err(err) => error_response(err),
    }
}

async fn update_partner<J, P, C>(
    State(service): State<Arc<CatalogService<J, P, C>>>,
    Path(id): Path<String>,
    axum::Json(draft): axum::Json<PartnerDraft>,
) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    match service.update_partner(&id, draft) {
        Ok(partner) => ok_body(json!({ "success": true, "partner": partner })),
        Err(err) => error_response(err),
    }
}

async fn delete_partner<J, P, C>(
    State(service): State<Arc<CatalogService<J, P, C>>>,
    Path(id): Path<String>,
) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    match service.delete_partner(&id) {
        Ok(()) => ok_body(json!({ "success": true })),
        Err(err) => error_response(err),
    }
}

async fn list_companies<J, P, C>(State(service): State<Arc<CatalogService<J, P, C>>>) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    match service.list_companies() {
        Ok(companies) => ok_body(json!({ "success": true, "companies": companies })),
        Err(err) => error_response(err),
    }
}

async fn create_company<J, P, C>(
    State(service): State<Arc<CatalogService<J, P, C>>>,
    axum::Json(draft): axum::Json<CompanyDraft>,
) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    match service.create_company(draft) {
        Ok(company) => (
            StatusCode::CREATED,
            axum::Json(json!({ "success": true, "company": company })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_company<J, P, C>(
    State(service): State<Arc<CatalogService<J, P, C>>>,
    Path(id): Path<String>,
) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    match service.get_company(&id) {
        Ok(company) => ok_body(json!({ "success": true, "company": company })),
        Err(err) => error_response(err),
    }
}

async fn update_company<J, P, C>(
    State(service): State<Arc<CatalogService<J, P, C>>>,
    Path(id): Path<String>,
    axum::Json(draft): axum::Json<CompanyDraft>,
) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    match service.update_company(&id, draft) {
        Ok(company) => ok_body(json!({ "success": true, "company": company })),
        Err(err) => error_response(err),
    }
}

async fn delete_company<J, P, C>(
    State(service): State<Arc<CatalogService<J, P, C>>>,
    Path(id): Path<String>,
) -> Response
where
    J: JobStore + 'static,
    P: PartnerStore + 'static,
    C: CompanyStore + 'static,
{
    match service.delete_company(&id) {
        Ok(()) => ok_body(json!({ "success": true })),
        Err(err) => error_response(err),
    }
}

fn ok_body(body: serde_json::Value) -> Response {
    (StatusCode::OK, axum::Json(body)).into_response()
}

fn error_response(err: CatalogError) -> Response {
    let status = match &err {
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CatalogError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        warn!(error = %err, "catalog request failed");
    }

    (status, axum::Json(json!({ "error": err.to_string() }))).into_response()
}
