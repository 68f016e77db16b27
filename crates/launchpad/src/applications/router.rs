use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Router,
};
use serde::{Deserialize, Deserializer};
use serde_json::json;
use tracing::warn;

use crate::board::domain::{ApplicationId, ApplicationStatus};

use super::repository::{ApplicationRepository, JobDirectory, RepositoryError};
use super::service::{
    ApplicationChange, ApplicationService, ApplicationServiceError, NewApplication,
};

/// Router builder exposing the applications REST surface.
pub fn application_router<R, J>(service: Arc<ApplicationService<R, J>>) -> Router
where
    R: ApplicationRepository + 'static,
    J: JobDirectory + 'static,
{
    Router::new()
        .route(
            "/api/applications",
            get(list_handler::<R, J>)
                .post(create_handler::<R, J>)
                .put(update_handler::<R, J>),
        )
        .route(
            "/api/applications/:application_id/notes",
            put(notes_handler::<R, J>),
        )
        .route(
            "/api/applications/job/:job_id",
            delete(delete_job_handler::<R, J>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(rename = "userId")]
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct UpdateQuery {
    #[serde(rename = "applicationId")]
    application_id: String,
}

#[derive(Debug, Deserialize)]
struct UserQuery {
    #[serde(rename = "userId")]
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct UpdateBody {
    #[serde(default)]
    status: Option<ApplicationStatus>,
    #[serde(rename = "subStage", default, deserialize_with = "field_or_null")]
    sub_stage: Option<Option<String>>,
    #[serde(default)]
    archived: Option<bool>,
}

/// Distinguish an absent field from an explicit `null`: absent leaves the
/// stored value alone, `null` clears it.
fn field_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
struct CreateBody {
    user_id: String,
    job_id: String,
    status: ApplicationStatus,
    #[serde(default)]
    resume_id: Option<String>,
    #[serde(default)]
    position: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NotesRequest {
    notes: String,
    #[serde(rename = "userId")]
    user_id: String,
}

pub(crate) async fn list_handler<R, J>(
    State(service): State<Arc<ApplicationService<R, J>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: JobDirectory + 'static,
{
    match service.list(&query.user_id) {
        Ok(applications) => (
            StatusCode::OK,
            axum::Json(json!({ "success": true, "applications": applications })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<R, J>(
    State(service): State<Arc<ApplicationService<R, J>>>,
    axum::Json(body): axum::Json<CreateBody>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: JobDirectory + 'static,
{
    let new_application = NewApplication {
        user_id: body.user_id,
        job_id: body.job_id,
        status: body.status,
        resume_id: body.resume_id,
        position: body.position,
    };

    match service.create(new_application) {
        Ok(record) => {
            let view = service.view_of(&record);
            (
                StatusCode::CREATED,
                axum::Json(json!({ "success": true, "application": view })),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<R, J>(
    State(service): State<Arc<ApplicationService<R, J>>>,
    Query(query): Query<UpdateQuery>,
    axum::Json(body): axum::Json<UpdateBody>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: JobDirectory + 'static,
{
    let change = ApplicationChange {
        status: body.status,
        sub_stage: body.sub_stage,
        archived: body.archived,
    };
    let id = ApplicationId(query.application_id);

    match service.apply_change(&id, change) {
        Ok(_) => (StatusCode::OK, axum::Json(json!({ "success": true }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn notes_handler<R, J>(
    State(service): State<Arc<ApplicationService<R, J>>>,
    Path(application_id): Path<String>,
    axum::Json(body): axum::Json<NotesRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: JobDirectory + 'static,
{
    let id = ApplicationId(application_id);
    match service.update_notes(&id, &body.user_id, &body.notes) {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "success": true }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_job_handler<R, J>(
    State(service): State<Arc<ApplicationService<R, J>>>,
    Path(job_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    J: JobDirectory + 'static,
{
    match service.delete_for_job(&job_id, &query.user_id) {
        Ok(_) => (StatusCode::OK, axum::Json(json!({ "success": true }))).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ApplicationServiceError) -> Response {
    let status = match &err {
        ApplicationServiceError::AlreadyApplied { .. } => StatusCode::CONFLICT,
        ApplicationServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ApplicationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ApplicationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        warn!(error = %err, "application request failed");
    }

    (status, axum::Json(json!({ "error": err.to_string() }))).into_response()
}
