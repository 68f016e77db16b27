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

use super::domain::InterviewDraft;
use super::repository::{CalendarError, InterviewStore};
use super::service::CalendarService;

/// Router builder for the interview calendar surface.
pub fn calendar_router<S>(service: Arc<CalendarService<S>>) -> Router
where
    S: InterviewStore + 'static,
{
    Router::new()
        .route(
            "/api/interviews",
            get(list_handler::<S>).post(schedule_handler::<S>),
        )
        .route(
            "/api/interviews/:id",
            axum::routing::put(reschedule_handler::<S>).delete(cancel_handler::<S>),
        )
        .route("/api/interviews/calendar", get(calendar_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct UserQuery {
    #[serde(rename = "userId")]
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct CalendarQuery {
    #[serde(rename = "userId")]
    user_id: String,
    year: i32,
    month: u32,
}

async fn list_handler<S>(
    State(service): State<Arc<CalendarService<S>>>,
    Query(query): Query<UserQuery>,
) -> Response
where
    S: InterviewStore + 'static,
{
    match service.list_for_user(&query.user_id) {
        Ok(interviews) => (
            StatusCode::OK,
            axum::Json(json!({ "success": true, "interviews": interviews })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

async fn schedule_handler<S>(
    State(service): State<Arc<CalendarService<S>>>,
    axum::Json(draft): axum::Json<InterviewDraft>,
) -> Response
where
    S: InterviewStore + 'static,
{
    match service.schedule(draft) {
        Ok(interview) => (
            StatusCode::CREATED,
            axum::Json(json!({ "success": true, "interview": interview })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

async fn reschedule_handler<S>(
    State(service): State<Arc<CalendarService<S>>>,
    Path(id): Path<String>,
    axum::Json(draft): axum::Json<InterviewDraft>,
) -> Response
where
    S: InterviewStore + 'static,
{
    match service.reschedule(&id, draft) {
        Ok(interview) => (
            StatusCode::OK,
            axum::Json(json!({ "success": true, "interview": interview })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

async fn cancel_handler<S>(
    State(service): State<Arc<CalendarService<S>>>,
    Path(id): Path<String>,
) -> Response
where
    S: InterviewStore + 'static,
{
    match service.cancel(&id) {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "success": true }))).into_response(),
        Err(err) => error_response(err),
    }
}

async fn calendar_handler<S>(
    State(service): State<Arc<CalendarService<S>>>,
    Query(query): Query<CalendarQuery>,
) -> Response
where
    S: InterviewStore + 'static,
{
    match service.month_view(&query.user_id, query.year, query.month) {
        Ok(grid) => (
            StatusCode::OK,
            axum::Json(json!({ "success": true, "calendar": grid })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: CalendarError) -> Response {
    let status = match &err {
        CalendarError::NotFound => StatusCode::NOT_FOUND,
        CalendarError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CalendarError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        warn!(error = %err, "calendar request failed");
    }

    (status, axum::Json(json!({ "error": err.to_string() }))).into_response()
}
