//! REST tests for the interview calendar surface.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use launchpad::calendar::{
    calendar_router, CalendarError, CalendarService, Interview, InterviewStore,
};

#[derive(Default)]
struct MemoryInterviews {
    records: Mutex<HashMap<String, Interview>>,
}

impl InterviewStore for MemoryInterviews {
    fn insert(&self, interview: Interview) -> Result<Interview, CalendarError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(interview.id.clone(), interview.clone());
        Ok(interview)
    }

    fn update(&self, interview: Interview) -> Result<(), CalendarError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&interview.id) {
            guard.insert(interview.id.clone(), interview);
            Ok(())
        } else {
            Err(CalendarError::NotFound)
        }
    }

    fn fetch(&self, id: &str) -> Result<Option<Interview>, CalendarError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Interview>, CalendarError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .values()
            .filter(|interview| interview.user_id == user_id)
            .cloned()
            .collect())
    }

    fn delete(&self, id: &str) -> Result<(), CalendarError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(CalendarError::NotFound)
    }
}

fn build_router() -> axum::Router {
    let service = Arc::new(CalendarService::new(Arc::new(MemoryInterviews::default())));
    calendar_router(service)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serializable")))
        .expect("valid request")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

async fn schedule(router: &axum::Router, company: &str, at: &str) -> String {
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/interviews",
            json!({
                "user_id": "user-1",
                "company": company,
                "scheduled_at": at,
                "kind": "technical",
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    payload["interview"]["id"]
        .as_str()
        .expect("id assigned")
        .to_string()
}

#[tokio::test]
async fn listing_is_soonest_first_and_user_scoped() {
    let router = build_router();
    schedule(&router, "Initech", "2026-08-20T15:00:00Z").await;
    schedule(&router, "Acme", "2026-08-12T09:30:00Z").await;

    let other = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/interviews",
            json!({
                "user_id": "user-2",
                "company": "Umbrella",
                "scheduled_at": "2026-08-13T10:00:00Z",
                "kind": "phone",
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(other.status(), StatusCode::CREATED);

    let payload = read_json_body(
        router
            .clone()
            .oneshot(get_request("/api/interviews?userId=user-1"))
            .await
            .expect("route executes"),
    )
    .await;

    let companies: Vec<&str> = payload["interviews"]
        .as_array()
        .expect("array")
        .iter()
        .map(|interview| interview["company"].as_str().expect("company"))
        .collect();
    assert_eq!(companies, vec!["Acme", "Initech"]);
}

#[tokio::test]
async fn month_grid_buckets_interviews_per_day() {
    let router = build_router();
    schedule(&router, "Initech", "2026-08-12T15:00:00Z").await;
    schedule(&router, "Acme", "2026-08-12T09:30:00Z").await;

    let response = router
        .clone()
        .oneshot(get_request(
            "/api/interviews/calendar?userId=user-1&year=2026&month=8",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;

    let weeks = payload["calendar"]["weeks"].as_array().expect("weeks");
    assert_eq!(weeks.len(), 6, "August 2026 pads to six whole weeks");
    let day = weeks
        .iter()
        .flat_map(|week| week.as_array().expect("week").iter())
        .find(|cell| cell["date"] == json!("2026-08-12"))
        .expect("day present");

    let companies: Vec<&str> = day["interviews"]
        .as_array()
        .expect("slots")
        .iter()
        .map(|slot| slot["company"].as_str().expect("company"))
        .collect();
    assert_eq!(companies, vec!["Acme", "Initech"], "sorted by start time");
}

#[tokio::test]
async fn invalid_month_is_unprocessable() {
    let router = build_router();

    let response = router
        .clone()
        .oneshot(get_request(
            "/api/interviews/calendar?userId=user-1&year=2026&month=13",
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn reschedule_and_cancel_round_trip() {
    let router = build_router();
    let id = schedule(&router, "Initech", "2026-08-20T15:00:00Z").await;

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/interviews/{id}"),
            json!({
                "user_id": "user-1",
                "company": "Initech",
                "scheduled_at": "2026-08-21T11:00:00Z",
                "kind": "onsite",
                "location": "Denver office",
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["interview"]["kind"], json!("onsite"));
    assert_eq!(payload["interview"]["location"], json!("Denver office"));

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/interviews/{id}"))
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(
        router
            .clone()
            .oneshot(get_request("/api/interviews?userId=user-1"))
            .await
            .expect("route executes"),
    )
    .await;
    assert!(payload["interviews"].as_array().expect("array").is_empty());
}

#[tokio::test]
async fn blank_company_is_unprocessable() {
    let router = build_router();

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/interviews",
            json!({
                "user_id": "user-1",
                "company": "  ",
                "scheduled_at": "2026-08-20T15:00:00Z",
                "kind": "phone",
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
