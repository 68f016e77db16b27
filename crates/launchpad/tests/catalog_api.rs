//! REST tests for the admin catalog surface.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use launchpad::catalog::{
    catalog_router, CatalogError, CatalogService, Company, CompanyStore, Job, JobStore, Partner,
    PartnerStore,
};

macro_rules! memory_store {
    ($name:ident, $trait_name:ident, $entity:ident, $missing:literal) => {
        #[derive(Default)]
        struct $name {
            records: Mutex<HashMap<String, $entity>>,
        }

        impl $trait_name for $name {
            fn insert(&self, value: $entity) -> Result<$entity, CatalogError> {
                let mut guard = self.records.lock().expect("store mutex poisoned");
                guard.insert(value.id.clone(), value.clone());
                Ok(value)
            }

            fn update(&self, value: $entity) -> Result<(), CatalogError> {
                let mut guard = self.records.lock().expect("store mutex poisoned");
                if guard.contains_key(&value.id) {
                    guard.insert(value.id.clone(), value);
                    Ok(())
                } else {
                    Err(CatalogError::NotFound($missing))
                }
            }

            fn fetch(&self, id: &str) -> Result<Option<$entity>, CatalogError> {
                let guard = self.records.lock().expect("store mutex poisoned");
                Ok(guard.get(id).cloned())
            }

            fn list(&self) -> Result<Vec<$entity>, CatalogError> {
                let guard = self.records.lock().expect("store mutex poisoned");
                Ok(guard.values().cloned().collect())
            }

            fn delete(&self, id: &str) -> Result<(), CatalogError> {
                let mut guard = self.records.lock().expect("store mutex poisoned");
                guard
                    .remove(id)
                    .map(|_| ())
                    .ok_or(CatalogError::NotFound($missing))
            }
        }
    };
}

memory_store!(MemoryJobs, JobStore, Job, "job");
memory_store!(MemoryPartners, PartnerStore, Partner, "partner");
memory_store!(MemoryCompanies, CompanyStore, Company, "company");

fn build_router() -> axum::Router {
    let service = Arc::new(CatalogService::new(
        Arc::new(MemoryJobs::default()),
        Arc::new(MemoryPartners::default()),
        Arc::new(MemoryCompanies::default()),
    ));
    catalog_router(service)
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

async fn create_job(router: &axum::Router, title: &str, tags: Value, active: bool) -> String {
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/jobs",
            json!({ "title": title, "company": "Initech", "tags": tags, "active": active }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    payload["job"]["id"].as_str().expect("id assigned").to_string()
}

#[tokio::test]
async fn job_listing_honors_tag_and_activity_filters() {
    let router = build_router();
    create_job(&router, "Backend Engineer", json!(["rust", "backend"]), true).await;
    create_job(&router, "Frontend Engineer", json!(["react"]), true).await;
    create_job(&router, "Retired Role", json!(["rust"]), false).await;

    let response = router
        .clone()
        .oneshot(get_request("/api/jobs?tag=RUST"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let jobs = payload["jobs"].as_array().expect("array");
    assert_eq!(jobs.len(), 1, "tag match is case-insensitive, inactive hidden");
    assert_eq!(jobs[0]["title"], json!("Backend Engineer"));

    let response = router
        .clone()
        .oneshot(get_request("/api/jobs?tag=rust&includeInactive=true"))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload["jobs"].as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn job_update_preserves_identity_and_posting_date() {
    let router = build_router();
    let id = create_job(&router, "Backend Engineer", json!([]), true).await;

    let fetched = read_json_body(
        router
            .clone()
            .oneshot(get_request(&format!("/api/jobs/{id}")))
            .await
            .expect("route executes"),
    )
    .await;
    let posted_at = fetched["job"]["posted_at"].clone();

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/jobs/{id}"),
            json!({ "title": "Staff Engineer", "company": "Initech" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["job"]["id"], json!(id));
    assert_eq!(payload["job"]["title"], json!("Staff Engineer"));
    assert_eq!(payload["job"]["posted_at"], posted_at);
}

#[tokio::test]
async fn deleting_a_job_then_fetching_is_not_found() {
    let router = build_router();
    let id = create_job(&router, "Backend Engineer", json!([]), true).await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/jobs/{id}"))
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(get_request(&format!("/api/jobs/{id}")))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_names_are_unprocessable() {
    let router = build_router();

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/jobs",
            json!({ "title": "  ", "company": "Initech" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/partners", json!({ "name": "" })))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn partners_list_sorted_by_name() {
    let router = build_router();
    for name in ["Umbrella", "Acme", "Initech"] {
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/partners",
                json!({ "name": name, "industry": "software" }),
            ))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let payload = read_json_body(
        router
            .clone()
            .oneshot(get_request("/api/partners"))
            .await
            .expect("route executes"),
    )
    .await;
    let names: Vec<&str> = payload["partners"]
        .as_array()
        .expect("array")
        .iter()
        .map(|partner| partner["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["Acme", "Initech", "Umbrella"]);
}

#[tokio::test]
async fn company_crud_round_trip() {
    let router = build_router();

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/companies",
            json!({ "name": "Initech", "website": "https://initech.example" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json_body(response).await;
    let id = created["company"]["id"].as_str().expect("id").to_string();

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/companies/{id}"),
            json!({ "name": "Initech GmbH", "logo_key": "logos/initech.png" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json_body(response).await;
    assert_eq!(updated["company"]["name"], json!("Initech GmbH"));
    assert_eq!(updated["company"]["logo_key"], json!("logos/initech.png"));
}
