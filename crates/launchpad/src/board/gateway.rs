//! Async persistence seam between the board and the applications REST
//! surface, plus the reqwest-backed implementation used by real clients.

use std::future::Future;

use serde::{Deserialize, Serialize};

use super::domain::{Application, ApplicationId, ApplicationStatus};
use crate::applications::views::{Ack, ApplicationsEnvelope, CreatedEnvelope, NotesBody};

/// Failure taxonomy for gateway writes.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport-level failure: DNS, refused connection, broken stream.
    #[error("network failure: {0}")]
    Network(String),
    /// The server answered with an unexpected status and no usable body.
    #[error("unexpected http status {status}")]
    Http { status: u16 },
    /// The backend understood the request and refused it (business rule).
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => GatewayError::Http {
                status: status.as_u16(),
            },
            None => GatewayError::Network(err.to_string()),
        }
    }
}

/// Wire patch for `PUT /api/applications`. Absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    /// `Some(None)` serializes as an explicit null to clear the stored value.
    #[serde(rename = "subStage", skip_serializing_if = "Option::is_none")]
    pub sub_stage: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// Creation payload for `POST /api/applications`.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDraft {
    pub user_id: String,
    pub job_id: String,
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// How the board reaches persistence. One write per user action; the sync
/// layer owns rollback, so implementations only report success or failure.
pub trait ApplicationGateway: Send + Sync {
    fn fetch(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<Application>, GatewayError>> + Send;

    fn update(
        &self,
        id: &ApplicationId,
        update: &ApplicationUpdate,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    fn create(
        &self,
        draft: &ApplicationDraft,
    ) -> impl Future<Output = Result<Application, GatewayError>> + Send;

    fn update_notes(
        &self,
        id: &ApplicationId,
        user_id: &str,
        notes: &str,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    fn delete_for_job(
        &self,
        job_id: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}

/// reqwest-backed gateway speaking the wire shapes in
/// [`crate::applications::views`].
pub struct RestGateway {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl RestGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Split transport success from rejection: 4xx with a body message is a
    /// business-rule refusal, everything else non-2xx is `Http`.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status.is_client_error() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("http {}", status.as_u16()));
            return Err(GatewayError::Rejected(message));
        }

        Err(GatewayError::Http {
            status: status.as_u16(),
        })
    }
}

impl ApplicationGateway for RestGateway {
    async fn fetch(&self, user_id: &str) -> Result<Vec<Application>, GatewayError> {
        let response = self
            .client
            .get(self.url("/api/applications"))
            .query(&[("userId", user_id)])
            .send()
            .await?;
        let response = Self::check(response).await?;

        let envelope: ApplicationsEnvelope = response.json().await?;
        if !envelope.success {
            return Err(GatewayError::Rejected("listing refused".to_string()));
        }

        Ok(envelope
            .applications
            .into_iter()
            .map(|view| view.into_application(user_id))
            .collect())
    }

    async fn update(
        &self,
        id: &ApplicationId,
        update: &ApplicationUpdate,
    ) -> Result<(), GatewayError> {
        let response = self
            .client
            .put(self.url("/api/applications"))
            .query(&[("applicationId", id.0.as_str())])
            .json(update)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let ack: Ack = response.json().await?;
        if ack.success {
            Ok(())
        } else {
            Err(GatewayError::Rejected("update refused".to_string()))
        }
    }

    async fn create(&self, draft: &ApplicationDraft) -> Result<Application, GatewayError> {
        let response = self
            .client
            .post(self.url("/api/applications"))
            .json(draft)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let envelope: CreatedEnvelope = response.json().await?;
        if !envelope.success {
            return Err(GatewayError::Rejected("creation refused".to_string()));
        }

        Ok(envelope.application.into_application(&draft.user_id))
    }

    async fn update_notes(
        &self,
        id: &ApplicationId,
        user_id: &str,
        notes: &str,
    ) -> Result<(), GatewayError> {
        let body = NotesBody {
            notes: notes.to_string(),
            user_id: user_id.to_string(),
        };
        let response = self
            .client
            .put(self.url(&format!("/api/applications/{}/notes", id.0)))
            .json(&body)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let ack: Ack = response.json().await?;
        if ack.success {
            Ok(())
        } else {
            Err(GatewayError::Rejected("notes update refused".to_string()))
        }
    }

    async fn delete_for_job(&self, job_id: &str, user_id: &str) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/applications/job/{job_id}")))
            .query(&[("userId", user_id)])
            .send()
            .await?;
        let response = Self::check(response).await?;

        let ack: Ack = response.json().await?;
        if ack.success {
            Ok(())
        } else {
            Err(GatewayError::Rejected("delete refused".to_string()))
        }
    }
}
