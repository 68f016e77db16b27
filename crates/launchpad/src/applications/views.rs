//! Wire shapes for the applications REST surface.
//!
//! Field names are preserved as observed in production traffic, mixed casing
//! included (`isArchived`, `userId`, snake_case everywhere else), along with
//! the `{ success, .. }` envelope. Both the server router and the board's
//! REST gateway speak these shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::domain::{Application, ApplicationId, ApplicationStatus};

/// Nested job summary attached to each listed application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummaryView {
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationView {
    pub application_id: String,
    pub job_id: String,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub sub_stage: Option<String>,
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "isArchived")]
    pub is_archived: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<JobSummaryView>,
}

impl ApplicationView {
    pub fn from_application(application: &Application, jobs: Option<JobSummaryView>) -> Self {
        Self {
            application_id: application.id.0.clone(),
            job_id: application.job_id.clone(),
            status: application.status,
            sub_stage: application.sub_stage.clone(),
            applied_at: application.applied_at,
            tags: application.tags.clone(),
            is_archived: application.archived,
            notes: application.notes.clone(),
            jobs,
        }
    }

    /// Rebuild a domain record for a client-side store. Fields the wire does
    /// not carry fall back: the status timestamp starts at `applied_at`.
    pub fn into_application(self, user_id: &str) -> Application {
        Application {
            id: ApplicationId(self.application_id),
            job_id: self.job_id,
            user_id: user_id.to_string(),
            status: self.status,
            sub_stage: self.sub_stage,
            applied_at: self.applied_at,
            status_updated_at: self.applied_at,
            notes: self.notes,
            archived: self.is_archived,
            resume_id: None,
            position: None,
            tags: self.tags,
        }
    }
}

/// `GET /api/applications` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplicationsEnvelope {
    pub success: bool,
    pub applications: Vec<ApplicationView>,
}

/// Bare acknowledgement returned by mutating endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

/// `POST /api/applications` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedEnvelope {
    pub success: bool,
    pub application: ApplicationView,
}

/// `PUT /api/applications/:id/notes` request body.
#[derive(Debug, Serialize, Deserialize)]
pub struct NotesBody {
    pub notes: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}
