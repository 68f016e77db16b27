use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Job listing published to the applicant board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub posted_at: DateTime<Utc>,
    pub active: bool,
}

/// Partner organization hiring bootcamp graduates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    pub active: bool,
}

/// Company profile referenced by job listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    /// Opaque storage key for the uploaded logo; blob storage lives elsewhere.
    #[serde(default)]
    pub logo_key: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Creation/update payloads. Ids and timestamps are assigned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartnerDraft {
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyDraft {
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo_key: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_active() -> bool {
    true
}
