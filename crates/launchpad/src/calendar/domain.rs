use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewKind {
    Phone,
    Technical,
    Onsite,
    Final,
}

impl InterviewKind {
    pub const fn label(self) -> &'static str {
        match self {
            InterviewKind::Phone => "Phone",
            InterviewKind::Technical => "Technical",
            InterviewKind::Onsite => "Onsite",
            InterviewKind::Final => "Final",
        }
    }
}

/// A scheduled interview, optionally linked to a tracked application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: String,
    #[serde(default)]
    pub application_id: Option<String>,
    pub user_id: String,
    pub company: String,
    pub scheduled_at: DateTime<Utc>,
    pub kind: InterviewKind,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// Creation/update payload; the id is assigned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct InterviewDraft {
    #[serde(default)]
    pub application_id: Option<String>,
    pub user_id: String,
    pub company: String,
    pub scheduled_at: DateTime<Utc>,
    pub kind: InterviewKind,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: String,
}
