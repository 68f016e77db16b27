use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for tracked applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backend lifecycle status of an application.
///
/// Wire values are SCREAMING_SNAKE_CASE. Values this build does not know about
/// deserialize to [`ApplicationStatus::Unknown`] so a newer backend cannot
/// break the board; unknown statuses render on the interested column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Interested,
    Applied,
    PhoneScreening,
    InterviewStage,
    FinalInterviewStage,
    OfferExtended,
    Negotiation,
    OfferAccepted,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Interested => "INTERESTED",
            ApplicationStatus::Applied => "APPLIED",
            ApplicationStatus::PhoneScreening => "PHONE_SCREENING",
            ApplicationStatus::InterviewStage => "INTERVIEW_STAGE",
            ApplicationStatus::FinalInterviewStage => "FINAL_INTERVIEW_STAGE",
            ApplicationStatus::OfferExtended => "OFFER_EXTENDED",
            ApplicationStatus::Negotiation => "NEGOTIATION",
            ApplicationStatus::OfferAccepted => "OFFER_ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Unknown => "UNKNOWN",
        }
    }

    /// Every status the backend currently emits, in pipeline order.
    pub const KNOWN: [ApplicationStatus; 9] = [
        ApplicationStatus::Interested,
        ApplicationStatus::Applied,
        ApplicationStatus::PhoneScreening,
        ApplicationStatus::InterviewStage,
        ApplicationStatus::FinalInterviewStage,
        ApplicationStatus::OfferExtended,
        ApplicationStatus::Negotiation,
        ApplicationStatus::OfferAccepted,
        ApplicationStatus::Rejected,
    ];
}

/// Visual bucket of the Kanban board. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardColumn {
    Interested,
    Applied,
    Interview,
    Offer,
    Referrals,
    Accepted,
    Rejected,
}

impl BoardColumn {
    /// Board columns in display order.
    pub const ALL: [BoardColumn; 7] = [
        BoardColumn::Interested,
        BoardColumn::Applied,
        BoardColumn::Interview,
        BoardColumn::Offer,
        BoardColumn::Referrals,
        BoardColumn::Accepted,
        BoardColumn::Rejected,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            BoardColumn::Interested => "interested",
            BoardColumn::Applied => "applied",
            BoardColumn::Interview => "interview",
            BoardColumn::Offer => "offer",
            BoardColumn::Referrals => "referrals",
            BoardColumn::Accepted => "accepted",
            BoardColumn::Rejected => "rejected",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            BoardColumn::Interested => "Interested",
            BoardColumn::Applied => "Applied",
            BoardColumn::Interview => "Interview",
            BoardColumn::Offer => "Offer",
            BoardColumn::Referrals => "Referrals",
            BoardColumn::Accepted => "Accepted",
            BoardColumn::Rejected => "Rejected",
        }
    }
}

/// A user's relationship to one job posting, tracked through the status
/// lifecycle. Archived records stay on file and only leave the active board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: String,
    pub user_id: String,
    pub status: ApplicationStatus,
    pub sub_stage: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub status_updated_at: DateTime<Utc>,
    pub notes: String,
    pub archived: bool,
    pub resume_id: Option<String>,
    pub position: Option<String>,
    pub tags: Vec<String>,
}

impl Application {
    /// The column this record renders in.
    pub fn column(&self) -> BoardColumn {
        super::mapper::column_for(self.status, self.sub_stage.as_deref())
    }
}
