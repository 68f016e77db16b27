//! Pure status→column mapping and the move→patch translation.
//!
//! Every function here is total: any `(status, sub_stage)` pair resolves to
//! exactly one column, with unknown statuses degrading to the interested
//! column instead of failing.

use super::domain::{ApplicationStatus, BoardColumn};

/// Sub-stage override that forces a card into the referrals column
/// regardless of its stored status.
pub const REFERRALS_SUB_STAGE: &str = "referrals";

/// Grouping bucket within the interview and offer columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubStageGroup {
    pub key: &'static str,
    pub label: &'static str,
    /// Status written when a card is dropped on this group.
    pub status: ApplicationStatus,
}

const INTERVIEW_GROUPS: [SubStageGroup; 3] = [
    SubStageGroup {
        key: "phone_screening",
        label: "Phone Screening",
        status: ApplicationStatus::PhoneScreening,
    },
    SubStageGroup {
        key: "interview_stage",
        label: "Interview",
        status: ApplicationStatus::InterviewStage,
    },
    SubStageGroup {
        key: "final_interview_stage",
        label: "Final Interview",
        status: ApplicationStatus::FinalInterviewStage,
    },
];

const OFFER_GROUPS: [SubStageGroup; 2] = [
    SubStageGroup {
        key: "negotiation",
        label: "Negotiation",
        status: ApplicationStatus::Negotiation,
    },
    SubStageGroup {
        key: "offer_extended",
        label: "Offer Extended",
        status: ApplicationStatus::OfferExtended,
    },
];

/// Map a backend status (plus the sub-stage override) to its board column.
pub fn column_for(status: ApplicationStatus, sub_stage: Option<&str>) -> BoardColumn {
    if sub_stage == Some(REFERRALS_SUB_STAGE) {
        return BoardColumn::Referrals;
    }

    match status {
        ApplicationStatus::Interested => BoardColumn::Interested,
        ApplicationStatus::Applied => BoardColumn::Applied,
        ApplicationStatus::PhoneScreening
        | ApplicationStatus::InterviewStage
        | ApplicationStatus::FinalInterviewStage => BoardColumn::Interview,
        ApplicationStatus::OfferExtended | ApplicationStatus::Negotiation => BoardColumn::Offer,
        ApplicationStatus::OfferAccepted => BoardColumn::Accepted,
        ApplicationStatus::Rejected => BoardColumn::Rejected,
        ApplicationStatus::Unknown => BoardColumn::Interested,
    }
}

/// The sub-stage groups rendered inside `column`. Empty for columns without
/// grouping.
pub fn sub_stage_groups(column: BoardColumn) -> &'static [SubStageGroup] {
    match column {
        BoardColumn::Interview => &INTERVIEW_GROUPS,
        BoardColumn::Offer => &OFFER_GROUPS,
        _ => &[],
    }
}

/// The bucket a card lands in within `column`.
///
/// A stored sub-stage naming one of the column's groups wins; otherwise the
/// group canonical to the status; otherwise the column's first group. Returns
/// `None` for columns without grouping.
pub fn bucket_for(
    status: ApplicationStatus,
    sub_stage: Option<&str>,
    column: BoardColumn,
) -> Option<&'static SubStageGroup> {
    let groups = sub_stage_groups(column);
    if groups.is_empty() {
        return None;
    }

    if let Some(key) = sub_stage {
        if let Some(group) = groups.iter().find(|group| group.key == key) {
            return Some(group);
        }
    }

    groups
        .iter()
        .find(|group| group.status == status)
        .or_else(|| groups.first())
}

/// The `{status, sub_stage}` write that realizes a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePatch {
    /// Status to persist. `None` leaves the stored status untouched (the
    /// referrals column is defined purely by its sub-stage override).
    pub status: Option<ApplicationStatus>,
    /// Final sub-stage value. `None` clears the stored value.
    pub sub_stage: Option<String>,
}

/// Translate a drop destination into the patch to persist.
///
/// Dropping on a column without groups clears the sub-stage; dropping on
/// interview/offer without naming a group lands on the column's first group.
pub fn patch_for_move(dest: BoardColumn, dest_group: Option<&str>) -> MovePatch {
    match dest {
        BoardColumn::Referrals => MovePatch {
            status: None,
            sub_stage: Some(REFERRALS_SUB_STAGE.to_string()),
        },
        BoardColumn::Interested => direct(ApplicationStatus::Interested),
        BoardColumn::Applied => direct(ApplicationStatus::Applied),
        BoardColumn::Accepted => direct(ApplicationStatus::OfferAccepted),
        BoardColumn::Rejected => direct(ApplicationStatus::Rejected),
        BoardColumn::Interview | BoardColumn::Offer => {
            let groups = sub_stage_groups(dest);
            let group = dest_group
                .and_then(|key| groups.iter().find(|group| group.key == key))
                .or_else(|| groups.first());
            match group {
                Some(group) => MovePatch {
                    status: Some(group.status),
                    sub_stage: Some(group.key.to_string()),
                },
                // Unreachable for the current column set; degrade like an
                // ungrouped column rather than panic.
                None => direct(ApplicationStatus::Interested),
            }
        }
    }
}

fn direct(status: ApplicationStatus) -> MovePatch {
    MovePatch {
        status: Some(status),
        sub_stage: None,
    }
}
