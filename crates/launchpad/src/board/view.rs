//! Serializable board projections derived from the flat application list.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Application, ApplicationId, ApplicationStatus, BoardColumn};
use super::mapper;

#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub application_id: ApplicationId,
    pub job_id: String,
    pub status: ApplicationStatus,
    pub sub_stage: Option<String>,
    pub applied_at: DateTime<Utc>,
}

impl CardView {
    fn from_application(application: &Application) -> Self {
        Self {
            application_id: application.id.clone(),
            job_id: application.job_id.clone(),
            status: application.status,
            sub_stage: application.sub_stage.clone(),
            applied_at: application.applied_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupView {
    pub key: &'static str,
    pub label: &'static str,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnView {
    pub column: BoardColumn,
    pub label: &'static str,
    /// Cards of a column without grouping. Grouped columns carry their cards
    /// inside `groups` instead.
    pub cards: Vec<CardView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupView>,
}

impl ColumnView {
    pub fn card_count(&self) -> usize {
        self.cards.len()
            + self
                .groups
                .iter()
                .map(|group| group.cards.len())
                .sum::<usize>()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    pub fn column(&self, column: BoardColumn) -> Option<&ColumnView> {
        self.columns.iter().find(|view| view.column == column)
    }
}

/// Build the active board: archived cards are excluded and every remaining
/// card lands in exactly one column.
pub fn board_view(applications: &[Application]) -> BoardView {
    let mut columns: Vec<ColumnView> = BoardColumn::ALL
        .iter()
        .map(|&column| ColumnView {
            column,
            label: column.label(),
            cards: Vec::new(),
            groups: mapper::sub_stage_groups(column)
                .iter()
                .map(|group| GroupView {
                    key: group.key,
                    label: group.label,
                    cards: Vec::new(),
                })
                .collect(),
        })
        .collect();

    for application in applications.iter().filter(|record| !record.archived) {
        let column = application.column();
        let slot = BoardColumn::ALL
            .iter()
            .position(|&candidate| candidate == column)
            .unwrap_or(0);
        let card = CardView::from_application(application);

        match mapper::bucket_for(application.status, application.sub_stage.as_deref(), column) {
            Some(bucket) => {
                if let Some(group) = columns[slot]
                    .groups
                    .iter_mut()
                    .find(|group| group.key == bucket.key)
                {
                    group.cards.push(card);
                }
            }
            None => columns[slot].cards.push(card),
        }
    }

    BoardView { columns }
}

/// Archived cards split by outcome: accepted offers on one side, everything
/// else on the other.
#[derive(Debug, Clone, Serialize)]
pub struct ArchivedView {
    pub accepted: Vec<CardView>,
    pub rejected: Vec<CardView>,
}

pub fn archived_view(applications: &[Application]) -> ArchivedView {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for application in applications.iter().filter(|record| record.archived) {
        let card = CardView::from_application(application);
        if application.status == ApplicationStatus::OfferAccepted {
            accepted.push(card);
        } else {
            rejected.push(card);
        }
    }

    ArchivedView { accepted, rejected }
}
