//! The applicant Kanban pipeline: status→column derivation and optimistic
//! synchronization of board moves back to the applications REST surface.

pub mod domain;
pub mod gateway;
pub mod mapper;
pub mod store;
pub mod sync;
pub mod view;

#[cfg(test)]
mod tests;

pub use domain::{Application, ApplicationId, ApplicationStatus, BoardColumn};
pub use gateway::{
    ApplicationDraft, ApplicationGateway, ApplicationUpdate, GatewayError, RestGateway,
};
pub use mapper::{
    bucket_for, column_for, patch_for_move, sub_stage_groups, MovePatch, SubStageGroup,
    REFERRALS_SUB_STAGE,
};
pub use store::BoardStore;
pub use sync::{BoardSync, CardMove, Notifier, Severity, SyncError};
pub use view::{ArchivedView, BoardView, CardView, ColumnView, GroupView};
